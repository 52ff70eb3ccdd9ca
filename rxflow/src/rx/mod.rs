//! RxJS-style reactive programming for Rust
//!
//! This module provides the observable/observer contract and the core operators.

pub mod observable;
pub mod observer;
pub mod operators;

pub use observable::Observable;
pub use observer::{Emitter, FnObserver, Observer};
