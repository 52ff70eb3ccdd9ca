//! # rxflow
//!
//! Push-based reactive streams for Rust: observables, composable operators, explicit
//! cancellation and pluggable schedulers.
//!
//! ## Features
//!
//! - **Cold observables**: nothing runs until `subscribe`, and every subscription runs the
//!   producer again
//! - **Operators**: `map`, `filter`, `flat_map`, `subscribe_on`, `observe_on` (plus fallible
//!   `try_` variants)
//! - **Cancellation**: every subscription returns a [`Subscription`] that tears down the chain
//! - **Schedulers**: computation pool, unbounded IO pool and single-thread worker
//! - **Async bridge**: consume any observable as a `futures::Stream`
//!
//! ## Quick Start
//!
//! ```rust
//! use rxflow::{ComputationScheduler, Observable, SingleThreadScheduler};
//!
//! let numbers = Observable::create(|emitter| {
//!     for i in 1..=5 {
//!         if emitter.is_disposed() {
//!             return;
//!         }
//!         emitter.next(i);
//!     }
//!     emitter.complete();
//! });
//!
//! let subscription = numbers
//!     .filter(|x| x % 2 == 1)
//!     .map(|x| x * 10)
//!     .subscribe_on(ComputationScheduler::new())
//!     .observe_on(SingleThreadScheduler::new())
//!     .subscribe_fn(|value| println!("Next: {}", value), |err| eprintln!("Error: {}", err));
//! # let _ = subscription;
//! ```

pub mod config;
pub mod disposable;
pub mod error;
pub mod reactive;
pub mod rx;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use disposable::{CompositeDisposable, Disposable, Subscription};
pub use error::{BoxError, Result, RxError};
pub use reactive::ObservableStream;
pub use rx::{Emitter, FnObserver, Observable, Observer};
pub use scheduler::{ComputationScheduler, IoScheduler, Scheduler, SingleThreadScheduler, Work};
