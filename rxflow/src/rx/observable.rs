//! Observable implementation (RxJS-like)

use super::observer::{Emitter, FnObserver, Observer};
use crate::disposable::Subscription;
use crate::error::RxError;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type Procedure<T> = dyn Fn(Emitter<T>) + Send + Sync;

/// Observable - a cold, lazily evaluated sequence of values
///
/// An observable only records how to produce its values. Nothing runs until
/// [`subscribe`](Observable::subscribe) is called, and every subscription runs the
/// procedure again from scratch. Cloning is cheap and shares the procedure.
pub struct Observable<T> {
    source: Arc<Procedure<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Create an Observable from a subscription procedure
    ///
    /// # Example
    /// ```
    /// # use rxflow::Observable;
    /// let numbers = Observable::create(|emitter| {
    ///     emitter.next(1);
    ///     emitter.next(2);
    ///     emitter.complete();
    /// });
    ///
    /// numbers.subscribe_fn(|value| println!("Next: {}", value), |err| eprintln!("Error: {}", err));
    /// ```
    pub fn create<F>(procedure: F) -> Self
    where
        F: Fn(Emitter<T>) + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(procedure),
        }
    }

    /// Subscribe an observer
    ///
    /// Returns the subscription handle; disposing it stops delivery and disposes every upstream
    /// subscription the chain created.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: Observer<T> + 'static,
    {
        let subscription = Subscription::new();
        self.subscribe_with(observer, subscription.clone());
        subscription
    }

    /// Subscribe with next/error callbacks; completion is ignored
    pub fn subscribe_fn<N, E>(&self, on_next: N, on_error: E) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
        E: FnMut(RxError) + Send + 'static,
    {
        self.subscribe(FnObserver::new(on_next, on_error, || {}))
    }

    /// Subscribe with next/error/complete callbacks (RxJS style)
    pub fn subscribe_all<N, E, C>(&self, on_next: N, on_error: E, on_complete: C) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
        E: FnMut(RxError) + Send + 'static,
        C: FnMut() + Send + 'static,
    {
        self.subscribe(FnObserver::new(on_next, on_error, on_complete))
    }

    /// Subscribe using a handle created by the caller, so the caller can tie it to its own
    /// subscription before any value flows
    pub(crate) fn subscribe_with<O>(&self, observer: O, subscription: Subscription)
    where
        O: Observer<T> + 'static,
    {
        tracing::trace!("Subscribing observer");
        self.run(Emitter::new(Box::new(observer), subscription));
    }

    /// Run the subscription procedure against an existing emitter
    ///
    /// A panic escaping the procedure is delivered to the emitter as [`RxError::Panicked`].
    pub(crate) fn run(&self, emitter: Emitter<T>) {
        let guard = emitter.clone();
        let source = &self.source;

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| source(emitter))) {
            let error = RxError::from_panic(payload);
            tracing::warn!("Subscription procedure failed: {}", error);
            guard.error(error);
        }
    }
}
