//! Observer contract and the guarded emitter handed to producers

use crate::disposable::{Disposable, Subscription};
use crate::error::RxError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Observer trait - similar to RxJS Observer
///
/// `on_error` and `on_complete` are terminal: at most one of them is called, once.
pub trait Observer<T>: Send {
    fn on_next(&mut self, value: T);
    fn on_error(&mut self, error: RxError);
    fn on_complete(&mut self);
}

impl<T, O: Observer<T> + ?Sized> Observer<T> for Box<O> {
    fn on_next(&mut self, value: T) {
        (**self).on_next(value)
    }

    fn on_error(&mut self, error: RxError) {
        (**self).on_error(error)
    }

    fn on_complete(&mut self) {
        (**self).on_complete()
    }
}

/// Observer assembled from callbacks
pub struct FnObserver<N, E, C> {
    next: N,
    error: E,
    complete: C,
}

impl<N, E, C> FnObserver<N, E, C> {
    pub fn new(next: N, error: E, complete: C) -> Self {
        Self {
            next,
            error,
            complete,
        }
    }
}

impl<T, N, E, C> Observer<T> for FnObserver<N, E, C>
where
    N: FnMut(T) + Send,
    E: FnMut(RxError) + Send,
    C: FnMut() + Send,
{
    fn on_next(&mut self, value: T) {
        (self.next)(value)
    }

    fn on_error(&mut self, error: RxError) {
        (self.error)(error)
    }

    fn on_complete(&mut self) {
        (self.complete)()
    }
}

/// Guarded sink handed to subscription procedures
///
/// Wraps the subscriber's observer together with its [`Subscription`]. Nothing reaches the
/// observer once the subscription is disposed, and a terminal event disposes it, so at most one
/// terminal event is ever delivered. Clones feed the same observer; calls from different threads
/// are serialized.
pub struct Emitter<T> {
    observer: Arc<Mutex<Box<dyn Observer<T>>>>,
    subscription: Subscription,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            observer: Arc::clone(&self.observer),
            subscription: self.subscription.clone(),
        }
    }
}

impl<T: 'static> Emitter<T> {
    pub(crate) fn new(observer: Box<dyn Observer<T>>, subscription: Subscription) -> Self {
        Self {
            observer: Arc::new(Mutex::new(observer)),
            subscription,
        }
    }

    /// Emit a value. Dropped if the subscription is disposed.
    pub fn next(&self, value: T) {
        let mut observer = self.observer.lock();
        if !self.subscription.is_disposed() {
            observer.on_next(value);
        }
    }

    /// Emit an error and terminate the subscription
    pub fn error(&self, error: RxError) {
        let mut observer = self.observer.lock();
        if !self.subscription.is_disposed() {
            // Terminated before delivery, so a panicking callback cannot be handed a second
            // terminal event
            self.subscription.dispose();
            observer.on_error(error);
        }
    }

    /// Signal completion and terminate the subscription
    pub fn complete(&self) {
        let mut observer = self.observer.lock();
        if !self.subscription.is_disposed() {
            self.subscription.dispose();
            observer.on_complete();
        }
    }

    /// Whether the subscriber is gone; cooperative producers stop emitting when this is true
    pub fn is_disposed(&self) -> bool {
        self.subscription.is_disposed()
    }

    /// Tie a resource (usually an upstream subscription) to this subscription's lifetime
    pub fn add_disposable(&self, disposable: impl Disposable + 'static) {
        self.subscription.add(disposable);
    }

    /// The subscription this emitter reports to
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

/// Observer that forwards into another emitter; the building block of every operator
pub(crate) struct ForwardObserver<T, U, F> {
    downstream: Emitter<U>,
    on_value: F,
    _marker: std::marker::PhantomData<fn(T)>,
}

impl<T, U, F> ForwardObserver<T, U, F>
where
    U: 'static,
    F: FnMut(&Emitter<U>, T) + Send,
{
    pub(crate) fn new(downstream: Emitter<U>, on_value: F) -> Self {
        Self {
            downstream,
            on_value,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, U, F> Observer<T> for ForwardObserver<T, U, F>
where
    U: 'static,
    F: FnMut(&Emitter<U>, T) + Send,
{
    fn on_next(&mut self, value: T) {
        (self.on_value)(&self.downstream, value)
    }

    fn on_error(&mut self, error: RxError) {
        self.downstream.error(error)
    }

    fn on_complete(&mut self) {
        self.downstream.complete()
    }
}
