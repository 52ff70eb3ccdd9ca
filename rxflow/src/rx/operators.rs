//! RxJS-style operators
//!
//! Every operator builds a new [`Observable`] whose procedure subscribes to the upstream with a
//! forwarding observer. The upstream subscription is attached to the downstream one, so disposing
//! the outermost subscription tears down the whole chain.

use super::observable::Observable;
use super::observer::{Emitter, FnObserver, ForwardObserver, Observer};
use crate::disposable::{CompositeDisposable, Subscription};
use crate::error::{BoxError, RxError};
use crate::scheduler::Scheduler;
use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Run a callback on behalf of `down`; a panic ends `down` with [`RxError::Panicked`]
fn guarded<R: 'static>(down: &Emitter<R>, callback: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
        let error = RxError::from_panic(payload);
        tracing::warn!("Operator callback panicked: {}", error);
        down.error(error);
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Build an observable that subscribes to `self` and hands each value to `on_value`
    /// together with the downstream emitter. Errors and completion pass through unchanged.
    fn lift<R, F>(&self, on_value: F) -> Observable<R>
    where
        R: Send + 'static,
        F: Fn(&Emitter<R>, T) + Send + Sync + 'static,
    {
        let upstream = self.clone();
        let on_value = Arc::new(on_value);

        Observable::create(move |downstream: Emitter<R>| {
            let upstream_subscription = Subscription::new();
            downstream.add_disposable(upstream_subscription.clone());

            let on_value = Arc::clone(&on_value);
            upstream.subscribe_with(
                ForwardObserver::new(downstream, move |down: &Emitter<R>, value: T| {
                    guarded(down, || on_value(down, value))
                }),
                upstream_subscription,
            );
        })
    }

    /// Map operator - transform values
    ///
    /// # Example
    /// ```
    /// # use rxflow::Observable;
    /// let doubled = Observable::create(|emitter| {
    ///     emitter.next(1);
    ///     emitter.next(2);
    ///     emitter.complete();
    /// })
    /// .map(|x: i32| x * 2);
    /// ```
    pub fn map<R, F>(&self, f: F) -> Observable<R>
    where
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok::<R, Infallible>(f(value)))
    }

    /// Fallible map - an `Err` from `f` is delivered downstream as [`RxError::Operator`] and
    /// ends the subscription
    pub fn try_map<R, E, F>(&self, f: F) -> Observable<R>
    where
        R: Send + 'static,
        E: Into<BoxError>,
        F: Fn(T) -> Result<R, E> + Send + Sync + 'static,
    {
        self.lift(move |down: &Emitter<R>, value| match f(value) {
            Ok(mapped) => down.next(mapped),
            Err(e) => down.error(RxError::operator(e)),
        })
    }

    /// Filter operator - filter values
    pub fn filter<F>(&self, predicate: F) -> Observable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.try_filter(move |value| Ok::<bool, Infallible>(predicate(value)))
    }

    /// Fallible filter - an `Err` from the predicate ends the subscription with an error
    pub fn try_filter<E, F>(&self, predicate: F) -> Observable<T>
    where
        E: Into<BoxError>,
        F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
    {
        self.lift(move |down: &Emitter<T>, value| match predicate(&value) {
            Ok(true) => down.next(value),
            Ok(false) => {}
            Err(e) => down.error(RxError::operator(e)),
        })
    }

    /// FlatMap operator - map each value to an inner observable and merge the results
    ///
    /// Inner observables are subscribed as values arrive and their values are forwarded as they
    /// are produced, so values from different inner observables may interleave. Errors from any
    /// inner observable end the merged stream; completion follows the outer observable.
    /// Disposing the resulting subscription disposes the outer and every live inner subscription;
    /// inner subscriptions that already terminated are released as new ones are added.
    pub fn flat_map<R, F>(&self, f: F) -> Observable<R>
    where
        R: Send + 'static,
        F: Fn(T) -> Observable<R> + Send + Sync + 'static,
    {
        self.try_flat_map(move |value| Ok::<Observable<R>, Infallible>(f(value)))
    }

    /// Fallible flat_map - an `Err` ends the merged stream and no inner observable is subscribed
    /// for that value
    pub fn try_flat_map<R, E, F>(&self, f: F) -> Observable<R>
    where
        R: Send + 'static,
        E: Into<BoxError>,
        F: Fn(T) -> Result<Observable<R>, E> + Send + Sync + 'static,
    {
        let upstream = self.clone();
        let f = Arc::new(f);

        Observable::create(move |downstream: Emitter<R>| {
            let composite = CompositeDisposable::new();
            downstream.add_disposable(composite.clone());

            let outer_subscription = Subscription::new();
            composite.add(outer_subscription.clone());

            let f = Arc::clone(&f);
            let inners = composite.clone();
            upstream.subscribe_with(
                ForwardObserver::new(downstream, move |down: &Emitter<R>, value: T| {
                    guarded(down, || match f(value) {
                        Ok(inner) => {
                            // Terminated inner subscriptions are not kept around
                            inners.remove_disposed();
                            let inner_subscription = Subscription::new();
                            inners.add(inner_subscription.clone());

                            let (values, errors) = (down.clone(), down.clone());
                            inner.subscribe_with(
                                FnObserver::new(
                                    move |v: R| values.next(v),
                                    move |e: RxError| errors.error(e),
                                    || {},
                                ),
                                inner_subscription,
                            );
                        }
                        Err(e) => down.error(RxError::operator(e)),
                    })
                }),
                outer_subscription,
            );
        })
    }

    /// Run the subscription itself on `scheduler`
    ///
    /// The upstream procedure (and whatever it emits synchronously) executes on a thread chosen
    /// by the scheduler instead of the thread calling `subscribe`.
    pub fn subscribe_on<S>(&self, scheduler: S) -> Observable<T>
    where
        S: Scheduler + 'static,
    {
        let upstream = self.clone();
        let scheduler: Arc<dyn Scheduler> = Arc::new(scheduler);

        Observable::create(move |downstream: Emitter<T>| {
            let upstream = upstream.clone();
            scheduler.execute(Box::new(move || {
                if !downstream.is_disposed() {
                    upstream.run(downstream);
                }
            }));
        })
    }

    /// Deliver every event to the downstream observer on `scheduler`
    ///
    /// Each value, error and completion is submitted as its own unit of work. Order is kept when
    /// the scheduler runs work sequentially (e.g. `SingleThreadScheduler`) but not on a parallel
    /// pool.
    pub fn observe_on<S>(&self, scheduler: S) -> Observable<T>
    where
        S: Scheduler + 'static,
    {
        let upstream = self.clone();
        let scheduler: Arc<dyn Scheduler> = Arc::new(scheduler);

        Observable::create(move |downstream: Emitter<T>| {
            let upstream_subscription = Subscription::new();
            downstream.add_disposable(upstream_subscription.clone());

            upstream.subscribe_with(
                ScheduledObserver {
                    downstream,
                    scheduler: Arc::clone(&scheduler),
                },
                upstream_subscription,
            );
        })
    }
}

/// Observer that re-submits each event to a scheduler
struct ScheduledObserver<T> {
    downstream: Emitter<T>,
    scheduler: Arc<dyn Scheduler>,
}

impl<T: Send + 'static> ScheduledObserver<T> {
    fn schedule(&self, deliver: impl FnOnce(Emitter<T>) + Send + 'static) {
        if self.downstream.is_disposed() {
            return;
        }

        // A panicking downstream observer ends the subscription instead of the worker's unit
        let downstream = self.downstream.clone();
        self.scheduler.execute(Box::new(move || {
            let guard = downstream.clone();
            guarded(&guard, move || deliver(downstream));
        }));
    }
}

impl<T: Send + 'static> Observer<T> for ScheduledObserver<T> {
    fn on_next(&mut self, value: T) {
        self.schedule(move |downstream| downstream.next(value));
    }

    fn on_error(&mut self, error: RxError) {
        self.schedule(move |downstream| downstream.error(error));
    }

    fn on_complete(&mut self) {
        self.schedule(|downstream| downstream.complete());
    }
}
