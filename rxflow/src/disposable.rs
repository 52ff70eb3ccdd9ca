//! Cancellation handles
//!
//! A [`Subscription`] is returned by every `subscribe` call. Disposing it stops delivery to the
//! observer and releases whatever resources were attached to it. A [`CompositeDisposable`]
//! groups several handles under one disposal action.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Something that can be cancelled
pub trait Disposable: Send + Sync {
    /// Cancel. Idempotent and safe to call from any thread.
    fn dispose(&self);

    /// Whether `dispose` has been called
    fn is_disposed(&self) -> bool;
}

impl<D: Disposable + ?Sized> Disposable for Arc<D> {
    fn dispose(&self) {
        (**self).dispose()
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&self) {
        (**self).dispose()
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

/// Subscription handle - similar to RxJS Subscription
///
/// Clones share the same state. Besides the disposed flag, a subscription keeps a list of
/// teardown handles (usually upstream subscriptions) that are disposed together with it.
#[derive(Clone)]
pub struct Subscription {
    disposed: Arc<AtomicBool>,
    teardown: CompositeDisposable,
}

impl Subscription {
    pub fn new() -> Self {
        Self {
            disposed: Arc::new(AtomicBool::new(false)),
            teardown: CompositeDisposable::new(),
        }
    }

    /// Attach a handle that is disposed when this subscription is.
    ///
    /// If the subscription is already disposed the handle is disposed immediately.
    pub fn add(&self, disposable: impl Disposable + 'static) {
        self.teardown.add(disposable);
    }
}

impl Disposable for Subscription {
    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            tracing::trace!("Subscription disposed");
        }
        self.teardown.dispose();
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .field("teardown", &self.teardown.len())
            .finish()
    }
}

struct CompositeState {
    disposed: bool,
    children: Vec<Box<dyn Disposable>>,
}

/// Group of handles disposed together
///
/// Handles added after the composite was disposed are disposed on the spot, so a disposed
/// composite never holds on to a live child.
#[derive(Clone)]
pub struct CompositeDisposable {
    state: Arc<Mutex<CompositeState>>,
}

impl CompositeDisposable {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CompositeState {
                disposed: false,
                children: Vec::new(),
            })),
        }
    }

    /// Add a handle to the group
    pub fn add(&self, disposable: impl Disposable + 'static) {
        let mut state = self.state.lock();
        if state.disposed {
            drop(state);
            disposable.dispose();
        } else {
            state.children.push(Box::new(disposable));
        }
    }

    /// Drop handles that were already disposed elsewhere
    pub fn remove_disposed(&self) {
        self.state.lock().children.retain(|child| !child.is_disposed());
    }

    /// Number of handles currently retained
    pub fn len(&self) -> usize {
        self.state.lock().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Disposable for CompositeDisposable {
    fn dispose(&self) {
        // Children are disposed outside the lock: a child's teardown may add to this group
        let children = {
            let mut state = self.state.lock();
            state.disposed = true;
            std::mem::take(&mut state.children)
        };

        for child in children {
            child.dispose();
        }
    }

    fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}
