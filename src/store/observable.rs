use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    value: Mutex<T>,
    listeners: Mutex<Vec<(u64, Listener<T>)>>,
    next_listener_id: AtomicU64,
    // Held across write + notify so every listener sees writes in apply order.
    // Reentrant so a listener may write back into the same value.
    publish: ReentrantMutex<()>,
}

trait Detach: Send + Sync {
    fn detach(&self, listener_id: u64);
}

impl<T: Send> Detach for Shared<T> {
    fn detach(&self, listener_id: u64) {
        self.listeners.lock().retain(|(id, _)| *id != listener_id);
    }
}

/// A value holder that pushes every new value to its listeners.
///
/// Listeners run synchronously on the writing thread, once per write, in
/// registration order. Nothing is batched or coalesced: a listener registered
/// before a sequence of writes observes each intermediate value.
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Observable<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: Mutex::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(1),
                publish: ReentrantMutex::new(()),
            }),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.shared.value.lock().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.lock())
    }

    pub fn set(&self, value: T) {
        let _publishing = self.shared.publish.lock();
        *self.shared.value.lock() = value.clone();
        self.notify(&value);
    }

    /// Mutates the value in place, then notifies with the result.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let _publishing = self.shared.publish.lock();
        let snapshot = {
            let mut value = self.shared.value.lock();
            f(&mut value);
            value.clone()
        };
        self.notify(&snapshot);
    }

    /// Registers a listener. It is called immediately with the current value and
    /// then after every write until the returned [`Subscription`] is released.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let _publishing = self.shared.publish.lock();
        let listener: Listener<T> = Arc::new(listener);
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.shared.listeners.lock().push((id, listener.clone()));

        let current = self.get();
        listener(&current);

        let shared: Arc<dyn Detach> = self.shared.clone();
        Subscription {
            listener_id: id,
            source: Some(Arc::downgrade(&shared)),
        }
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.lock().len()
    }

    fn notify(&self, value: &T) {
        // Listeners are cloned out so one may subscribe or unsubscribe while running.
        let listeners: Vec<Listener<T>> = self
            .shared
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + Default + Send + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle for a registered listener. Dropping it also unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    listener_id: u64,
    source: Option<Weak<dyn Detach>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(source) = self.source.take().and_then(|weak| weak.upgrade()) {
            source.detach(self.listener_id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
