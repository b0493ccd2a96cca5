//! Shared handle for component state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Shared component state with a change flag.
///
/// A host usually needs the same component from more than one place: the
/// render loop reads it while callbacks registered on it (column layout
/// persistence, toasts) write elsewhere. `State<T>` is a cheap-to-clone
/// `Arc<RwLock<T>>` that records whether anything was mutated since the
/// host last redrew.
///
/// # Example
///
/// ```
/// use fadila_ui::State;
///
/// let query = State::new(String::new());
/// query.update(|q| q.push_str("ben"));
/// assert!(query.is_dirty());
/// assert_eq!(query.read(|q| q.len()), 3);
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }

    /// Replace the value.
    pub fn set(&self, value: T) {
        self.update(|slot| *slot = value);
    }

    /// Read through a closure without cloning.
    ///
    /// A poisoned lock still yields the last written value.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Mutate through a closure and mark the state dirty.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        };
        self.dirty.store(true, Ordering::SeqCst);
        result
    }

    /// Whether the value changed since the last [`State::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Take the dirty flag, returning its previous value.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let a = State::new(1);
        let b = a.clone();
        b.set(5);
        assert_eq!(a.get(), 5);
        assert!(a.take_dirty());
        assert!(!b.is_dirty());
    }
}
