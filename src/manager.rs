// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::any::Any;
use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;
use std::sync::Arc;

/// Opaque, reference-counted ownership handle for the memory behind a view.
///
/// Every [`Core`](crate::Core) holds one `Manager`, and cloning a manager only
/// bumps an atomic reference count. Whatever the manager owns is dropped
/// when the last clone goes away; the views themselves never free element
/// memory.
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use ndview::Manager;
///
/// let released = Arc::new(AtomicBool::new(false));
/// let flag = released.clone();
/// let m = Manager::with_release(move || flag.store(true, Ordering::SeqCst));
/// let m2 = m.clone();
/// drop(m);
/// assert!(!released.load(Ordering::SeqCst));
/// drop(m2);
/// assert!(released.load(Ordering::SeqCst));
/// ```
#[derive(Clone)]
pub struct Manager {
    owner: Option<Arc<dyn Any + Send + Sync>>,
}

impl Manager {
    /// Create a manager that keeps `owner` alive for as long as any view
    /// refers to it.
    pub fn new<U>(owner: U) -> Self
    where
        U: Any + Send + Sync,
    {
        Manager {
            owner: Some(Arc::new(owner)),
        }
    }

    /// Create a manager that runs `release` once the last reference to it is
    /// dropped.
    pub fn with_release<F>(release: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Manager::new(ReleaseHook(Some(release)))
    }

    /// A manager that owns nothing.
    ///
    /// Views over memory managed this way are only valid while the caller
    /// keeps the memory alive by other means.
    pub fn unmanaged() -> Self {
        Manager { owner: None }
    }

    /// Take ownership of `v` and return the manager together with a pointer
    /// to its first element.
    pub(crate) fn from_vec<A>(v: Vec<A>) -> (Self, NonNull<A>)
    where
        A: Send + Sync + 'static,
    {
        let repr = OwnedRepr::from(v);
        let ptr = repr.ptr;
        (Manager::new(repr), ptr)
    }

    /// Return `true` if this manager owns anything.
    pub fn is_managed(&self) -> bool {
        self.owner.is_some()
    }

    /// Number of live references to the managed allocation, or 0 for an
    /// unmanaged handle.
    pub fn use_count(&self) -> usize {
        self.owner.as_ref().map_or(0, Arc::strong_count)
    }

    /// Return `true` if both handles manage the same allocation.
    pub fn ptr_eq(&self, other: &Manager) -> bool {
        match (&self.owner, &other.owner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Return a reference to the owner value if it has type `U`.
    pub fn downcast_ref<U: Any>(&self) -> Option<&U> {
        self.owner.as_deref().and_then(|owner| owner.downcast_ref::<U>())
    }
}

impl Default for Manager {
    fn default() -> Self {
        Manager::unmanaged()
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("managed", &self.is_managed())
            .field("use_count", &self.use_count())
            .finish()
    }
}

struct ReleaseHook<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for ReleaseHook<F> {
    fn drop(&mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

/// An allocation taken over from a `Vec`.
///
/// Like a `Vec`, but elements are only ever reached through raw pointers
/// handed out before the buffer was moved behind its manager.
pub(crate) struct OwnedRepr<A> {
    ptr: NonNull<A>,
    len: usize,
    capacity: usize,
}

impl<A> OwnedRepr<A> {
    pub(crate) fn from(v: Vec<A>) -> Self {
        let mut v = ManuallyDrop::new(v);
        let len = v.len();
        let capacity = v.capacity();
        // this pointer is guaranteed to be non-null
        let ptr = unsafe { NonNull::new_unchecked(v.as_mut_ptr()) };
        OwnedRepr { ptr, len, capacity }
    }

    fn take_as_vec(&mut self) -> Vec<A> {
        let capacity = self.capacity;
        let len = self.len;
        self.len = 0;
        self.capacity = 0;
        unsafe { Vec::from_raw_parts(self.ptr.as_ptr(), len, capacity) }
    }
}

impl<A> Drop for OwnedRepr<A> {
    fn drop(&mut self) {
        if self.capacity > 0 {
            // drop elements and free the allocation
            drop(self.take_as_vec());
        }
    }
}

unsafe impl<A> Send for OwnedRepr<A> where A: Send {}
unsafe impl<A> Sync for OwnedRepr<A> where A: Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn use_count_follows_clones() {
        let m = Manager::new(vec![1u8, 2, 3]);
        assert_eq!(m.use_count(), 1);
        let m2 = m.clone();
        assert_eq!(m.use_count(), 2);
        assert!(m.ptr_eq(&m2));
        drop(m2);
        assert_eq!(m.use_count(), 1);
        assert_eq!(m.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn unmanaged() {
        let m = Manager::unmanaged();
        assert!(!m.is_managed());
        assert_eq!(m.use_count(), 0);
        assert!(!m.ptr_eq(&m.clone()));
    }

    #[test]
    fn release_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let m = Manager::with_release(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let clones: Vec<_> = (0..4).map(|_| m.clone()).collect();
        drop(m);
        std::thread::spawn(move || drop(clones)).join().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn owned_vec_is_dropped() {
        let counter = Arc::new(());
        let v = vec![counter.clone(), counter.clone()];
        let (m, _ptr) = Manager::from_vec(v);
        assert_eq!(Arc::strong_count(&counter), 3);
        drop(m);
        assert_eq!(Arc::strong_count(&counter), 1);
    }
}
