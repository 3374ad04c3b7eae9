//! The owned slot block behind a `RingBuffer`.

use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::capacity::MAX_CAPACITY;

/// `capacity` slots of uninitialized memory.
///
/// `RawStorage` allocates and frees; it never reads, writes or drops a slot.
/// Which slots are live is the owner's business.
pub(crate) struct RawStorage<T> {
    ptr: NonNull<T>,
    cap: usize,
    marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// A zero-capacity block. Does not allocate.
    #[inline]
    pub(crate) const fn dangling() -> Self {
        RawStorage {
            ptr: NonNull::dangling(),
            cap: 0,
            marker: PhantomData,
        }
    }

    /// Allocates a block of exactly `cap` slots.
    ///
    /// Zero-sized element types and zero capacities get a dangling pointer.
    pub(crate) fn allocate(cap: usize) -> Self {
        assert!(cap <= MAX_CAPACITY, "capacity overflow");
        if cap == 0 || mem::size_of::<T>() == 0 {
            return RawStorage {
                ptr: NonNull::dangling(),
                cap,
                marker: PhantomData,
            };
        }
        let layout = match Layout::array::<T>(cap) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        };
        let raw = unsafe { alloc(layout) } as *mut T;
        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        };
        RawStorage {
            ptr,
            cap,
            marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    #[inline]
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index < self.cap, "slot index={} cap={}", index, self.cap);
        self.ptr().add(index)
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_elements_never_allocate() {
        let storage = RawStorage::<()>::allocate(1 << 20);
        assert_eq!(storage.capacity(), 1 << 20);
        assert_eq!(storage.ptr(), NonNull::<()>::dangling().as_ptr());
    }

    #[test]
    fn allocation_is_writable() {
        let storage = RawStorage::<u64>::allocate(3);
        unsafe {
            for i in 0..3 {
                storage.slot(i).write(i as u64 * 10);
            }
            assert_eq!(storage.slot(2).read(), 20);
        }
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn oversized_allocation() {
        RawStorage::<u64>::allocate(MAX_CAPACITY);
    }
}
