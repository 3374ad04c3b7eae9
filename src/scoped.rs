//! Scoped contiguous access.
//!
//! A wrapped buffer is first linearized into a fresh block of the same
//! capacity with the head at slot 0, after which the live elements form one
//! slice.

use core::mem;
use core::slice;

use crate::raw::RawStorage;
use crate::RingBuffer;

impl<T> RingBuffer<T> {
    /// Rearranges the storage so the elements are contiguous and returns
    /// them as one mutable slice. The order is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(4);
    /// buf.push_back(2);
    /// buf.push_back(3);
    /// buf.push_front(1);
    ///
    /// assert_eq!(buf.make_contiguous(), &mut [1, 2, 3]);
    /// ```
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if self.is_wrapped() {
            self.resize(self.capacity());
        }
        let head = self.head;
        let len = self.len;
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().add(head), len) }
    }

    /// Calls `f` with the elements as one contiguous slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![2, 3].into();
    /// buf.push_front(1);
    ///
    /// let sum = buf.with_contiguous(|xs| xs.iter().sum::<i32>());
    /// assert_eq!(sum, 6);
    /// ```
    pub fn with_contiguous<R, F>(&mut self, f: F) -> R
        where F: FnOnce(&[T]) -> R
    {
        f(self.make_contiguous())
    }

    /// Calls `f` with the elements as one contiguous mutable slice.
    ///
    /// While `f` runs the buffer is parked: its storage is moved out and
    /// an empty placeholder takes its place. The storage is put back when
    /// `f` returns or unwinds.
    ///
    /// `f` receives the slice by mutable reference. It may change the
    /// elements freely but must hand back the same slice.
    ///
    /// # Panics
    ///
    /// Panics, after restoring the buffer, if `f` replaced the slice with
    /// one at a different address or of a different length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![3, 1, 2].into();
    ///
    /// buf.with_contiguous_mut(|xs| xs.sort());
    /// assert_eq!(buf, vec![1, 2, 3]);
    /// ```
    pub fn with_contiguous_mut<R, F>(&mut self, f: F) -> R
        where F: for<'a> FnOnce(&mut &'a mut [T]) -> R
    {
        let (ptr, len) = {
            let view = self.make_contiguous();
            (view.as_mut_ptr(), view.len())
        };

        let parked = Parked::new(self);
        let mut view: &mut [T] = unsafe { slice::from_raw_parts_mut(ptr, len) };
        let result = f(&mut view);
        let intact = view.as_mut_ptr() == ptr && view.len() == len;
        drop(parked);

        assert!(intact,
                "with_contiguous_mut: the closure replaced the view (expected {} elements at {:p}, got {} at {:p})",
                len,
                ptr,
                view.len(),
                view.as_ptr());
        result
    }
}

/// A buffer swapped out for an empty placeholder, swapped back on drop.
struct Parked<'a, T: 'a> {
    ring: &'a mut RingBuffer<T>,
    saved: RingBuffer<T>,
}

impl<'a, T> Parked<'a, T> {
    fn new(ring: &'a mut RingBuffer<T>) -> Self {
        let saved = mem::replace(ring, RingBuffer::placeholder());
        Parked { ring, saved }
    }
}

impl<'a, T> Drop for Parked<'a, T> {
    fn drop(&mut self) {
        mem::swap(self.ring, &mut self.saved);
    }
}

impl<T> RingBuffer<T> {
    /// An empty buffer that owns no allocation.
    pub(crate) const fn placeholder() -> Self {
        RingBuffer {
            buf: RawStorage::dangling(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }
}
