//! A growable circular buffer with an explicit capacity policy.
//!
//! `RingBuffer<T>` keeps its elements in one heap block addressed modulo
//! its capacity. It has amortized `O(1)` inserts and removals at both ends,
//! `O(1)` indexing like a vector, and `O(n)` insertion, removal and
//! replacement anywhere in between, where only the shorter side of the
//! affected position is moved.
//!
//! Every operation that may resize the storage has a `*_with_policy`
//! variant taking a [`Policy`]: grow to powers of two or to an exact fit,
//! and keep or release capacity once the buffer becomes sparse. The plain
//! variants grow to powers of two and never shrink.
//!
//! # Feature Flags
//! The **ringvec** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; implements `std::error::Error` for `CapacityError<T>` when `T: Debug`
//!
//! Without `std` the crate only needs `alloc`:
//!
//! ```toml
//! [dependencies]
//! ringvec = { version = "0.1", default-features = false }
//! ```
//!
//! # Capacity
//!
//! ```
//! use ringvec::{Policy, RingBuffer};
//!
//! let mut buf = RingBuffer::new();
//! assert_eq!(buf.capacity(), 4);
//!
//! buf.append(0..5);
//! assert_eq!(buf.capacity(), 8);
//!
//! buf.append_with_policy(5..9, Policy::exact());
//! assert_eq!(buf.capacity(), 9);
//! ```
//!
//! # Insert & Remove
//! ```
//! use ringvec::RingBuffer;
//!
//! let mut buf = RingBuffer::new();
//!
//! buf.push_back(11);
//! buf.push_back(13);
//! buf.insert(1, 12);
//! buf.remove_at(0);
//!
//! assert_eq!(buf[0], 12);
//! assert_eq!(buf[1], 13);
//! ```
//!
//! # Replace
//! ```
//! use ringvec::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = (0..6).collect();
//! buf.replace_range(1..5, vec![10, 20]);
//!
//! assert_eq!(format!("{:?}", buf), "[0, 10, 20, 5]");
//! ```
//!
//! # Sliding Window
//! ```
//! use ringvec::RingBuffer;
//!
//! let mut window = RingBuffer::with_exact_capacity(3);
//! for x in 0..10 {
//!     window.push_back_evicting(x);
//! }
//!
//! assert_eq!(window, vec![7, 8, 9]);
//! ```
//!
//! # Contiguous Access
//! ```
//! use ringvec::RingBuffer;
//!
//! let mut buf: RingBuffer<_> = vec![3, 4].into();
//! buf.push_front(5);
//!
//! buf.with_contiguous_mut(|xs| xs.sort());
//! assert_eq!(buf, vec![3, 4, 5]);
//! ```

#![deny(missing_docs)]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub use odds::IndexRange as RangeArgument;

mod capacity;
mod error;
mod iter;
mod logic;
mod raw;
mod scoped;
mod trait_impls;
mod utils;

pub use crate::capacity::{capacity_for, empty_capacity, grown_capacity, smart_capacity_for, Policy,
                          MAX_CAPACITY, MIN_SMART_CAPACITY};
pub use crate::error::CapacityError;
pub use crate::iter::{IntoIter, Iter, IterMut};

use core::ptr;

use crate::raw::RawStorage;

/// A growable ring buffer.
///
/// The live elements occupy `len` consecutive slots, modulo the capacity,
/// starting at the physical slot `head`; `tail` is the slot just past the
/// last one.
pub struct RingBuffer<T> {
    buf: RawStorage<T>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty `RingBuffer` with room for
    /// [`MIN_SMART_CAPACITY`] elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::new();
    /// assert_eq!(buf.capacity(), 4);
    /// ```
    #[inline]
    pub fn new() -> RingBuffer<T> {
        RingBuffer::with_exact_capacity(MIN_SMART_CAPACITY)
    }

    /// Creates an empty `RingBuffer` with room for at least `capacity`
    /// elements, rounded up by the smart policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::with_capacity(10);
    /// assert_eq!(buf.capacity(), 16);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> RingBuffer<T> {
        RingBuffer::with_exact_capacity(smart_capacity_for(capacity))
    }

    /// Creates an empty `RingBuffer` with room for exactly `capacity`
    /// elements. A capacity of zero does not allocate.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`MAX_CAPACITY`] or the allocation size
    /// overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::with_exact_capacity(10);
    /// assert_eq!(buf.capacity(), 10);
    /// ```
    pub fn with_exact_capacity(capacity: usize) -> RingBuffer<T> {
        RingBuffer {
            buf: RawStorage::allocate(capacity),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Returns the number of slots in the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of elements in the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new();
    /// assert_eq!(buf.len(), 0);
    /// buf.push_back(1);
    /// assert_eq!(buf.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push has to grow the storage (or, for the
    /// evicting and `try_*` pushes, cannot succeed without evicting).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(1);
    /// assert!(!buf.is_full());
    /// buf.push_back(1);
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the number of free slots, `capacity() - len()`.
    #[inline]
    pub fn residual_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    /// Retrieves an element in the `RingBuffer` by index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let buf: RingBuffer<_> = vec![3, 4, 5].into();
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            unsafe { Some(&*self.buf.slot(self.physical(index))) }
        } else {
            None
        }
    }

    /// Retrieves a mutable reference to an element by index.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![3, 4, 5].into();
    /// if let Some(elem) = buf.get_mut(1) {
    ///     *elem = 7;
    /// }
    /// assert_eq!(buf[1], 7);
    /// ```
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            unsafe { Some(&mut *self.buf.slot(self.physical(index))) }
        } else {
            None
        }
    }

    /// Overwrites the element at `index`, dropping the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, element: T) {
        self[index] = element;
    }

    /// Swaps elements at indices `i` and `j`.
    ///
    /// `i` and `j` may be equal.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![3, 4, 5].into();
    /// buf.swap(0, 2);
    /// assert_eq!(buf, vec![5, 4, 3]);
    /// ```
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        let len = self.len;
        assert!(i < len, "index out of bounds: the len is {} but the index is {}", len, i);
        assert!(j < len, "index out of bounds: the len is {} but the index is {}", len, j);
        unsafe {
            let a = self.buf.slot(self.physical(i));
            let b = self.buf.slot(self.physical(j));
            ptr::swap(a, b);
        }
    }

    /// Provides a reference to the front element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if
    /// the buffer is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the buffer
    /// is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        match self.len {
            0 => None,
            len => self.get(len - 1),
        }
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len {
            0 => None,
            len => self.get_mut(len - 1),
        }
    }

    /// Returns a pair of slices which contain, in order, the contents of
    /// the `RingBuffer`. The second one is empty unless the contents wrap.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(4);
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// buf.push_front(0);
    ///
    /// assert_eq!(buf.as_slices(), (&[0][..], &[1, 2][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        unsafe { self.buf.slices(self.head, self.len) }
    }

    /// Returns a pair of mutable slices which contain, in order, the
    /// contents of the `RingBuffer`.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let head = self.head;
        let len = self.len;
        unsafe { self.buf.slices_mut(head, len) }
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new();
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_front(4);
    /// let b: &[_] = &[&4, &5, &3];
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(&c[..], b);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        let (front, back) = self.as_slices();
        Iter::new(front, back)
    }

    /// Returns a front-to-back iterator that returns mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        let (front, back) = self.as_mut_slices();
        IterMut::new(front, back)
    }

    /// Calls `f` on every element, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let buf: RingBuffer<_> = (1..=4).collect();
    /// let mut total = 0;
    /// buf.for_each(|x| total += x);
    /// assert_eq!(total, 10);
    /// ```
    pub fn for_each<F>(&self, mut f: F)
        where F: FnMut(&T)
    {
        let (front, back) = self.as_slices();
        front.iter().chain(back).for_each(|element| f(element));
    }

    /// Returns true if `predicate` holds for every element. Stops at the
    /// first one it does not hold for.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let buf: RingBuffer<_> = vec![2, 4, 6].into();
    /// assert!(buf.all_satisfy(|x| x % 2 == 0));
    /// assert!(!buf.all_satisfy(|&x| x < 5));
    /// ```
    pub fn all_satisfy<F>(&self, mut predicate: F) -> bool
        where F: FnMut(&T) -> bool
    {
        let (front, back) = self.as_slices();
        front.iter().all(&mut predicate) && back.iter().all(&mut predicate)
    }

    /// Returns true if the buffer contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> bool
        where T: PartialEq
    {
        let (front, back) = self.as_slices();
        front.contains(x) || back.contains(x)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::vec::Vec;

    use super::*;

    /// Checks the bookkeeping that every operation must leave intact.
    fn assert_consistent<T>(buf: &RingBuffer<T>) {
        assert!(buf.len <= buf.capacity());
        assert!(buf.head < buf.capacity() || buf.head == 0);
        assert_eq!(buf.tail, utils::wrap_add(buf.head, buf.len, buf.capacity()));
    }

    fn padded(cap: usize, padding: usize, elements: &[usize]) -> RingBuffer<usize> {
        let mut buf = RingBuffer::with_exact_capacity(cap);
        buf.set_head(padding);
        buf.extend_from_slice(elements);
        buf
    }

    #[test]
    fn constructors() {
        let buf: RingBuffer<u8> = RingBuffer::new();
        assert_eq!(buf.capacity(), MIN_SMART_CAPACITY);
        assert!(buf.is_empty());
        assert_eq!(RingBuffer::<u8>::with_capacity(0).capacity(), 4);
        assert_eq!(RingBuffer::<u8>::with_capacity(5).capacity(), 8);
        assert_eq!(RingBuffer::<u8>::with_exact_capacity(0).capacity(), 0);
        assert_eq!(RingBuffer::<u8>::default().capacity(), 4);
        let from: RingBuffer<u8> = (0..33).collect();
        assert_eq!(from.capacity(), 64);
        assert_eq!(from.residual_capacity(), 31);
    }

    #[test]
    fn smart_capacity_reference_points() {
        assert_eq!(smart_capacity_for(0), 4);
        assert_eq!(smart_capacity_for(2), 4);
        assert_eq!(smart_capacity_for(5), 8);
        assert_eq!(smart_capacity_for(1_000_000_000), 1_073_741_824);
        assert_eq!(smart_capacity_for(usize::MAX / 4 * 3), MAX_CAPACITY);
    }

    #[test]
    fn replace_on_empty_buffer() {
        let mut buf = RingBuffer::new();
        buf.replace_range(0..0, vec![1, 2, 3]);
        assert_eq!(buf, vec![1, 2, 3]);
        assert_consistent(&buf);
    }

    #[test]
    fn remove_odd_numbers() {
        let mut buf: RingBuffer<i32> = (5..=11).collect();
        buf.remove_all_where(|x| x % 2 != 0);
        assert_eq!(buf, vec![6, 8, 10]);
        assert_consistent(&buf);
    }

    #[test]
    fn insert_many_then_remove_range_restores() {
        const CAP: usize = 8;
        let original: Vec<usize> = (0..5).collect();
        for padding in 0..CAP {
            for index in 0..=original.len() {
                for count in 0..6 {
                    let mut buf = padded(CAP, padding, &original);
                    buf.insert_many(index, 100..100 + count);
                    assert_consistent(&buf);
                    buf.remove_range(index..index + count);
                    assert_consistent(&buf);
                    assert_eq!(buf, original,
                               "padding={} index={} count={}",
                               padding, index, count);
                }
            }
        }
    }

    #[test]
    fn pre_wrapped_layout_matches_unwrapped() {
        fn script(buf: &mut RingBuffer<usize>) {
            buf.push_back(10);
            buf.push_front(11);
            buf.insert(3, 12);
            buf.remove_at(1);
            buf.prepend(vec![13, 14]);
            buf.replace_range(2..4, vec![15, 16, 17]);
            buf.remove_range(1..3);
            buf.append(18..20);
            buf.retain(|&x| x != 3);
        }

        let elements = [0, 1, 2, 3, 4];
        let mut reference = padded(8, 0, &elements);
        script(&mut reference);
        assert_consistent(&reference);
        for padding in 1..8 {
            let mut buf = padded(8, padding, &elements);
            script(&mut buf);
            assert_consistent(&buf);
            assert_eq!(buf, reference, "padding={}", padding);
            assert_eq!(buf.capacity(), reference.capacity());
        }
    }

    #[test]
    fn get_set_and_swap_across_the_wrap() {
        let mut buf = padded(5, 3, &[0, 1, 2, 3]);
        assert_eq!(buf.get(1), Some(&1));
        assert_eq!(buf.get(4), None);
        buf.set(2, 20);
        buf.swap(0, 3);
        assert_eq!(buf, vec![3, 1, 20, 0]);
        *buf.front_mut().unwrap() += 100;
        *buf.back_mut().unwrap() += 100;
        assert_eq!(buf.front(), Some(&103));
        assert_eq!(buf.back(), Some(&100));
        assert!(buf.contains(&20));
        assert!(!buf.contains(&2));
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the len is 2 but the index is 2")]
    fn swap_out_of_bounds() {
        let mut buf = padded(4, 0, &[0, 1]);
        buf.swap(0, 2);
    }

    #[test]
    fn visit_in_order() {
        let buf = padded(6, 4, &[1, 2, 3, 4]);
        let mut seen = Vec::new();
        buf.for_each(|&x| seen.push(x));
        assert_eq!(seen, [1, 2, 3, 4]);
        assert!(buf.all_satisfy(|&x| x > 0));

        let mut calls = 0;
        assert!(!buf.all_satisfy(|&x| {
            calls += 1;
            x < 2
        }));
        assert_eq!(calls, 2);
    }

    #[test]
    fn as_mut_slices_cover_the_wrap() {
        let mut buf = padded(4, 2, &[1, 2, 3]);
        {
            let (a, b) = buf.as_mut_slices();
            assert_eq!((a.len(), b.len()), (2, 1));
            a[0] = 10;
            b[0] = 30;
        }
        assert_eq!(buf, vec![10, 2, 30]);
    }

    #[test]
    fn every_element_dropped_once() {
        struct Bump<'a>(&'a Cell<usize>);

        impl<'a> Drop for Bump<'a> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let flag = &Cell::new(0);
        let created;
        {
            let mut buf = RingBuffer::with_exact_capacity(3);
            buf.set_head(2);
            buf.append((0..5).map(|_| Bump(flag)));
            buf.push_front(Bump(flag));
            buf.insert_many(2, (0..4).map(|_| Bump(flag)));
            buf.replace_range(1..3, (0..5).map(|_| Bump(flag)));
            assert_eq!(flag.get(), 2);
            buf.remove_range_with_policy(0..4, Policy::exact().shrinking());
            assert_eq!(flag.get(), 6);
            buf.set(0, Bump(flag));
            assert_eq!(flag.get(), 7);
            drop(buf.pop_back());
            buf.remove_all_where(|_| true);
            buf.extend_back_evicting((0..20).map(|_| Bump(flag)));
            created = 5 + 1 + 4 + 5 + 1 + 20;
        }
        assert_eq!(flag.get(), created);
    }

    #[test]
    fn zero_sized_elements() {
        let mut buf = RingBuffer::new();
        for _ in 0..100 {
            buf.push_back(());
        }
        buf.insert_many(50, vec![(); 10]);
        buf.remove_range(0..20);
        assert_eq!(buf.len(), 90);
        assert_eq!(buf.iter().count(), 90);
        buf.remove_all_where(|_| true);
        assert!(buf.is_empty());
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RingBuffer<u8>>();
        assert_send_sync::<Iter<'static, u8>>();
    }
}
