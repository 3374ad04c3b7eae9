use core::ptr;

use crate::capacity::{capacity_for, Policy};
use crate::logic::Splice;
use crate::raw::RawStorage;
use crate::utils::wrap_add;
use crate::{RangeArgument, RingBuffer};

impl<T> RingBuffer<T> {
    /// Removes the first element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2].into();
    ///
    /// assert_eq!(buf.pop_front(), Some(1));
    /// assert_eq!(buf.pop_front(), Some(2));
    /// assert_eq!(buf.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.head;
        let len = self.len;
        let element = unsafe { ptr::read(self.buf.slot(head)) };
        self.set_len(len - 1);
        let new_head = self.increment(head);
        self.set_head(new_head);
        Some(element)
    }

    /// Removes the last element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2].into();
    ///
    /// assert_eq!(buf.pop_back(), Some(2));
    /// assert_eq!(buf.pop_back(), Some(1));
    /// assert_eq!(buf.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let len = self.len;
        let last = self.decrement(self.tail);
        let element = unsafe { ptr::read(self.buf.slot(last)) };
        self.set_len(len - 1);
        Some(element)
    }

    /// Removes and returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn remove_first(&mut self) -> T {
        match self.pop_front() {
            Some(element) => element,
            None => panic!("cannot remove the first element of an empty buffer"),
        }
    }

    /// Removes and returns the first element, then lets `policy` release
    /// capacity.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::{Policy, RingBuffer};
    ///
    /// let mut buf = RingBuffer::with_capacity(128);
    /// buf.append(0..33);
    ///
    /// assert_eq!(buf.remove_first_with_policy(Policy::smart().shrinking()), 0);
    /// assert_eq!(buf.capacity(), 64);
    /// ```
    pub fn remove_first_with_policy(&mut self, policy: Policy) -> T {
        let element = self.remove_first();
        self.reserve_for(self.len, policy);
        element
    }

    /// Removes and returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn remove_last(&mut self) -> T {
        match self.pop_back() {
            Some(element) => element,
            None => panic!("cannot remove the last element of an empty buffer"),
        }
    }

    /// Removes and returns the last element, then lets `policy` release
    /// capacity.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn remove_last_with_policy(&mut self, policy: Policy) -> T {
        let element = self.remove_last();
        self.reserve_for(self.len, policy);
        element
    }

    /// Drops the first `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..5).collect();
    /// buf.remove_first_n(2);
    ///
    /// assert_eq!(buf, vec![2, 3, 4]);
    /// ```
    pub fn remove_first_n(&mut self, n: usize) {
        self.remove_first_n_with_policy(n, Policy::default())
    }

    /// Drops the first `n` elements, then lets `policy` release capacity.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than the length.
    pub fn remove_first_n_with_policy(&mut self, n: usize, policy: Policy) {
        let len = self.len;
        assert!(n <= len, "cannot remove {} elements from a buffer of len {}", n, len);
        self.remove_range_with_policy(..n, policy);
    }

    /// Drops the last `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than the length.
    pub fn remove_last_n(&mut self, n: usize) {
        self.remove_last_n_with_policy(n, Policy::default())
    }

    /// Drops the last `n` elements, then lets `policy` release capacity.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than the length.
    pub fn remove_last_n_with_policy(&mut self, n: usize, policy: Policy) {
        let len = self.len;
        assert!(n <= len, "cannot remove {} elements from a buffer of len {}", n, len);
        self.remove_range_with_policy(len - n.., policy);
    }

    /// Shortens the buffer to `len` elements, dropping the rest. Does
    /// nothing if it is already that short.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..5).collect();
    /// buf.truncate(2);
    /// assert_eq!(buf, vec![0, 1]);
    ///
    /// buf.truncate(4);
    /// assert_eq!(buf, vec![0, 1]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.remove_last_n(self.len - len);
        }
    }

    /// Removes and returns the element at `index`, moving whichever side of
    /// it is shorter to close the gap.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2, 3].into();
    ///
    /// assert_eq!(buf.remove_at(1), 2);
    /// assert_eq!(buf, vec![1, 3]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> T {
        self.remove_at_with_policy(index, Policy::default())
    }

    /// Removes and returns the element at `index`, sizing the storage for
    /// what is left with `policy`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at_with_policy(&mut self, index: usize, policy: Policy) -> T {
        let len = self.len;
        assert!(index < len, "removal index (is {}) should be < len (is {})", index, len);
        let splice = Splice {
            at: index,
            removed: 1,
            added: 0,
            len,
        };
        let target = self.target_storage(len - 1, policy);
        let element = unsafe { ptr::read(self.buf.slot(self.physical(index))) };
        self.set_len(0);
        unsafe { self.relayout(splice, target, |_, next| next) };
        element
    }

    /// Drops the elements in `range`, using the default [`Policy`].
    ///
    /// Removing from either end moves nothing; an interior range is closed
    /// by moving whichever side of it is shorter.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or ends past the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..6).collect();
    /// buf.remove_range(1..4);
    ///
    /// assert_eq!(buf, vec![0, 4, 5]);
    /// ```
    pub fn remove_range<R>(&mut self, range: R)
        where R: RangeArgument<usize>
    {
        self.remove_range_with_policy(range, Policy::default())
    }

    /// Drops the elements in `range`, then lets `policy` release capacity.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or ends past the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::{Policy, RingBuffer};
    ///
    /// let mut buf: RingBuffer<_> = (0..100).collect();
    /// buf.remove_range_with_policy(10.., Policy::default().shrinking());
    ///
    /// assert_eq!(buf.len(), 10);
    /// assert_eq!(buf.capacity(), 64);
    /// ```
    pub fn remove_range_with_policy<R>(&mut self, range: R, policy: Policy)
        where R: RangeArgument<usize>
    {
        let (start, end) = self.range_bounds(&range);
        self.splice_with(start, end - start, 0, policy, |_, next| next);
    }

    /// Drops every element, keeping the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..10).collect();
    /// buf.clear();
    ///
    /// assert!(buf.is_empty());
    /// assert_eq!(buf.capacity(), 16);
    /// ```
    pub fn clear(&mut self) {
        let head = self.head;
        let len = self.len;
        self.set_len(0);
        self.set_head(0);
        unsafe {
            self.buf.deinit(head, len);
        }
    }

    /// Drops every element. Unless `policy` keeps the capacity, the storage
    /// is reset to the policy's empty capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::{Policy, RingBuffer};
    ///
    /// let mut buf: RingBuffer<_> = (0..10).collect();
    /// buf.clear_with_policy(Policy::exact().shrinking());
    ///
    /// assert_eq!(buf.capacity(), 0);
    /// ```
    pub fn clear_with_policy(&mut self, policy: Policy) {
        self.clear();
        let capacity = capacity_for(self.capacity(), 0, policy);
        if capacity != self.capacity() {
            log::debug!("resetting ring capacity {} -> {} on clear", self.capacity(), capacity);
            self.buf = RawStorage::allocate(capacity);
        }
    }

    /// Drops every element for which `predicate` returns `true`, keeping
    /// the order of the rest. Uses the default [`Policy`].
    ///
    /// The buffer is compacted from both ends towards the middle in a
    /// single pass, and `predicate` is called exactly once per element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (5..=11).collect();
    /// buf.remove_all_where(|x| x % 2 == 1);
    ///
    /// assert_eq!(buf, vec![6, 8, 10]);
    /// ```
    pub fn remove_all_where<F>(&mut self, predicate: F)
        where F: FnMut(&T) -> bool
    {
        self.remove_all_where_with_policy(predicate, Policy::default())
    }

    /// Drops every element for which `predicate` returns `true`, then lets
    /// `policy` release capacity.
    ///
    /// If `predicate` panics, the elements not yet examined are kept and
    /// the buffer stays consistent.
    pub fn remove_all_where_with_policy<F>(&mut self, mut predicate: F, policy: Policy)
        where F: FnMut(&T) -> bool
    {
        {
            let mut compactor = Compactor::new(self);
            while compactor.low < compactor.high {
                compactor.step_front(&mut predicate);
                compactor.step_back(&mut predicate);
            }
        }
        self.reserve_for(self.len, policy);
    }

    /// Keeps only the elements for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = (0..8).collect();
    /// buf.retain(|&x| x < 2 || x > 5);
    ///
    /// assert_eq!(buf, vec![0, 1, 6, 7]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
        where F: FnMut(&T) -> bool
    {
        self.remove_all_where(|element| !keep(element))
    }
}

/// In-progress two-ended compaction.
///
/// Logical layout, relative to the original head:
///
/// ```text
/// [0, front)            kept, compacted
/// [front, low)          dead
/// [low, high)           not examined yet
/// [high, len - back)    dead
/// [len - back, len)     kept, compacted
/// ```
///
/// Dropping the compactor joins the three live runs, so a panicking
/// predicate leaves a consistent buffer behind.
struct Compactor<'a, T: 'a> {
    ring: &'a mut RingBuffer<T>,
    head: usize,
    len: usize,
    front: usize,
    low: usize,
    high: usize,
    back: usize,
}

impl<'a, T> Compactor<'a, T> {
    fn new(ring: &'a mut RingBuffer<T>) -> Self {
        let head = ring.head;
        let len = ring.len;
        ring.set_len(0);
        Compactor {
            ring,
            head,
            len,
            front: 0,
            low: 0,
            high: len,
            back: 0,
        }
    }

    #[inline]
    fn physical(&self, logical: usize) -> usize {
        wrap_add(self.head, logical, self.ring.capacity())
    }

    #[inline]
    fn element(&self, logical: usize) -> &T {
        unsafe { &*self.ring.buf.slot(self.physical(logical)) }
    }

    #[inline]
    unsafe fn drop_element(&mut self, logical: usize) {
        ptr::drop_in_place(self.ring.buf.slot(self.physical(logical)));
    }

    #[inline]
    fn shift(&mut self, dst: usize, src: usize, len: usize) {
        let dst = self.physical(dst);
        let src = self.physical(src);
        unsafe { self.ring.buf.wrap_copy(dst, src, len) }
    }

    /// Scans forward to the next element to remove, compacts the kept run
    /// before it and drops it.
    fn step_front<F>(&mut self, predicate: &mut F)
        where F: FnMut(&T) -> bool
    {
        let mut end = self.low;
        while end < self.high {
            if predicate(self.element(end)) {
                self.keep_front(end);
                self.low += 1;
                unsafe { self.drop_element(end) };
                return;
            }
            end += 1;
        }
        self.keep_front(end);
    }

    /// Mirror image of `step_front`.
    fn step_back<F>(&mut self, predicate: &mut F)
        where F: FnMut(&T) -> bool
    {
        let mut start = self.high;
        while start > self.low {
            if predicate(self.element(start - 1)) {
                self.keep_back(start);
                self.high -= 1;
                unsafe { self.drop_element(start - 1) };
                return;
            }
            start -= 1;
        }
        self.keep_back(start);
    }

    fn keep_front(&mut self, end: usize) {
        let run = end - self.low;
        self.shift(self.front, self.low, run);
        self.front += run;
        self.low = end;
    }

    fn keep_back(&mut self, start: usize) {
        let run = self.high - start;
        let dst = self.len - self.back - run;
        self.shift(dst, start, run);
        self.back += run;
        self.high = start;
    }
}

impl<'a, T> Drop for Compactor<'a, T> {
    fn drop(&mut self) {
        let middle = self.high - self.low;
        let kept = self.front + middle + self.back;
        let back_start = self.len - self.back;

        let new_head = if self.back <= self.front {
            self.shift(self.front, self.low, middle);
            self.shift(self.front + middle, back_start, self.back);
            self.head
        } else {
            let first = back_start - middle - self.front;
            self.shift(back_start - middle, self.low, middle);
            self.shift(first, 0, self.front);
            self.physical(first)
        };

        self.ring.set_head(new_head);
        self.ring.set_len(kept);
    }
}
