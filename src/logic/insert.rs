use alloc::vec::Vec;
use core::ptr;

use crate::capacity::{capacity_for, grown_capacity, Policy, MAX_CAPACITY};
use crate::error::CapacityError;
use crate::utils::wrap_sub;
use crate::RingBuffer;

impl<T> RingBuffer<T> {
    /// Appends an element to the back of the buffer, doubling the capacity
    /// first if it is full.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is full at the largest representable capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(1);
    /// buf.push_back(1);
    /// buf.push_back(2);
    ///
    /// assert_eq!(buf.back(), Some(&2));
    /// assert_eq!(buf.capacity(), 2);
    /// ```
    pub fn push_back(&mut self, element: T) {
        if self.is_full() {
            let capacity = grown_capacity(self.capacity());
            self.resize(capacity);
        }
        unsafe { self.push_back_expecting_space_available(element) }
    }

    /// Appends an element to the back, growing a full buffer to whatever
    /// `policy` wants for one more element instead of doubling it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::{Policy, RingBuffer};
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(2);
    /// buf.push_back_with_policy(1, Policy::exact());
    /// buf.push_back_with_policy(2, Policy::exact());
    /// buf.push_back_with_policy(3, Policy::exact());
    ///
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    pub fn push_back_with_policy(&mut self, element: T, policy: Policy) {
        if self.is_full() {
            self.reserve_for(self.len_after_adding(1), policy);
        }
        unsafe { self.push_back_expecting_space_available(element) }
    }

    /// Prepends an element to the front of the buffer, doubling the
    /// capacity first if it is full.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is full at the largest representable capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new();
    /// buf.push_front(1);
    /// buf.push_front(2);
    ///
    /// assert_eq!(buf.front(), Some(&2));
    /// ```
    pub fn push_front(&mut self, element: T) {
        if self.is_full() {
            let capacity = grown_capacity(self.capacity());
            self.resize(capacity);
        }
        unsafe { self.push_front_expecting_space_available(element) }
    }

    /// Prepends an element to the front, growing a full buffer to whatever
    /// `policy` wants for one more element instead of doubling it.
    pub fn push_front_with_policy(&mut self, element: T, policy: Policy) {
        if self.is_full() {
            self.reserve_for(self.len_after_adding(1), policy);
        }
        unsafe { self.push_front_expecting_space_available(element) }
    }

    /// Appends an element to the back of a fixed-capacity window.
    ///
    /// The buffer never grows: when it is full the front element is
    /// evicted to make room and returned. A zero-capacity buffer hands the
    /// element straight back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(2);
    ///
    /// assert_eq!(buf.push_back_evicting(1), None);
    /// assert_eq!(buf.push_back_evicting(2), None);
    /// assert_eq!(buf.push_back_evicting(3), Some(1));
    ///
    /// assert_eq!(buf, vec![2, 3]);
    /// ```
    pub fn push_back_evicting(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        if !self.is_full() {
            unsafe { self.push_back_expecting_space_available(element) };
            return None;
        }
        // Full, so the slot after the back is the front.
        let head = self.head;
        let evicted = unsafe { ptr::replace(self.buf.slot(head), element) };
        let new_head = self.increment(head);
        self.set_head(new_head);
        Some(evicted)
    }

    /// Prepends an element to the front of a fixed-capacity window,
    /// evicting and returning the back element when full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(2);
    ///
    /// buf.push_front_evicting(1);
    /// buf.push_front_evicting(2);
    /// assert_eq!(buf.push_front_evicting(3), Some(1));
    ///
    /// assert_eq!(buf, vec![3, 2]);
    /// ```
    pub fn push_front_evicting(&mut self, element: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(element);
        }
        if !self.is_full() {
            unsafe { self.push_front_expecting_space_available(element) };
            return None;
        }
        let new_head = self.decrement(self.head);
        let evicted = unsafe { ptr::replace(self.buf.slot(new_head), element) };
        self.set_head(new_head);
        Some(evicted)
    }

    /// Appends an element to the back of the buffer without growing it.
    ///
    /// Returns the element back inside a `CapacityError` if the buffer is
    /// full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(1);
    ///
    /// assert!(buf.try_push_back(1).is_ok());
    ///
    /// let overflow = buf.try_push_back(2);
    /// assert_eq!(overflow.unwrap_err().element, 2);
    /// ```
    pub fn try_push_back(&mut self, element: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            return Err(CapacityError { element });
        }
        unsafe { self.push_back_expecting_space_available(element) };
        Ok(())
    }

    /// Prepends an element to the front of the buffer without growing it.
    ///
    /// Returns the element back inside a `CapacityError` if the buffer is
    /// full.
    pub fn try_push_front(&mut self, element: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            return Err(CapacityError { element });
        }
        unsafe { self.push_front_expecting_space_available(element) };
        Ok(())
    }

    /// Inserts an element at `index` without growing the buffer.
    ///
    /// Returns the element back inside a `CapacityError` if the buffer is
    /// full.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::with_exact_capacity(3);
    /// buf.extend_from_slice(&[1, 3]);
    ///
    /// assert!(buf.try_insert(1, 2).is_ok());
    /// assert!(buf.try_insert(0, 0).is_err());
    /// assert_eq!(buf, vec![1, 2, 3]);
    /// ```
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<(), CapacityError<T>> {
        let len = self.len;
        assert!(index <= len, "insertion index (is {}) should be <= len (is {})", index, len);
        if self.is_full() {
            return Err(CapacityError { element });
        }
        self.insert_with_policy(index, element, Policy::exact());
        Ok(())
    }

    /// Pushes every element of `elements` to the front, one at a time.
    ///
    /// **The elements end up in reverse order**: the last one yielded
    /// becomes the new front. Use [`prepend`](#method.prepend) to keep
    /// their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![4].into();
    /// buf.extend_front(vec![1, 2, 3]);
    ///
    /// assert_eq!(buf, vec![3, 2, 1, 4]);
    /// ```
    pub fn extend_front<I>(&mut self, elements: I)
        where I: IntoIterator<Item = T>
    {
        for element in elements {
            self.push_front(element);
        }
    }

    /// Pushes every element of `elements` to the back of a fixed-capacity
    /// window, dropping whatever gets evicted from the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut window = RingBuffer::with_exact_capacity(3);
    /// window.extend_back_evicting(1..=5);
    ///
    /// assert_eq!(window, vec![3, 4, 5]);
    /// ```
    pub fn extend_back_evicting<I>(&mut self, elements: I)
        where I: IntoIterator<Item = T>
    {
        for element in elements {
            self.push_back_evicting(element);
        }
    }

    /// Pushes every element of `elements` to the front of a fixed-capacity
    /// window, dropping whatever gets evicted from the back. Like
    /// [`extend_front`](#method.extend_front), this reverses their order.
    pub fn extend_front_evicting<I>(&mut self, elements: I)
        where I: IntoIterator<Item = T>
    {
        for element in elements {
            self.push_front_evicting(element);
        }
    }

    /// Appends every element of `elements` to the back, using the default
    /// [`Policy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new();
    /// buf.append(0..5);
    ///
    /// assert_eq!(buf, vec![0, 1, 2, 3, 4]);
    /// assert_eq!(buf.capacity(), 8);
    /// ```
    pub fn append<I>(&mut self, elements: I)
        where I: IntoIterator<Item = T>
    {
        self.append_with_policy(elements, Policy::default())
    }

    /// Appends every element of `elements` to the back, sizing the storage
    /// with `policy`.
    ///
    /// The storage is grown up front from the iterator's lower size hint,
    /// and again whenever it fills up before the iterator is exhausted.
    /// Appending never releases capacity.
    pub fn append_with_policy<I>(&mut self, elements: I, policy: Policy)
        where I: IntoIterator<Item = T>
    {
        let elements = elements.into_iter();
        let (lower, _) = elements.size_hint();
        let wanted = self.len.saturating_add(lower);
        if wanted > self.capacity() {
            self.reserve_for(wanted, policy);
        }

        for element in elements {
            if self.is_full() {
                let capacity = capacity_for(self.capacity(), self.len + 1, policy);
                self.resize(capacity);
            }
            unsafe { self.push_back_expecting_space_available(element) };
        }
    }

    /// Moves every element of `elements` to the back, using the default
    /// [`Policy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1].into();
    /// buf.append_vec(vec![2, 3]);
    ///
    /// assert_eq!(buf, vec![1, 2, 3]);
    /// ```
    pub fn append_vec(&mut self, elements: Vec<T>) {
        self.append_vec_with_policy(elements, Policy::default())
    }

    /// Moves every element of `elements` to the back, sizing the storage
    /// with `policy`.
    ///
    /// The values are moved in with at most two bulk copies. Like
    /// [`append_with_policy`](#method.append_with_policy), this never
    /// releases capacity.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed [`MAX_CAPACITY`].
    pub fn append_vec_with_policy(&mut self, mut elements: Vec<T>, policy: Policy) {
        let added = elements.len();
        let new_len = self.len_after_adding(added);
        if new_len > self.capacity() {
            self.reserve_for(new_len, policy);
        }
        let tail = self.tail;
        unsafe {
            self.buf.move_in(tail, elements.as_ptr(), added);
            elements.set_len(0);
        }
        self.set_len(new_len);
    }

    /// Prepends every element of `elements` to the front, keeping their
    /// order, using the default [`Policy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![4].into();
    /// buf.prepend(vec![1, 2, 3]);
    ///
    /// assert_eq!(buf, vec![1, 2, 3, 4]);
    /// ```
    pub fn prepend<I>(&mut self, elements: I)
        where I: IntoIterator<Item = T>
    {
        self.prepend_with_policy(elements, Policy::default())
    }

    /// Prepends every element of `elements` to the front, keeping their
    /// order, sizing the storage with `policy`.
    ///
    /// The elements are collected first: the new head can only be placed
    /// once their number is known.
    pub fn prepend_with_policy<I>(&mut self, elements: I, policy: Policy)
        where I: IntoIterator<Item = T>
    {
        let incoming: Vec<T> = elements.into_iter().collect();
        if !incoming.is_empty() {
            self.splice_vec(0, 0, incoming, policy);
        }
    }

    /// Clones and appends every element of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new();
    /// buf.extend_from_slice(&[1, 2]);
    /// buf.extend_from_slice(&[3]);
    ///
    /// assert_eq!(buf, vec![1, 2, 3]);
    /// ```
    pub fn extend_from_slice(&mut self, other: &[T])
        where T: Clone
    {
        let additional = other.len();
        let len = self.len;
        self.reserve_for(self.len_after_adding(additional), Policy::default());
        unsafe {
            self.buf.init_from_iter(self.tail, &mut other.iter().cloned(), additional);
        }
        self.set_len(len + additional);
    }

    /// Clones and prepends every element of `other`, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![3].into();
    /// buf.prepend_from_slice(&[1, 2]);
    ///
    /// assert_eq!(buf, vec![1, 2, 3]);
    /// ```
    pub fn prepend_from_slice(&mut self, other: &[T])
        where T: Clone
    {
        let additional = other.len();
        let len = self.len;
        self.reserve_for(self.len_after_adding(additional), Policy::default());
        let new_head = wrap_sub(self.head, additional, self.capacity());
        unsafe {
            self.buf.init_from_iter(new_head, &mut other.iter().cloned(), additional);
        }
        self.set_head(new_head);
        self.set_len(len + additional);
    }

    /// Inserts an element at `index`, shifting the elements after it,
    /// using the default [`Policy`].
    ///
    /// Whichever side of `index` is shorter is moved to make room.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 2, 4].into();
    /// buf.insert(2, 3);
    ///
    /// assert_eq!(buf, vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) {
        self.insert_with_policy(index, element, Policy::default())
    }

    /// Inserts an element at `index`, sizing the storage with `policy`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    pub fn insert_with_policy(&mut self, index: usize, element: T, policy: Policy) {
        let len = self.len;
        assert!(index <= len, "insertion index (is {}) should be <= len (is {})", index, len);
        self.splice_with(index, 0, 1, policy, move |buf, start| unsafe {
            ptr::write(buf.slot(start), element);
            buf.after(start, 1)
        });
    }

    /// Inserts every element of `elements` at `index`, keeping their order,
    /// using the default [`Policy`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec![1, 5].into();
    /// buf.insert_many(1, 2..5);
    ///
    /// assert_eq!(buf, vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_many<I>(&mut self, index: usize, elements: I)
        where I: IntoIterator<Item = T>
    {
        self.insert_many_with_policy(index, elements, Policy::default())
    }

    /// Inserts every element of `elements` at `index`, sizing the storage
    /// with `policy`.
    ///
    /// Inserting at the back streams the elements like
    /// [`append_with_policy`](#method.append_with_policy); anywhere else
    /// they are collected first.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    pub fn insert_many_with_policy<I>(&mut self, index: usize, elements: I, policy: Policy)
        where I: IntoIterator<Item = T>
    {
        let len = self.len;
        assert!(index <= len, "insertion index (is {}) should be <= len (is {})", index, len);
        if index == len {
            self.append_with_policy(elements, policy);
        } else {
            let incoming: Vec<T> = elements.into_iter().collect();
            self.insert_vec(index, incoming, policy);
        }
    }

    /// Clones every element of `other` into the buffer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<_> = vec!['a', 'd'].into();
    /// buf.insert_from_slice(1, &['b', 'c']);
    ///
    /// assert_eq!(buf, vec!['a', 'b', 'c', 'd']);
    /// ```
    pub fn insert_from_slice(&mut self, index: usize, other: &[T])
        where T: Clone
    {
        let len = self.len;
        assert!(index <= len, "insertion index (is {}) should be <= len (is {})", index, len);
        let added = other.len();
        if added == 0 {
            return;
        }
        self.splice_with(index, 0, added, Policy::default(), |buf, start| unsafe {
            buf.init_from_iter(start, &mut other.iter().cloned(), added)
        });
    }

    /// Reserves capacity for at least `additional` more elements, rounding
    /// up the way the default [`Policy`] does.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed the largest representable
    /// capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringvec::RingBuffer;
    ///
    /// let mut buf: RingBuffer<u8> = RingBuffer::new();
    /// buf.reserve(10);
    ///
    /// assert_eq!(buf.capacity(), 16);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let new_len = self.len_after_adding(additional);
        self.reserve_for(new_len, Policy::default());
    }

    pub(crate) fn insert_vec(&mut self, index: usize, incoming: Vec<T>, policy: Policy) {
        if !incoming.is_empty() {
            self.splice_vec(index, 0, incoming, policy);
        }
    }

    fn len_after_adding(&self, additional: usize) -> usize {
        match self.len.checked_add(additional) {
            Some(new_len) if new_len <= MAX_CAPACITY => new_len,
            _ => panic!("capacity overflow"),
        }
    }

    #[inline]
    unsafe fn push_back_expecting_space_available(&mut self, element: T) {
        debug_assert!(!self.is_full());
        let len = self.len;
        ptr::write(self.buf.slot(self.tail), element);
        self.set_len(len + 1);
    }

    #[inline]
    unsafe fn push_front_expecting_space_available(&mut self, element: T) {
        debug_assert!(!self.is_full());
        let len = self.len;
        let new_head = self.decrement(self.head);
        ptr::write(self.buf.slot(new_head), element);
        self.set_head(new_head);
        self.set_len(len + 1);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::vec::Vec;

    use crate::{Policy, RingBuffer};

    struct Bump<'a>(&'a Cell<i32>);

    impl<'a> Drop for Bump<'a> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn push_front_and_back_grow() {
        let mut buf = RingBuffer::with_exact_capacity(0);
        for i in 0..10 {
            buf.push_back(i);
            buf.push_front(-i - 1);
        }
        let expected: Vec<i32> = (-10..10).collect();
        assert_eq!(buf, expected);
        assert_eq!(buf.capacity(), 32);
    }

    #[test]
    fn pushes_grow_by_policy() {
        let mut buf = RingBuffer::with_exact_capacity(3);
        buf.set_head(1);
        buf.append(0..3);
        buf.push_back_with_policy(3, Policy::exact());
        assert_eq!(buf.capacity(), 4);
        buf.push_front_with_policy(-1, Policy::exact());
        assert_eq!(buf.capacity(), 5);
        buf.push_back_with_policy(4, Policy::smart());
        assert_eq!(buf.capacity(), 8);
        // Room left, so nothing moves.
        buf.push_front_with_policy(-2, Policy::exact().shrinking());
        assert_eq!(buf.capacity(), 8);
        let expected: Vec<i32> = (-2..5).collect();
        assert_eq!(buf, expected);

        let mut buf = RingBuffer::with_exact_capacity(0);
        buf.push_front_with_policy(1, Policy::exact());
        assert_eq!(buf.capacity(), 1);
        buf.push_back_with_policy(2, Policy::smart());
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf, vec![1, 2]);
    }

    #[test]
    fn append_vec_wraps_and_grows() {
        let mut buf = RingBuffer::with_exact_capacity(8);
        buf.set_head(5);
        buf.append(0..2);
        buf.append_vec(vec![2, 3, 4, 5]);
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.as_slices(), (&[0, 1, 2][..], &[3, 4, 5][..]));

        buf.append_vec_with_policy((6..9).collect(), Policy::exact());
        assert_eq!(buf.capacity(), 9);
        let expected: Vec<i32> = (0..9).collect();
        assert_eq!(buf, expected);

        // A sparse buffer is not shrunk by appending.
        let mut buf = RingBuffer::with_capacity(256);
        buf.append_vec_with_policy(vec![1], Policy::exact().shrinking());
        assert_eq!(buf.capacity(), 256);
    }

    #[test]
    fn append_vec_drops_each_element_once() {
        let flag = &Cell::new(0);
        {
            let mut buf = RingBuffer::with_exact_capacity(2);
            buf.push_back(Bump(flag));
            buf.append_vec((0..5).map(|_| Bump(flag)).collect());
            assert_eq!(flag.get(), 0);
            assert_eq!(buf.len(), 6);
        }
        assert_eq!(flag.get(), 6);
    }

    #[test]
    fn insert_at_every_position_and_padding() {
        const CAP: usize = 8;
        for len in 0..CAP {
            for padding in 0..CAP {
                for index in 0..=len {
                    let mut buf = RingBuffer::with_exact_capacity(CAP);
                    buf.set_head(padding);
                    buf.append(0..len);
                    buf.insert(index, 99);

                    let mut expected: Vec<usize> = (0..len).collect();
                    expected.insert(index, 99);
                    assert_eq!(buf, expected, "len={} padding={} index={}", len, padding, index);
                    assert_eq!(buf.capacity(), CAP);
                }
            }
        }
    }

    #[test]
    fn insert_many_grows_in_one_transplant() {
        for padding in 0..4 {
            let mut buf = RingBuffer::with_exact_capacity(4);
            buf.set_head(padding);
            buf.append(vec![0, 1, 2]);
            buf.insert_many(1, 10..15);
            assert_eq!(buf, vec![0, 10, 11, 12, 13, 14, 1, 2]);
            assert_eq!(buf.capacity(), 8);
            assert_eq!(buf.head, 0);
        }
    }

    #[test]
    fn insert_many_exact_fit() {
        let mut buf: RingBuffer<i32> = RingBuffer::with_exact_capacity(2);
        buf.append(vec![1, 5]);
        buf.insert_many_with_policy(1, vec![2, 3, 4], Policy::exact());
        assert_eq!(buf, vec![1, 2, 3, 4, 5]);
        assert_eq!(buf.capacity(), 5);
    }

    #[test]
    fn prepend_keeps_order_extend_front_reverses() {
        let mut buf: RingBuffer<i32> = RingBuffer::new();
        buf.push_back(0);
        buf.prepend(vec![1, 2, 3]);
        assert_eq!(buf, vec![1, 2, 3, 0]);
        buf.extend_front(vec![4, 5]);
        assert_eq!(buf, vec![5, 4, 1, 2, 3, 0]);
        buf.prepend_from_slice(&[7, 8]);
        assert_eq!(buf, vec![7, 8, 5, 4, 1, 2, 3, 0]);
    }

    #[test]
    fn append_with_lying_size_hint() {
        // `filter` reports a lower bound of zero.
        let mut buf = RingBuffer::with_exact_capacity(0);
        buf.append((0..20).filter(|x| x % 2 == 0));
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.capacity(), 16);

        let mut exact = RingBuffer::with_exact_capacity(0);
        exact.append_with_policy((0..5).filter(|_| true), Policy::exact());
        assert_eq!(exact, vec![0, 1, 2, 3, 4]);
        assert_eq!(exact.capacity(), 5);
    }

    #[test]
    fn evicting_window_stays_full() {
        for padding in 0..3 {
            let mut buf = RingBuffer::with_exact_capacity(3);
            buf.set_head(padding);
            buf.extend_back_evicting(0..3);
            for i in 3..10 {
                assert_eq!(buf.push_back_evicting(i), Some(i - 3));
                assert_eq!(buf.len(), 3);
            }
            assert_eq!(buf, vec![7, 8, 9]);
            assert_eq!(buf.push_front_evicting(6), Some(9));
            assert_eq!(buf, vec![6, 7, 8]);
            assert_eq!(buf.capacity(), 3);
        }
    }

    #[test]
    fn evicting_with_zero_capacity() {
        let mut buf = RingBuffer::with_exact_capacity(0);
        assert_eq!(buf.push_back_evicting(1), Some(1));
        assert_eq!(buf.push_front_evicting(2), Some(2));
        assert!(buf.is_empty());
    }

    #[test]
    fn evicted_elements_drop_once() {
        let flag = &Cell::new(0);
        {
            let mut buf = RingBuffer::with_exact_capacity(2);
            buf.extend_back_evicting((0..5).map(|_| Bump(flag)));
            assert_eq!(flag.get(), 3);
            buf.extend_front_evicting((0..1).map(|_| Bump(flag)));
            assert_eq!(flag.get(), 4);
        }
        assert_eq!(flag.get(), 6);
    }

    #[test]
    fn try_operations_refuse_to_grow() {
        let mut buf = RingBuffer::with_exact_capacity(2);
        assert!(buf.try_push_back(2).is_ok());
        assert!(buf.try_push_front(1).is_ok());
        assert_eq!(buf.try_push_back(3).unwrap_err().element, 3);
        assert_eq!(buf.try_push_front(0).unwrap_err().element, 0);
        assert_eq!(buf.try_insert(1, 9).unwrap_err().element, 9);
        assert_eq!(buf, vec![1, 2]);
        assert_eq!(buf.capacity(), 2);
    }

    #[test]
    fn transplant_moves_without_dropping() {
        let flag = &Cell::new(0);
        {
            let mut buf = RingBuffer::with_exact_capacity(2);
            buf.set_head(1);
            buf.push_back(Bump(flag));
            buf.push_back(Bump(flag));
            buf.insert_many(1, (0..6).map(|_| Bump(flag)));
            buf.push_front(Bump(flag));
            assert_eq!(buf.len(), 9);
            assert_eq!(flag.get(), 0);
        }
        assert_eq!(flag.get(), 9);
    }

    #[test]
    fn reserve_rounds_up() {
        let mut buf: RingBuffer<u8> = RingBuffer::new();
        buf.reserve(4);
        assert_eq!(buf.capacity(), 4);
        buf.reserve(5);
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn reserve_overflow() {
        let mut buf: RingBuffer<u8> = RingBuffer::new();
        buf.push_back(1);
        buf.reserve(usize::MAX);
    }

    #[test]
    #[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
    fn insert_past_the_end() {
        let mut buf: RingBuffer<u8> = vec![1, 2].into();
        buf.insert(3, 0);
    }
}
