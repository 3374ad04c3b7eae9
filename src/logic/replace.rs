//! Splicing: the engine behind insertion, removal and replacement.
//!
//! Every splice first drops the removed run, then either
//!
//! * rebuilds the buffer in a fresh block laid out as prefix, new elements,
//!   suffix (a *transplant*), when the capacity policy asks for a different
//!   capacity, or
//! * slides the shorter of prefix and suffix in place to open or close the
//!   gap, and writes the new elements into it.

use alloc::vec::Vec;

use crate::capacity::{capacity_for, Policy, MAX_CAPACITY};
use crate::logic::Splice;
use crate::raw::RawStorage;
use crate::utils::wrap_add;
use crate::{RangeArgument, RingBuffer};

impl<T> RingBuffer<T> {
    /// Replaces the elements in `range` with the contents of `replacement`,
    /// using the default [`Policy`].
    ///
    /// An empty range inserts at its position; an empty replacement
    /// removes the range.
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
    /// let mut buf: RingBuffer<i32> = RingBuffer::new();
    /// buf.replace_range(0..0, vec![1, 2, 3]);
    /// assert_eq!(buf, vec![1, 2, 3]);
    ///
    /// buf.replace_range(1..2, vec![7, 8, 9]);
    /// assert_eq!(buf, vec![1, 7, 8, 9, 3]);
    ///
    /// buf.replace_range(..4, None);
    /// assert_eq!(buf, vec![3]);
    /// ```
    pub fn replace_range<R, I>(&mut self, range: R, replacement: I)
        where R: RangeArgument<usize>,
              I: IntoIterator<Item = T>
    {
        self.replace_range_with_policy(range, replacement, Policy::default())
    }

    /// Replaces the elements in `range` with the contents of
    /// `replacement`, sizing the storage with `policy`.
    ///
    /// The replacement is collected first, since its length decides the
    /// layout. A same-length replacement that keeps the capacity overwrites
    /// the old elements in place.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or ends past the length.
    pub fn replace_range_with_policy<R, I>(&mut self, range: R, replacement: I, policy: Policy)
        where R: RangeArgument<usize>,
              I: IntoIterator<Item = T>
    {
        let (start, end) = self.range_bounds(&range);
        let mut incoming: Vec<T> = replacement.into_iter().collect();
        let removed = end - start;
        let added = incoming.len();

        if removed == 0 {
            if added > 0 {
                self.insert_vec(start, incoming, policy);
            }
            return;
        }
        if added == 0 {
            self.remove_range_with_policy(start..end, policy);
            return;
        }
        if added == removed && capacity_for(self.capacity(), self.len, policy) == self.capacity() {
            let first = self.physical(start);
            unsafe {
                self.buf.assign_from_iter(first, &mut incoming.drain(..), added);
            }
            return;
        }
        self.splice_vec(start, removed, incoming, policy);
    }

    /// Resolves a range argument against the current length.
    pub(crate) fn range_bounds<R>(&self, range: &R) -> (usize, usize)
        where R: RangeArgument<usize>
    {
        let len = self.len;
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "range start (is {}) should be <= range end (is {})", start, end);
        assert!(end <= len, "range end (is {}) should be <= len (is {})", end, len);
        (start, end)
    }

    /// Splices the owned `incoming` elements in place of
    /// `[at, at + removed)`.
    pub(crate) fn splice_vec(&mut self, at: usize, removed: usize, mut incoming: Vec<T>, policy: Policy) {
        let added = incoming.len();
        self.splice_with(at, removed, added, policy, move |buf, start| unsafe {
            let next = buf.move_in(start, incoming.as_ptr(), added);
            incoming.set_len(0);
            next
        });
    }

    /// Drops `[at, at + removed)` and makes room for `added` elements at
    /// `at`, which `write` must initialize.
    ///
    /// `write` receives the storage the elements belong in and the physical
    /// index of the first new slot, and returns the index after the last.
    pub(crate) fn splice_with<F>(&mut self, at: usize, removed: usize, added: usize, policy: Policy, write: F)
        where F: FnOnce(&mut RawStorage<T>, usize) -> usize
    {
        let len = self.len;
        assert!(at <= len, "splice index (is {}) should be <= len (is {})", at, len);
        assert!(removed <= len - at,
                "splice end (is {}) should be <= len (is {})",
                at.saturating_add(removed),
                len);
        match (len - removed).checked_add(added) {
            Some(new_len) if new_len <= MAX_CAPACITY => {}
            _ => panic!("capacity overflow"),
        }

        let splice = Splice { at, removed, added, len };
        let target = self.target_storage(splice.new_len(), policy);
        let start = self.physical(at);
        // Leak rather than double-drop if a destructor or `write` unwinds.
        self.set_len(0);
        unsafe {
            self.buf.deinit(start, removed);
            self.relayout(splice, target, write);
        }
    }

    /// A fresh block if `policy` wants a different capacity for `new_len`
    /// elements.
    pub(crate) fn target_storage(&self, new_len: usize, policy: Policy) -> Option<RawStorage<T>> {
        let capacity = capacity_for(self.capacity(), new_len, policy);
        if capacity == self.capacity() {
            None
        } else {
            Some(RawStorage::allocate(capacity))
        }
    }

    /// Finishes a splice whose removed slots are already dead.
    ///
    /// Expects `self.len` parked at zero; sets the final length.
    pub(crate) unsafe fn relayout<F>(&mut self, splice: Splice, target: Option<RawStorage<T>>, write: F)
        where F: FnOnce(&mut RawStorage<T>, usize) -> usize
    {
        debug_assert_eq!(self.len, 0);
        match target {
            Some(storage) => self.transplant(storage, splice, write),
            None => {
                let gap = self.open_gap(splice);
                let next = write(&mut self.buf, gap);
                debug_assert_eq!(next, self.buf.after(gap, splice.added));
                self.set_len(splice.new_len());
            }
        }
    }

    /// Moves the contents into a fresh block of exactly `capacity` slots,
    /// starting at slot 0.
    pub(crate) fn resize(&mut self, capacity: usize) {
        let len = self.len;
        debug_assert!(capacity >= len);
        let storage = RawStorage::allocate(capacity);
        self.set_len(0);
        let splice = Splice {
            at: len,
            removed: 0,
            added: 0,
            len,
        };
        unsafe { self.transplant(storage, splice, |_, next| next) }
    }

    /// Resizes to whatever `policy` wants for `new_len` elements.
    pub(crate) fn reserve_for(&mut self, new_len: usize, policy: Policy) {
        let capacity = capacity_for(self.capacity(), new_len, policy);
        if capacity != self.capacity() {
            self.resize(capacity);
        }
    }

    /// Populates `storage` as prefix, new elements, suffix and adopts it.
    unsafe fn transplant<F>(&mut self, mut storage: RawStorage<T>, splice: Splice, write: F)
        where F: FnOnce(&mut RawStorage<T>, usize) -> usize
    {
        let Splice { at, removed, len, .. } = splice;
        let head = self.head;
        let old_capacity = self.capacity();
        let new_len = splice.new_len();
        debug_assert!(new_len <= storage.capacity());

        log::trace!("transplant: capacity {} -> {}, len {} -> {}",
                    old_capacity,
                    storage.capacity(),
                    len,
                    new_len);
        if storage.capacity() < old_capacity {
            log::debug!("releasing ring capacity {} -> {} at len {}",
                        old_capacity,
                        storage.capacity(),
                        new_len);
        }

        let next = storage.init_from(0, &self.buf, head, at);
        let next = write(&mut storage, next);
        storage.init_from(next,
                          &self.buf,
                          wrap_add(head, at + removed, old_capacity),
                          splice.suffix());

        // Nothing live is left in the old block; dropping it only frees it.
        self.buf = storage;
        self.set_head(0);
        self.set_len(new_len);
    }

    /// Slides whichever flank is shorter so that exactly `added` free slots
    /// sit at logical position `at`. Returns the first of them.
    unsafe fn open_gap(&mut self, splice: Splice) -> usize {
        let Splice { at, removed, added, .. } = splice;
        let cap = self.capacity();
        let head = self.head;
        let suffix = splice.suffix();

        if at < suffix {
            // Prefix moves, suffix stays (removed: x, two added):
            //
            //        H     x
            //   [. . o o o x o o o o . .]
            //      H       . .
            //   [. o o o . . o o o o . .]
            //    M M M
            let new_head = self.offset(head, removed as isize - added as isize);
            self.buf.wrap_copy(new_head, head, at);
            self.set_head(new_head);
            self.buf.after(new_head, at)
        } else {
            // Suffix moves, prefix stays:
            //
            //        H         x
            //   [. . o o o o o x o o . .]
            //        H           . .
            //   [. . o o o o o . . o o .]
            //                      M M
            let src = wrap_add(head, at + removed, cap);
            let dst = wrap_add(head, at + added, cap);
            self.buf.wrap_copy(dst, src, suffix);
            self.buf.after(head, at)
        }
    }
}
