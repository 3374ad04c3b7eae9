//! Wrap-aware segment transfers.
//!
//! Each primitive works on the physical run `[start, start + len)`, which
//! may cross the end of the block. The run is split into at most two
//! contiguous pieces, `[start, cap)` and `[0, rest)`, and every primitive
//! returns the physical index just past the run so calls can be chained.

use core::ops::Range;
use core::ptr;
use core::slice;

use crate::raw::RawStorage;
use crate::utils::wrap_add;

impl<T> RawStorage<T> {
    /// Splits the run `[start, start + len)` at the wrap boundary.
    #[inline]
    pub(crate) fn segments(&self, start: usize, len: usize) -> (Range<usize>, Range<usize>) {
        let cap = self.capacity();
        debug_assert!(len <= cap, "segments start={} len={} cap={}", start, len, cap);
        if len == 0 {
            return (start..start, 0..0);
        }
        debug_assert!(start < cap, "segments start={} len={} cap={}", start, len, cap);
        let pre_wrap_len = cap - start;
        if len <= pre_wrap_len {
            (start..start + len, 0..0)
        } else {
            (start..cap, 0..len - pre_wrap_len)
        }
    }

    /// The physical index following the run `[start, start + len)`.
    #[inline]
    pub(crate) fn after(&self, start: usize, len: usize) -> usize {
        wrap_add(start, len, self.capacity())
    }

    /// Moves `len` values from contiguous memory at `src` into the run
    /// starting at `start`.
    ///
    /// The source must not overlap this block; its values are logically
    /// moved out.
    pub(crate) unsafe fn move_in(&mut self, start: usize, src: *const T, len: usize) -> usize {
        let (first, second) = self.segments(start, len);
        ptr::copy_nonoverlapping(src, self.ptr().add(first.start), first.len());
        ptr::copy_nonoverlapping(src.add(first.len()), self.ptr(), second.len());
        self.after(start, len)
    }

    /// Moves the run starting at `start` out into contiguous memory at
    /// `dst`, leaving those slots uninitialized.
    pub(crate) unsafe fn move_out(&self, start: usize, dst: *mut T, len: usize) -> usize {
        let (first, second) = self.segments(start, len);
        ptr::copy_nonoverlapping(self.ptr().add(first.start), dst, first.len());
        ptr::copy_nonoverlapping(self.ptr(), dst.add(first.len()), second.len());
        self.after(start, len)
    }

    /// Moves the run `[src_start, src_start + len)` of another block into
    /// this one at `start`. Both runs may wrap, at different places.
    pub(crate) unsafe fn init_from(&mut self,
                                   start: usize,
                                   src: &RawStorage<T>,
                                   src_start: usize,
                                   len: usize)
                                   -> usize {
        let (first, second) = src.segments(src_start, len);
        let next = self.move_in(start, src.ptr().add(first.start), first.len());
        self.move_in(next, src.ptr(), second.len())
    }

    /// Writes exactly `len` values pulled from `source` into uninitialized
    /// slots starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `source` runs out early. Values already written are then
    /// leaked, not dropped.
    pub(crate) unsafe fn init_from_iter<I>(&mut self, start: usize, source: &mut I, len: usize) -> usize
        where I: Iterator<Item = T>
    {
        let (first, second) = self.segments(start, len);
        for index in first.chain(second) {
            match source.next() {
                Some(element) => ptr::write(self.ptr().add(index), element),
                None => panic!("source yielded fewer elements than it reported"),
            }
        }
        self.after(start, len)
    }

    /// Overwrites `len` live slots starting at `start` with values pulled
    /// from `source`, dropping the old values.
    ///
    /// # Panics
    ///
    /// Panics if `source` runs out early; slots not yet reached keep their
    /// old values.
    pub(crate) unsafe fn assign_from_iter<I>(&mut self, start: usize, source: &mut I, len: usize) -> usize
        where I: Iterator<Item = T>
    {
        let (first, second) = self.segments(start, len);
        for index in first.chain(second) {
            match source.next() {
                Some(element) => *self.ptr().add(index) = element,
                None => panic!("source yielded fewer elements than it reported"),
            }
        }
        self.after(start, len)
    }

    /// Drops the `len` live values starting at `start`.
    pub(crate) unsafe fn deinit(&mut self, start: usize, len: usize) -> usize {
        let (first, second) = self.segments(start, len);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr().add(first.start), first.len()));
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr(), second.len()));
        self.after(start, len)
    }

    /// Borrows the live run starting at `start` as two slices, in order.
    #[inline]
    pub(crate) unsafe fn slices(&self, start: usize, len: usize) -> (&[T], &[T]) {
        let (first, second) = self.segments(start, len);
        (slice::from_raw_parts(self.ptr().add(first.start), first.len()),
         slice::from_raw_parts(self.ptr(), second.len()))
    }

    /// Mutably borrows the live run starting at `start` as two slices.
    #[inline]
    pub(crate) unsafe fn slices_mut(&mut self, start: usize, len: usize) -> (&mut [T], &mut [T]) {
        let (first, second) = self.segments(start, len);
        (slice::from_raw_parts_mut(self.ptr().add(first.start), first.len()),
         slice::from_raw_parts_mut(self.ptr(), second.len()))
    }
}
