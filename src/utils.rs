//! Physical index arithmetic.
//!
//! Every function here assumes `index < capacity`, except that a
//! zero-capacity ring only ever uses index 0.

use crate::RingBuffer;

#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity, "wrap_add index={} addend={} cap={}", index, addend, capacity);
    debug_assert!(index < capacity || index == 0, "wrap_add index={} cap={}", index, capacity);
    // Both operands are at most `isize::MAX`, so the sum cannot overflow.
    let sum = index + addend;
    if sum >= capacity {
        sum - capacity
    } else {
        sum
    }
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(subtrahend <= capacity, "wrap_sub index={} sub={} cap={}", index, subtrahend, capacity);
    debug_assert!(index < capacity || index == 0, "wrap_sub index={} cap={}", index, capacity);
    if index >= subtrahend {
        index - subtrahend
    } else {
        index + capacity - subtrahend
    }
}

/// Moves `index` by an arbitrary signed `delta`, normalized into
/// `[0, capacity)`.
#[inline]
pub fn offset(index: usize, delta: isize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    let step = delta.unsigned_abs() % capacity;
    if delta < 0 {
        wrap_sub(index, step, capacity)
    } else {
        wrap_add(index, step, capacity)
    }
}

impl<T> RingBuffer<T> {
    /// Physical slot of `logical`. `logical == len` names the slot one past
    /// the back.
    #[inline]
    pub(crate) fn physical(&self, logical: usize) -> usize {
        debug_assert!(logical <= self.len, "physical logical={} len={}", logical, self.len);
        wrap_add(self.head, logical, self.capacity())
    }

    #[inline]
    pub(crate) fn increment(&self, index: usize) -> usize {
        wrap_add(index, 1, self.capacity())
    }

    #[inline]
    pub(crate) fn decrement(&self, index: usize) -> usize {
        wrap_sub(index, 1, self.capacity())
    }

    #[inline]
    pub(crate) fn offset(&self, index: usize, delta: isize) -> usize {
        offset(index, delta, self.capacity())
    }

    /// Whether the live range runs past the end of the block.
    #[inline]
    pub(crate) fn is_wrapped(&self) -> bool {
        self.head + self.len > self.capacity()
    }

    /// Sets the live length and recomputes `tail` from `head`.
    #[inline]
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
        self.tail = wrap_add(self.head, len, self.capacity());
    }

    #[inline]
    pub(crate) fn set_head(&mut self, head: usize) {
        debug_assert!(head < self.capacity() || head == 0);
        self.head = head;
        self.tail = wrap_add(head, self.len, self.capacity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_sub_wrap() {
        assert_eq!(wrap_add(6, 1, 8), 7);
        assert_eq!(wrap_add(7, 1, 8), 0);
        assert_eq!(wrap_add(5, 8, 8), 5);
        assert_eq!(wrap_sub(0, 1, 8), 7);
        assert_eq!(wrap_sub(3, 3, 8), 0);
        assert_eq!(wrap_sub(3, 8, 8), 3);
        assert_eq!(wrap_add(0, 0, 0), 0);
        assert_eq!(wrap_sub(0, 0, 0), 0);
    }

    #[test]
    fn offset_normalizes_any_delta() {
        assert_eq!(offset(2, -3, 8), 7);
        assert_eq!(offset(2, -19, 8), 7);
        assert_eq!(offset(2, 19, 8), 5);
        assert_eq!(offset(2, isize::MIN, 8), 2);
        assert_eq!(offset(2, isize::MAX, 8), 1);
        assert_eq!(offset(0, -5, 0), 0);
    }

    #[test]
    fn ring_helpers() {
        let mut buf: RingBuffer<u8> = RingBuffer::with_exact_capacity(5);
        buf.set_head(4);
        assert_eq!(buf.increment(4), 0);
        assert_eq!(buf.decrement(0), 4);
        assert_eq!(buf.offset(4, -6), 3);
        assert!(!buf.is_wrapped());
        buf.set_len(2);
        assert_eq!(buf.tail, 1);
        assert_eq!(buf.physical(1), 0);
        assert!(buf.is_wrapped());
        // Don't drop the fake elements.
        buf.set_len(0);
    }
}
