//! Capacity policy for `RingBuffer`.
//!
//! Growth rounds up to a power of two, so a run of single insertions
//! reallocates `O(log n)` times. Shrinking is opt-in per call (see
//! [`Policy::keep_capacity`]) and only happens once a large buffer is at
//! most a quarter full, which keeps alternating insert/remove sequences from
//! bouncing between two sizes.

/// The smallest capacity the smart policy ever hands out.
pub const MIN_SMART_CAPACITY: usize = 4;

/// The largest representable capacity.
///
/// Requests beyond this are capacity overflows. For element types larger
/// than a byte the allocation itself overflows much earlier, which is
/// reported the same way.
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Capacities below this are never shrunk.
const SHRINK_THRESHOLD: usize = MIN_SMART_CAPACITY << 4;

/// Switches controlling how an operation sizes the backing storage.
///
/// The default turns both switches on: grow to powers of two and never
/// shrink.
///
/// # Examples
///
/// ```
/// use ringvec::{Policy, RingBuffer};
///
/// let mut buf = RingBuffer::with_exact_capacity(2);
/// buf.append_with_policy(vec![1, 2, 3], Policy::exact());
/// assert_eq!(buf.capacity(), 3);
///
/// buf.append_with_policy(vec![4], Policy::default());
/// assert_eq!(buf.capacity(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Policy {
    /// Round growth up with [`smart_capacity_for`] instead of allocating
    /// exactly what the operation needs.
    pub smart: bool,
    /// Never release capacity, even when the buffer becomes sparse.
    pub keep_capacity: bool,
}

impl Policy {
    /// Power-of-two growth, capacity kept on removal.
    pub const fn smart() -> Policy {
        Policy {
            smart: true,
            keep_capacity: true,
        }
    }

    /// Exact-fit growth, capacity kept on removal.
    pub const fn exact() -> Policy {
        Policy {
            smart: false,
            keep_capacity: true,
        }
    }

    /// The same policy, but allowed to release capacity.
    pub const fn shrinking(self) -> Policy {
        Policy {
            smart: self.smart,
            keep_capacity: false,
        }
    }
}

impl Default for Policy {
    #[inline]
    fn default() -> Policy {
        Policy::smart()
    }
}

/// Returns the capacity the smart policy uses for `count` elements.
///
/// That is [`MIN_SMART_CAPACITY`] for tiny counts, the least power of two
/// not below `count` otherwise, and [`MAX_CAPACITY`] once `count` exceeds
/// half of it.
///
/// # Examples
///
/// ```
/// use ringvec::smart_capacity_for;
///
/// assert_eq!(smart_capacity_for(0), 4);
/// assert_eq!(smart_capacity_for(5), 8);
/// assert_eq!(smart_capacity_for(64), 64);
/// ```
pub fn smart_capacity_for(count: usize) -> usize {
    if count <= 2 {
        MIN_SMART_CAPACITY
    } else if count > MAX_CAPACITY / 2 {
        MAX_CAPACITY
    } else {
        count.next_power_of_two()
    }
}

/// Returns the capacity an operation leaving `new_count` elements should
/// run with, given the current `capacity`.
///
/// A policy that may release storage resets an emptied buffer to
/// [`empty_capacity`].
///
/// # Panics
///
/// Panics if `new_count` exceeds [`MAX_CAPACITY`].
pub fn capacity_for(capacity: usize, new_count: usize, policy: Policy) -> usize {
    assert!(new_count <= MAX_CAPACITY, "capacity overflow");
    if new_count > capacity {
        return if policy.smart {
            smart_capacity_for(new_count)
        } else {
            new_count
        };
    }
    if policy.keep_capacity {
        return capacity;
    }
    if new_count == 0 {
        return empty_capacity(policy);
    }
    if capacity >= SHRINK_THRESHOLD && new_count <= capacity / 4 {
        if policy.smart {
            capacity / 2
        } else {
            new_count
        }
    } else {
        capacity
    }
}

/// Returns the capacity to grow to when a single push finds the buffer
/// full: double it, starting from [`MIN_SMART_CAPACITY`].
///
/// # Panics
///
/// Panics if `capacity` is already [`MAX_CAPACITY`].
pub fn grown_capacity(capacity: usize) -> usize {
    assert!(capacity < MAX_CAPACITY, "capacity overflow");
    if capacity == 0 {
        MIN_SMART_CAPACITY
    } else if capacity > MAX_CAPACITY / 2 {
        MAX_CAPACITY
    } else {
        capacity * 2
    }
}

/// Returns the capacity an emptied buffer resets to when it may release
/// storage.
pub fn empty_capacity(policy: Policy) -> usize {
    if policy.smart {
        MIN_SMART_CAPACITY
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smart_capacity_small_counts() {
        assert_eq!(smart_capacity_for(0), 4);
        assert_eq!(smart_capacity_for(1), 4);
        assert_eq!(smart_capacity_for(2), 4);
        assert_eq!(smart_capacity_for(3), 4);
        assert_eq!(smart_capacity_for(4), 4);
        assert_eq!(smart_capacity_for(5), 8);
        assert_eq!(smart_capacity_for(17), 32);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn smart_capacity_large_counts() {
        assert_eq!(smart_capacity_for(1_000_000_000), 1_073_741_824);
        assert_eq!(smart_capacity_for(MAX_CAPACITY / 2), 1 << 62);
        assert_eq!(smart_capacity_for(MAX_CAPACITY / 2 + 1), MAX_CAPACITY);
        assert_eq!(smart_capacity_for(MAX_CAPACITY), MAX_CAPACITY);
    }

    #[test]
    fn growth() {
        assert_eq!(capacity_for(4, 5, Policy::smart()), 8);
        assert_eq!(capacity_for(4, 5, Policy::exact()), 5);
        assert_eq!(capacity_for(8, 100, Policy::smart()), 128);
        assert_eq!(capacity_for(0, 1, Policy::exact()), 1);
    }

    #[test]
    fn keep_capacity() {
        assert_eq!(capacity_for(1024, 0, Policy::smart()), 1024);
        assert_eq!(capacity_for(1024, 3, Policy::exact()), 1024);
    }

    #[test]
    fn shrink_needs_large_sparse_buffer() {
        let shrinking = Policy::smart().shrinking();
        // Too small to ever shrink.
        assert_eq!(capacity_for(32, 1, shrinking), 32);
        // Large, but more than a quarter full.
        assert_eq!(capacity_for(128, 33, shrinking), 128);
        // Large and at most a quarter full.
        assert_eq!(capacity_for(128, 32, shrinking), 64);

        let exact = Policy::exact().shrinking();
        assert_eq!(capacity_for(128, 32, exact), 32);
        assert_eq!(capacity_for(128, 40, exact), 128);
    }

    #[test]
    fn emptied_buffer_resets() {
        let smart = Policy::smart().shrinking();
        assert_eq!(capacity_for(1024, 0, smart), MIN_SMART_CAPACITY);
        assert_eq!(capacity_for(64, 0, smart), MIN_SMART_CAPACITY);
        assert_eq!(capacity_for(8, 0, smart), MIN_SMART_CAPACITY);
        assert_eq!(capacity_for(0, 0, smart), MIN_SMART_CAPACITY);

        let exact = Policy::exact().shrinking();
        assert_eq!(capacity_for(128, 0, exact), 0);
        assert_eq!(capacity_for(5, 0, exact), 0);

        // Keeping wins over emptiness.
        assert_eq!(capacity_for(1024, 0, Policy::smart()), 1024);
        assert_eq!(capacity_for(5, 0, Policy::exact()), 5);
    }

    #[test]
    fn shrink_then_grow_does_not_oscillate() {
        let shrinking = Policy::smart().shrinking();
        let shrunk = capacity_for(256, 64, shrinking);
        assert_eq!(shrunk, 128);
        // One more element fits without growing back.
        assert_eq!(capacity_for(shrunk, 65, shrinking), 128);
    }

    #[test]
    fn doubling() {
        assert_eq!(grown_capacity(0), 4);
        assert_eq!(grown_capacity(4), 8);
        assert_eq!(grown_capacity(5), 10);
        assert_eq!(grown_capacity(MAX_CAPACITY / 2 + 1), MAX_CAPACITY);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn doubling_at_max() {
        grown_capacity(MAX_CAPACITY);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn count_beyond_max() {
        capacity_for(0, MAX_CAPACITY + 1, Policy::default());
    }

    #[test]
    fn reset_to_empty() {
        assert_eq!(empty_capacity(Policy::smart().shrinking()), MIN_SMART_CAPACITY);
        assert_eq!(empty_capacity(Policy::exact().shrinking()), 0);
    }
}
