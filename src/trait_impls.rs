use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use crate::iter::{IntoIter, Iter, IterMut};
use crate::RingBuffer;

impl<T> Clone for RingBuffer<T>
    where T: Clone
{
    /// Clones the elements into a buffer of the same capacity.
    fn clone(&self) -> RingBuffer<T> {
        let mut clone = RingBuffer::with_exact_capacity(self.capacity());
        clone.append(self.iter().cloned());
        clone
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        // `RawStorage` frees the block afterwards.
        self.clear();
    }
}

impl<T> Default for RingBuffer<T> {
    #[inline]
    fn default() -> RingBuffer<T> {
        RingBuffer::new()
    }
}

impl<T, U> PartialEq<RingBuffer<U>> for RingBuffer<T>
    where T: PartialEq<U>
{
    fn eq(&self, other: &RingBuffer<U>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (sa, sb) = self.as_slices();
        let (oa, ob) = other.as_slices();
        if sa.len() == oa.len() {
            sa == oa && sb == ob
        } else if sa.len() < oa.len() {
            // Always divisible in three sections, for example:
            // self:  [a b c|d e f]
            // other: [0 1 2 3|4 5]
            // front = 3, mid = 1,
            // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
            let front = sa.len();
            let mid = oa.len() - front;

            let (oa_front, oa_mid) = oa.split_at(front);
            let (sb_mid, sb_back) = sb.split_at(mid);
            debug_assert_eq!(sa.len(), oa_front.len());
            debug_assert_eq!(sb_mid.len(), oa_mid.len());
            debug_assert_eq!(sb_back.len(), ob.len());
            sa == oa_front && sb_mid == oa_mid && sb_back == ob
        } else {
            let front = oa.len();
            let mid = sa.len() - front;

            let (sa_front, sa_mid) = sa.split_at(front);
            let (ob_mid, ob_back) = ob.split_at(mid);
            debug_assert_eq!(sa_front.len(), oa.len());
            debug_assert_eq!(sa_mid.len(), ob_mid.len());
            debug_assert_eq!(sb.len(), ob_back.len());
            sa_front == oa && sa_mid == ob_mid && sb == ob_back
        }
    }
}

impl<T, U> PartialEq<[U]> for RingBuffer<T>
    where T: PartialEq<U>
{
    fn eq(&self, other: &[U]) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (front, back) = self.as_slices();
        let (other_front, other_back) = other.split_at(front.len());
        front == other_front && back == other_back
    }
}

impl<'a, T, U> PartialEq<&'a [U]> for RingBuffer<T>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &&'a [U]) -> bool {
        *self == **other
    }
}

impl<T, U> PartialEq<Vec<U>> for RingBuffer<T>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == other[..]
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for RingBuffer<T>
    where T: PartialEq<U>
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<T> Eq for RingBuffer<T> where T: Eq {}

impl<T> PartialOrd for RingBuffer<T>
    where T: PartialOrd
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T> Ord for RingBuffer<T>
    where T: Ord
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> Hash for RingBuffer<T>
    where T: Hash
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        let (a, b) = self.as_slices();
        Hash::hash_slice(a, state);
        Hash::hash_slice(b, state);
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(element) => element,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T> IndexMut<usize> for RingBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(element) => element,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T> iter::FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut buf = RingBuffer::with_capacity(iter.size_hint().0);
        buf.append(iter);
        buf
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Extend the `RingBuffer` with an iterator, growing as needed.
impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append(iter);
    }
}

impl<'a, T> Extend<&'a T> for RingBuffer<T>
    where T: 'a + Copy
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.append(iter.into_iter().cloned());
    }
}

impl<T> From<Vec<T>> for RingBuffer<T> {
    /// Moves the elements of `vec` into a buffer of smart capacity.
    fn from(mut vec: Vec<T>) -> RingBuffer<T> {
        let len = vec.len();
        let mut buf = RingBuffer::with_capacity(len);
        unsafe {
            buf.buf.move_in(0, vec.as_ptr(), len);
            vec.set_len(0);
        }
        buf.set_len(len);
        buf
    }
}

impl<T> From<RingBuffer<T>> for Vec<T> {
    fn from(mut ring: RingBuffer<T>) -> Vec<T> {
        let head = ring.head;
        let len = ring.len();
        let mut vec = Vec::with_capacity(len);
        ring.set_len(0);
        unsafe {
            ring.buf.move_out(head, vec.as_mut_ptr(), len);
            vec.set_len(len);
        }
        vec
    }
}

impl<T> fmt::Debug for RingBuffer<T>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
