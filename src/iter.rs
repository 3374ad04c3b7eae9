//! Iterators over a `RingBuffer`.
//!
//! The borrowing iterators walk the two slices of the live range in turn,
//! so each step is a plain slice-iterator step.

use core::iter::FusedIterator;
use core::slice;

use crate::RingBuffer;

/// `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(front: &'a [T], back: &'a [T]) -> Self {
        Iter {
            front: front.iter(),
            back: back.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        match self.front.next() {
            Some(element) => Some(element),
            None => self.back.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn fold<Acc, F>(self, init: Acc, mut f: F) -> Acc
        where F: FnMut(Acc, Self::Item) -> Acc
    {
        let acc = self.front.fold(init, &mut f);
        self.back.fold(acc, &mut f)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        match self.back.next_back() {
            Some(element) => Some(element),
            None => self.front.next_back(),
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// `RingBuffer` mutable iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(front: &'a mut [T], back: &'a mut [T]) -> Self {
        IterMut {
            front: front.iter_mut(),
            back: back.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match self.front.next() {
            Some(element) => Some(element),
            None => self.back.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        match self.back.next_back() {
            Some(element) => Some(element),
            None => self.front.next_back(),
        }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    #[inline]
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// By-value `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: RingBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(inner: RingBuffer<T>) -> Self {
        IntoIter { inner }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use crate::RingBuffer;

    fn wrapped() -> RingBuffer<i32> {
        let mut buf = RingBuffer::with_exact_capacity(6);
        buf.set_head(4);
        buf.append(1..=5);
        assert!(buf.is_wrapped());
        buf
    }

    #[test]
    fn iter_crosses_the_wrap() {
        let buf = wrapped();
        let forward: Vec<i32> = buf.iter().cloned().collect();
        assert_eq!(forward, [1, 2, 3, 4, 5]);
        let backward: Vec<i32> = buf.iter().rev().cloned().collect();
        assert_eq!(backward, [5, 4, 3, 2, 1]);
        assert_eq!(buf.iter().len(), 5);
        assert_eq!(buf.iter().fold(0, |acc, x| acc * 10 + x), 12345);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let buf = wrapped();
        let mut iter = buf.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_mut_writes_through() {
        let mut buf = wrapped();
        for x in buf.iter_mut() {
            *x *= 2;
        }
        assert_eq!(buf, vec![2, 4, 6, 8, 10]);
        if let Some(x) = buf.iter_mut().next_back() {
            *x = 0;
        }
        assert_eq!(buf.back(), Some(&0));
    }

    #[test]
    fn into_iter_from_both_ends() {
        let mut iter = wrapped().into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(5));
        assert_eq!(iter.len(), 3);
        let rest: Vec<i32> = iter.collect();
        assert_eq!(rest, [2, 3, 4]);
    }

    #[test]
    fn into_iter_drops_the_remainder() {
        use std::rc::Rc;

        let shared = Rc::new(());
        let mut buf = RingBuffer::new();
        for _ in 0..6 {
            buf.push_front(shared.clone());
        }
        let mut iter = buf.into_iter();
        iter.next();
        assert_eq!(Rc::strong_count(&shared), 6);
        drop(iter);
        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
