use core::fmt;
#[cfg(feature = "std")]
use std::error::Error;

/// Error value indicating insufficient capacity
///
/// Returned by the non-growing `try_*` operations of `RingBuffer` when the
/// buffer is full. The rejected element is handed back.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub struct CapacityError<T = ()> {
    /// The element that caused the error.
    pub element: T,
}

impl<T> CapacityError<T> {
    /// Extracts the rejected element.
    pub fn into_element(self) -> T {
        self.element
    }
}

const CAPERROR: &str = "insufficient capacity";

#[cfg(feature = "std")]
impl<T: fmt::Debug> Error for CapacityError<T> {}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", CAPERROR)
    }
}

impl<T: fmt::Debug> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CapacityError({}, rejected {:?})", CAPERROR, self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RingBuffer;

    #[test]
    fn reports_the_rejected_element() {
        let mut buf = RingBuffer::with_exact_capacity(0);
        let err = buf.try_push_back(vec![1, 2, 3]).unwrap_err();
        assert_eq!(err.to_string(), "insufficient capacity");
        assert_eq!(format!("{:?}", err), "CapacityError(insufficient capacity, rejected [1, 2, 3])");
        assert_eq!(err.into_element(), [1, 2, 3]);
    }

    #[test]
    #[cfg(feature = "std")]
    fn is_a_std_error() {
        let err: Box<dyn Error> = Box::new(CapacityError { element: 7u8 });
        assert_eq!(err.to_string(), "insufficient capacity");
    }
}
