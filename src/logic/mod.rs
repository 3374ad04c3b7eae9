mod copy;
mod transfer;

mod insert;
mod remove;
mod replace;

/// Shape of a splice: `removed` elements starting at logical index `at`
/// are replaced by `added` new ones, in a buffer that held `len` elements
/// before the call.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Splice {
    pub at: usize,
    pub removed: usize,
    pub added: usize,
    pub len: usize,
}

impl Splice {
    #[inline]
    pub fn suffix(&self) -> usize {
        self.len - self.at - self.removed
    }

    #[inline]
    pub fn new_len(&self) -> usize {
        self.len - self.removed + self.added
    }
}
