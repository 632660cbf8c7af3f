//! Word-packed marked flags for a single matching pass.
//!
//! One pass owns its `MarkedSet` exclusively, so plain words replace atomics.

const WORD_BITS: usize = u64::BITS as usize;

/// A dense, word-packed set of marked nodes.
#[derive(Debug, Clone)]
pub(crate) struct MarkedSet {
    words: Vec<u64>,
    len: usize,
    marked: usize,
}

impl MarkedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
            marked: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of nodes marked so far.
    #[inline(always)]
    pub(crate) fn marked_count(&self) -> usize {
        self.marked
    }

    #[inline(always)]
    pub(crate) fn is_marked(&self, node: usize) -> bool {
        debug_assert!(node < self.len, "node {node} out of bounds");
        self.words[node / WORD_BITS] & (1u64 << (node % WORD_BITS)) != 0
    }

    /// Returns `true` iff `node` was unmarked before this call; marks it either way.
    #[inline(always)]
    pub(crate) fn try_mark(&mut self, node: usize) -> bool {
        debug_assert!(node < self.len, "node {node} out of bounds");
        let word = &mut self.words[node / WORD_BITS];
        let bit = 1u64 << (node % WORD_BITS);
        let fresh = *word & bit == 0;
        *word |= bit;
        self.marked += usize::from(fresh);
        fresh
    }
}
