/// Fixed-width bit set over terminal indices.
///
/// One bit past the last terminal is reserved for the propagation marker
/// used while computing LALR lookaheads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TerminalSet {
    words: Vec<u64>,
}

impl TerminalSet {
    pub(crate) fn with_width(width: usize) -> Self {
        TerminalSet {
            words: vec![0; width.div_ceil(64)],
        }
    }

    pub(crate) fn single(width: usize, bit: usize) -> Self {
        let mut set = TerminalSet::with_width(width);
        set.insert(bit);
        set
    }

    pub(crate) fn insert(&mut self, bit: usize) -> bool {
        let (word, mask) = (bit / 64, 1u64 << (bit % 64));
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    pub(crate) fn remove(&mut self, bit: usize) {
        self.words[bit / 64] &= !(1u64 << (bit % 64));
    }

    pub(crate) fn contains(&self, bit: usize) -> bool {
        self.words[bit / 64] & (1u64 << (bit % 64)) != 0
    }

    /// Add every member of `other`; true if anything was new.
    pub(crate) fn union_with(&mut self, other: &TerminalSet) -> bool {
        let mut changed = false;
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            let merged = *mine | *theirs;
            changed |= merged != *mine;
            *mine = merged;
        }
        changed
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Members in ascending order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| index * 64 + bit)
        })
    }
}
