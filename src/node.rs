/// Fan-out of every trie node: one slot per possible key byte.
pub(crate) const FANOUT: usize = 256;

/// The role a node slot currently plays.
///
/// `Val` and `Free` carry an entry-pool index, `Tab` a node-pool index. A
/// slot whose pair is removed keeps the index in `Free`, which is what lets
/// a later insertion through the same byte reuse the pair's storage in
/// place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Never been populated.
    Nil,
    /// Held a value once; the payload pair is vacated and reusable.
    Free(usize),
    /// Terminal: a stored key/value pair lives at the payload index.
    Val(usize),
    /// Interior: descend into the payload node.
    Tab(usize),
}

/// A single trie node: 256 tagged slots plus a count of the slots currently
/// tagged [`Slot::Val`].
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) slots: [Slot; FANOUT],
    pub(crate) refs: usize,
}

impl Node {
    pub(crate) fn new() -> Self {
        Node {
            slots: [Slot::Nil; FANOUT],
            refs: 0,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
