use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::key::FixedKey;
use crate::node::{Node, Slot, FANOUT};
use crate::pool::Pool;

/// Growth step (and initial capacity) for the node pool.
const NODE_GROWTH: usize = 16;

/// A stored key/value pair.
///
/// `refs` counts the trie slots pointing at this record; by construction it
/// is 0 (vacated) or 1 (live).
#[derive(Clone)]
pub(crate) struct Pair<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) refs: u64,
}

/// A dictionary from fixed-width keys to values, backed by a byte-indexed
/// radix trie.
///
/// Every trie level consumes one byte of the key and fans out into 256
/// slots, so a lookup costs at most [`FixedKey::WIDTH`] slot inspections
/// regardless of how many pairs are stored. Pairs and nodes live in two
/// index-stable pools owned by the dictionary; nodes reference each other
/// and the pairs by pool index, which keeps deep copies a plain
/// pool-for-pool clone.
///
/// Keys compare bytewise over their fixed width (see [`FixedKey`]); values
/// only need [`Default`] for the inserting operations and [`Clone`] for
/// deep copies.
///
/// # Examples
///
/// ```
/// use bytedict::ByteDict;
///
/// let mut map: ByteDict<u64, i32> = ByteDict::new();
///
/// // Insert returns a reference to the (default-initialized) value.
/// *map.insert(7) = 42;
/// *map.insert(19) = -3;
/// assert_eq!(map.len(), 2);
///
/// // Lookups are nullable; indexing asserts presence.
/// assert_eq!(map.get(7), Some(&42));
/// assert_eq!(map.get(8), None);
/// assert_eq!(map[19], -3);
///
/// // Removal hands the value back.
/// assert_eq!(map.remove(7), Some(42));
/// assert_eq!(map.remove(7), None);
/// ```
pub struct ByteDict<K, V> {
    pub(crate) entries: Pool<Pair<K, V>>,
    pub(crate) nodes: Pool<Node>,
    pub(crate) len: usize,
}

impl<K: FixedKey, V> ByteDict<K, V> {
    /// Creates an empty dictionary with the root node installed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let map: ByteDict<u64, i32> = ByteDict::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.node_count(), 1);
    /// ```
    pub fn new() -> Self {
        let mut entries = Pool::with_growth(FANOUT);
        entries.reserve(FANOUT);
        let mut nodes = Pool::with_growth(NODE_GROWTH);
        nodes.reserve(NODE_GROWTH);
        nodes.add(Node::new());
        ByteDict {
            entries,
            nodes,
            len: 0,
        }
    }

    /// Returns the number of live pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the dictionary holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    /// *map.insert(1) = 10;
    ///
    /// assert_eq!(map.get(1), Some(&10));
    /// assert_eq!(map.get(2), None);
    /// ```
    pub fn get(&self, key: K) -> Option<&V> {
        self.find(key).map(|e| &self.entries[e].value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    /// *map.insert(1) = 10;
    ///
    /// if let Some(value) = map.get_mut(1) {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get(1), Some(&11));
    /// ```
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        match self.find(key) {
            Some(e) => Some(&mut self.entries[e].value),
            None => None,
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a mutable reference to the value stored under `key`, creating
    /// the pair on demand.
    ///
    /// A fresh pair starts with `V::default()`; assign through the returned
    /// reference to store something else. If the key is already present the
    /// stored value is returned untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    ///
    /// *map.insert(1) = 10;
    /// assert_eq!(map.get(1), Some(&10));
    ///
    /// // Re-inserting an existing key hands back the stored value.
    /// *map.insert(1) += 5;
    /// assert_eq!(map.get(1), Some(&15));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let e = self.find_or_alloc(key);
        &mut self.entries[e].value
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// Removal never shrinks the trie: the vacated slot remembers the pair's
    /// storage so a later insertion through the same byte path reuses it
    /// instead of allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    /// *map.insert(1) = 10;
    ///
    /// assert_eq!(map.remove(1), Some(10));
    /// assert_eq!(map.remove(1), None);
    /// ```
    pub fn remove(&mut self, key: K) -> Option<V>
    where
        V: Default,
    {
        let mut node = 0;
        let mut level = 0;
        loop {
            let b = key.byte_at(level) as usize;
            match self.nodes[node].slots[b] {
                Slot::Tab(child) => {
                    node = child;
                    level += 1;
                }
                Slot::Val(e) if key.eq_bytes(&self.entries[e].key) => {
                    // Leave default storage behind so the vacated pair can be
                    // handed out as fresh on reuse.
                    let value = mem::take(&mut self.entries[e].value);
                    self.entries[e].refs = 0;
                    self.nodes[node].slots[b] = Slot::Free(e);
                    self.nodes[node].refs -= 1;
                    self.len -= 1;
                    return Some(value);
                }
                _ => return None,
            }
        }
    }

    /// Returns a view of the slot `key` resolves to, occupied or vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    ///
    /// map.entry(1).or_insert(10);
    /// map.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(1), Some(&11));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        match self.find(key) {
            Some(idx) => Entry::Occupied(OccupiedEntry {
                dict: self,
                key,
                pair_idx: idx,
            }),
            None => Entry::Vacant(VacantEntry { dict: self, key }),
        }
    }

    /// Number of trie nodes currently allocated, the root included.
    ///
    /// Nodes are only ever added: collisions split slots into child nodes
    /// and removals leave the structure in place.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total space, in bytes, allocated by both pools.
    pub fn allocated_bytes(&self) -> usize {
        self.entries.capacity() * mem::size_of::<Pair<K, V>>()
            + self.nodes.capacity() * mem::size_of::<Node>()
    }

    /// Approximate space, in bytes, in live use.
    ///
    /// A node counts as fully used as soon as it holds one value, and a node
    /// holding only child links counts as unused, so this is an
    /// approximation on both sides.
    pub fn used_bytes(&self) -> usize {
        let live_nodes = self
            .nodes
            .as_slice()
            .iter()
            .filter(|node| node.refs > 0)
            .count();
        self.len * mem::size_of::<Pair<K, V>>() + live_nodes * mem::size_of::<Node>()
    }

    /// Trie depth visited to resolve `key`: the number of slot inspections a
    /// lookup performs, whether or not the key is present.
    ///
    /// Useful as a diagnostic for how deep collisions have pushed a key's
    /// path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<[u8; 2], i32> = ByteDict::new();
    /// assert_eq!(map.lookup_depth([0, 0]), 1);
    ///
    /// *map.insert([0, 0]) = 1;
    /// *map.insert([0, 1]) = 2; // collides on the first byte
    /// assert_eq!(map.lookup_depth([0, 0]), 2);
    /// ```
    pub fn lookup_depth(&self, key: K) -> usize {
        let mut node = 0;
        let mut level = 0;
        while let Slot::Tab(child) = self.nodes[node].slots[key.byte_at(level) as usize] {
            node = child;
            level += 1;
        }
        level + 1
    }

    /// Descends from the root by successive key bytes and returns the index
    /// of the pair storing `key`, if any.
    fn find(&self, key: K) -> Option<usize> {
        let mut node = 0;
        let mut level = 0;
        loop {
            match self.nodes[node].slots[key.byte_at(level) as usize] {
                Slot::Tab(child) => {
                    node = child;
                    level += 1;
                }
                Slot::Val(e) if key.eq_bytes(&self.entries[e].key) => return Some(e),
                _ => return None,
            }
        }
    }

    /// Descends like [`find`](Self::find) but installs `key` when the walk
    /// ends anywhere other than a matching pair, splitting occupied slots
    /// into child nodes until the colliding keys diverge.
    fn find_or_alloc(&mut self, key: K) -> usize
    where
        V: Default,
    {
        let mut node = 0;
        let mut level = 0;
        loop {
            debug_assert!(level < K::WIDTH, "descent ran past the key width");
            let b = key.byte_at(level) as usize;
            match self.nodes[node].slots[b] {
                Slot::Tab(child) => {
                    node = child;
                    level += 1;
                }
                Slot::Val(e) if key.eq_bytes(&self.entries[e].key) => return e,
                Slot::Val(e) => {
                    // Collision: push the occupant one level down behind a
                    // fresh interior node, then continue from that node.
                    let down = self.entries[e].key.byte_at(level + 1) as usize;
                    let child = self.nodes.len();
                    self.nodes.add(Node::new());
                    let fresh = self.nodes.last_mut();
                    fresh.slots[down] = Slot::Val(e);
                    fresh.refs = 1;
                    self.nodes[node].slots[b] = Slot::Tab(child);
                    self.nodes[node].refs -= 1;
                    node = child;
                    level += 1;
                }
                Slot::Nil => {
                    let e = self.entries.len();
                    self.entries.add(Pair {
                        key,
                        value: V::default(),
                        refs: 1,
                    });
                    self.nodes[node].slots[b] = Slot::Val(e);
                    self.nodes[node].refs += 1;
                    self.len += 1;
                    return e;
                }
                Slot::Free(e) => {
                    // The payload still names the pair this slot vacated, so
                    // its storage is reused in place.
                    let pair = &mut self.entries[e];
                    pair.key = key;
                    pair.refs = 1;
                    self.nodes[node].slots[b] = Slot::Val(e);
                    self.nodes[node].refs += 1;
                    self.len += 1;
                    return e;
                }
            }
        }
    }
}

impl<K: FixedKey, V> Default for ByteDict<K, V> {
    /// Creates an empty dictionary.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for ByteDict<K, V> {
    fn clone(&self) -> Self {
        ByteDict {
            entries: self.entries.clone(),
            nodes: self.nodes.clone(),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.entries.clone_from(&source.entries);
        self.nodes.clone_from(&source.nodes);
        self.len = source.len;
    }
}

impl<K, V> fmt::Debug for ByteDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteDict")
            .field("len", &self.len)
            .field("node_count", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<K: FixedKey, V> Index<K> for ByteDict<K, V> {
    type Output = V;

    /// Strict lookup. Absence is a caller error.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: FixedKey, V> IndexMut<K> for ByteDict<K, V> {
    /// Strict mutable lookup. Absence is a caller error.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index_mut(&mut self, key: K) -> &mut V {
        self.get_mut(key).expect("no entry found for key")
    }
}

impl<K: FixedKey, V: Default> Extend<(K, V)> for ByteDict<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            *self.insert(key) = value;
        }
    }
}

impl<K: FixedKey, V: Default> FromIterator<(K, V)> for ByteDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = ByteDict::new();
        dict.extend(iter);
        dict
    }
}

impl<K: FixedKey, V: Default, const N: usize> From<[(K, V); N]> for ByteDict<K, V> {
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let map = ByteDict::from([(1u64, 10), (2u64, 20)]);
    /// assert_eq!(map[1], 10);
    /// assert_eq!(map[2], 20);
    /// ```
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
