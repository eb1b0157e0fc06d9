use crate::key::FixedKey;
use crate::ByteDict;

/// A view into a single slot of a [`ByteDict`], which may be vacant or
/// occupied.
///
/// Produced by [`ByteDict::entry`]; one descent decides occupancy, and every
/// operation on the view works from that answer.
///
/// # Examples
///
/// ```
/// use bytedict::{ByteDict, Entry};
///
/// let mut map: ByteDict<u64, i32> = ByteDict::new();
///
/// match map.entry(1) {
///     Entry::Vacant(entry) => {
///         entry.insert(1);
///     }
///     Entry::Occupied(entry) => {
///         *entry.into_mut() += 1;
///     }
/// }
/// assert_eq!(map.get(1), Some(&1));
/// ```
pub enum Entry<'a, K, V> {
    /// An occupied slot.
    Occupied(OccupiedEntry<'a, K, V>),
    /// A vacant slot.
    Vacant(VacantEntry<'a, K, V>),
}

/// A view into an occupied slot of a [`ByteDict`].
///
/// It is part of the [`Entry`] API.
pub struct OccupiedEntry<'a, K, V> {
    pub(crate) dict: &'a mut ByteDict<K, V>,
    pub(crate) key: K,
    pub(crate) pair_idx: usize,
}

/// A view into a vacant slot of a [`ByteDict`].
///
/// It is part of the [`Entry`] API.
pub struct VacantEntry<'a, K, V> {
    pub(crate) dict: &'a mut ByteDict<K, V>,
    pub(crate) key: K,
}

impl<'a, K: FixedKey, V> Entry<'a, K, V> {
    /// Returns a reference to the value in the entry, if occupied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    /// *map.insert(1) = 10;
    ///
    /// assert_eq!(map.entry(1).get(), Some(&10));
    /// assert_eq!(map.entry(2).get(), None);
    /// ```
    pub fn get(&self) -> Option<&V> {
        match self {
            Entry::Occupied(entry) => Some(entry.get()),
            Entry::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value in the entry, if occupied.
    pub fn get_mut(&mut self) -> Option<&mut V> {
        match self {
            Entry::Occupied(entry) => Some(entry.get_mut()),
            Entry::Vacant(_) => None,
        }
    }

    /// Ensures a value is in the entry by inserting the default if vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    ///
    /// map.entry(1).or_default();
    /// assert_eq!(map.get(1), Some(&0));
    /// ```
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }

    /// Ensures a value is in the entry by inserting `default` if vacant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    ///
    /// map.entry(1).or_insert(1);
    /// *map.entry(1).or_insert(10) *= 2;
    ///
    /// assert_eq!(map.get(1), Some(&2));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V
    where
        V: Default,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of `default`
    /// if vacant. The closure only runs when the slot is vacant.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V
    where
        V: Default,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// The key this entry resolves.
    pub fn key(&self) -> K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// other operation on the view.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::ByteDict;
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    ///
    /// map.entry(1).and_modify(|v| *v += 1).or_insert(1);
    /// assert_eq!(map.get(1), Some(&1));
    ///
    /// map.entry(1).and_modify(|v| *v += 1).or_insert(0);
    /// assert_eq!(map.get(1), Some(&2));
    /// ```
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }
}

impl<'a, K: FixedKey, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.dict.entries[self.pair_idx].value
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// See [`into_mut`](Self::into_mut) for a reference outliving the view.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.dict.entries[self.pair_idx].value
    }

    /// Converts the view into a mutable reference tied to the dictionary.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.dict.entries[self.pair_idx].value
    }

    /// The key stored in the entry.
    pub fn key(&self) -> K {
        self.key
    }

    /// Replaces the stored value with `value`, returning the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::{ByteDict, Entry};
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    /// *map.insert(1) = 10;
    ///
    /// if let Entry::Occupied(mut entry) = map.entry(1) {
    ///     assert_eq!(entry.insert(20), 10);
    /// }
    /// assert_eq!(map.get(1), Some(&20));
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(&mut self.dict.entries[self.pair_idx].value, value)
    }

    /// Removes the entry, returning the value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::{ByteDict, Entry};
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    /// *map.insert(1) = 10;
    ///
    /// if let Entry::Occupied(entry) = map.entry(1) {
    ///     assert_eq!(entry.remove(), 10);
    /// }
    /// assert!(!map.contains_key(1));
    /// ```
    pub fn remove(self) -> V
    where
        V: Default,
    {
        self.dict.remove(self.key).unwrap()
    }
}

impl<'a, K: FixedKey, V> VacantEntry<'a, K, V> {
    /// The key that would be used when inserting a value.
    pub fn key(&self) -> K {
        self.key
    }

    /// Inserts `value` into the slot and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bytedict::{ByteDict, Entry};
    /// let mut map: ByteDict<u64, i32> = ByteDict::new();
    ///
    /// if let Entry::Vacant(entry) = map.entry(1) {
    ///     entry.insert(10);
    /// }
    /// assert_eq!(map.get(1), Some(&10));
    /// ```
    pub fn insert(self, value: V) -> &'a mut V
    where
        V: Default,
    {
        let slot = self.dict.insert(self.key);
        *slot = value;
        slot
    }
}
