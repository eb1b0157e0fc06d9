use std::ops::{Index, IndexMut};

/// A growable contiguous buffer whose element indices stay stable for the
/// life of the container that owns it.
///
/// Storage may be reallocated on growth (elements move in memory, indices do
/// not change), and elements are never compacted or shuffled between slots.
/// `growth` is the minimum step by which capacity grows when [`add`] runs out
/// of room; actual growth is geometric so that repeated additions stay
/// amortized linear.
///
/// [`add`]: Pool::add
pub(crate) struct Pool<T> {
    buf: Vec<T>,
    growth: usize,
}

impl<T> Pool<T> {
    /// An empty pool growing by at least `growth` elements at a time.
    pub(crate) fn with_growth(growth: usize) -> Self {
        Pool {
            buf: Vec::new(),
            growth: growth.max(1),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// Destructive reserve: ensures capacity for `size` elements and empties
    /// the pool. Existing contents are dropped, not copied.
    pub(crate) fn reserve(&mut self, size: usize) {
        if size > self.buf.capacity() {
            self.buf = Vec::with_capacity(size);
        } else {
            self.buf.clear();
        }
    }

    /// Grows capacity to at least `size` without exposing fresh elements.
    /// Contents are preserved; the length only changes if `size` is below it,
    /// in which case the tail is truncated.
    pub(crate) fn resize_capacity(&mut self, size: usize) {
        if size > self.buf.capacity() {
            let additional = size - self.buf.len();
            self.buf.reserve_exact(additional);
        }
        if size < self.buf.len() {
            self.buf.truncate(size);
        }
    }

    /// Appends `value`, growing capacity by at least the configured step, and
    /// returns a reference to the element at the new tail.
    pub(crate) fn add(&mut self, value: T) -> &mut T {
        if self.buf.len() == self.buf.capacity() {
            let step = self.growth.max(self.buf.capacity());
            self.resize_capacity(self.buf.len() + step);
        }
        let i = self.buf.len();
        self.buf.push(value);
        &mut self.buf[i]
    }

    pub(crate) fn last_mut(&mut self) -> &mut T {
        self.buf.last_mut().expect("empty pool")
    }
}

// The remainder of the pool contract. Exercised by the unit tests below; the
// dictionary itself drives growth through `add`, `reserve` and
// `resize_capacity`.
#[allow(dead_code)]
impl<T> Pool<T> {
    /// Sets the length to `size`, default-constructing any fresh tail
    /// elements and copying existing ones across a reallocation if needed.
    pub(crate) fn resize(&mut self, size: usize)
    where
        T: Default,
    {
        if size > self.buf.capacity() {
            let additional = size - self.buf.len();
            self.buf.reserve_exact(additional);
        }
        self.buf.resize_with(size, T::default);
    }

    pub(crate) fn first(&self) -> &T {
        self.buf.first().expect("empty pool")
    }

    pub(crate) fn last(&self) -> &T {
        self.buf.last().expect("empty pool")
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, i: usize) -> &T {
        &self.buf[i]
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.buf[i]
    }
}

impl<T: Clone> Clone for Pool<T> {
    fn clone(&self) -> Self {
        // Capacity is part of the pool's observable cost, so the copy
        // preserves it rather than shrinking to fit.
        let mut buf = Vec::with_capacity(self.buf.capacity());
        buf.extend_from_slice(&self.buf);
        Pool {
            buf,
            growth: self.growth,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.reserve(source.buf.capacity());
        self.buf.extend_from_slice(&source.buf);
        self.growth = source.growth;
    }
}
