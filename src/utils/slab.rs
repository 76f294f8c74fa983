/// A simple slab allocator.
///
/// A `Slab` stores values of type `T` in a contiguous array and returns
/// stable indices that can be reused after removal. Freed slots are kept
/// on a stack and handed back to later insertions, so indices stay small
/// enough to be carried in an `epoll` event payload.
pub(crate) struct Slab<T> {
    /// Storage for items; `None` marks a free slot.
    slots: Vec<Option<T>>,
    /// Stack of free indices that can be reused.
    free: Vec<usize>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> Slab<T> {
    /// Creates a new `Slab` with the given initial capacity.
    ///
    /// All slots start free.
    pub(crate) fn new(size: usize) -> Self {
        let slots = (0..size).map(|_| None).collect();
        let free = (0..size).collect();

        Self {
            slots,
            free,
            len: 0,
        }
    }

    /// Inserts a value and returns its index.
    ///
    /// Reuses a free slot when one is available, otherwise appends.
    pub(crate) fn insert(&mut self, item: T) -> usize {
        let index = match self.free.pop() {
            Some(i) => i,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };

        self.slots[index] = Some(item);
        self.len += 1;

        index
    }

    /// Removes and returns the value stored at `index`.
    ///
    /// The slot becomes free and may be reused by future insertions.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the slot is not in use.
    pub(crate) fn remove(&mut self, index: usize) -> T {
        match self.slots.get_mut(index).and_then(Option::take) {
            Some(item) => {
                self.free.push(index);
                self.len -= 1;
                item
            }
            None => panic!("slab: slot {index} is not in use"),
        }
    }

    /// Returns a reference to the value at `index`, if the slot is in use.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
