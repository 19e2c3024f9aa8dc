/// Fixed-capacity slot arena used for level blocks and enemies.
///
/// Entities stream in and out as the camera scrolls, so storage is a fixed
/// set of indexed slots rather than a growable collection: allocation scans
/// for the lowest free index, and a full pool drops the request (the caller
/// decides whether that is worth a warning). Slot indices stay stable for the
/// lifetime of the occupant, and iteration visits occupied slots in index
/// order, which collision resolution relies on for deterministic tie-breaks.
pub struct Pool<T> {
    slots: Vec<Option<T>>,
}

impl<T> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            slots.push(None);
        }
        Pool { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Places `value` in the lowest free slot and returns its index, or
    /// `None` when the pool is exhausted. The slot's previous occupant (if
    /// any) never leaks through: the value is stored whole.
    pub fn allocate(&mut self, value: T) -> Option<usize> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(value);
                return Some(index);
            }
        }

        None
    }

    /// Frees the slot at `index`. Returns false if the index is out of range
    /// or the slot was already free.
    pub fn deallocate(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(|slot| slot.as_mut())
    }

    /// Iterates occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|value| (index, value)))
    }
}
