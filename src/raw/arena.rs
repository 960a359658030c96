use alloc::vec::Vec;

use super::handle::Handle;
use crate::Error;

/// Append-only node storage addressed by [`Handle`].
///
/// Slots are never reused: a tree frees nodes only wholesale, by clearing the
/// arena or by moving the survivors of a rehash into a fresh one.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes room for `additional` more elements so that the following
    /// `additional` calls to [`Arena::alloc`] neither reallocate nor panic.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        if self.slots.len().saturating_add(additional) > Handle::MAX {
            return Err(Error::CapacityExceeded { max: Handle::MAX });
        }
        self.slots.try_reserve(additional)?;
        Ok(())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // Strict less-than keeps the new slot's index within Handle::MAX.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Moves an element out, leaving its slot vacant for the rest of the arena's life.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!")
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn try_reserve_refuses_more_than_handles_can_address() {
        let mut arena: Arena<u8> = Arena::new();
        assert_eq!(
            arena.try_reserve(Handle::MAX + 1),
            Err(Error::CapacityExceeded { max: Handle::MAX })
        );
        assert!(arena.try_reserve(16).is_ok());
        assert!(arena.capacity() >= 16);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn taken_slot_is_vacant() {
        let mut arena = Arena::new();
        let handle = arena.alloc(7_u32);
        assert_eq!(arena.take(handle), 7);
        let _ = arena.get(handle);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::Get(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        prop_assert_eq!(*arena.get(handle), model[index].1);
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Get(usize),
        GetMut(usize, u32),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => any::<usize>().prop_map(Operation::Get),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            1 => Just(Operation::Clear),
        ]
    }
}
