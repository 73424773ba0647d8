//! Generational slot storage.
//!
//! An `Arena` owns a set of values that have unpredictable lifetimes and
//! need to be referred to from elsewhere without holding a borrow. Each
//! insertion hands back an `ArenaId`, a small `Copy` pair of slot index and
//! generation. Removing a value bumps the generation of its slot, so stale
//! ids held after removal resolve to `None` instead of aliasing whatever
//! gets stored in the slot next.
//!
//! ```
//! use utils::arena::Arena;
//!
//! let mut arena = Arena::new();
//! let id = arena.insert(String::from("Hello arena!"));
//! assert_eq!(arena.get(id).map(|s| s.as_str()), Some("Hello arena!"));
//!
//! arena.remove(id);
//! assert!(arena.get(id).is_none());
//! ```

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId {
    ai_index: usize,
    ai_generation: u32,
}

impl ArenaId {
    /// Gets the raw slot offset for this id
    pub fn get_raw_id(&self) -> usize {
        self.ai_index
    }
}

impl std::fmt::Display for ArenaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArenaId({}v{})", self.ai_index, self.ai_generation)
    }
}

#[derive(Debug)]
struct Slot<T> {
    s_generation: u32,
    s_value: Option<T>,
}

#[derive(Debug)]
pub struct Arena<T> {
    a_slots: Vec<Slot<T>>,
    /// Indices of empty slots, reused before growing the list
    a_free: Vec<usize>,
    a_len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            a_slots: Vec::new(),
            a_free: Vec::new(),
            a_len: 0,
        }
    }

    /// The number of live values
    pub fn len(&self) -> usize {
        self.a_len
    }

    pub fn is_empty(&self) -> bool {
        self.a_len == 0
    }

    pub fn insert(&mut self, val: T) -> ArenaId {
        self.a_len += 1;

        if let Some(index) = self.a_free.pop() {
            let slot = &mut self.a_slots[index];
            assert!(slot.s_value.is_none());
            slot.s_value = Some(val);
            return ArenaId {
                ai_index: index,
                ai_generation: slot.s_generation,
            };
        }

        self.a_slots.push(Slot {
            s_generation: 0,
            s_value: Some(val),
        });
        return ArenaId {
            ai_index: self.a_slots.len() - 1,
            ai_generation: 0,
        };
    }

    fn slot(&self, id: ArenaId) -> Option<&Slot<T>> {
        self.a_slots
            .get(id.ai_index)
            .filter(|s| s.s_generation == id.ai_generation)
    }

    pub fn contains(&self, id: ArenaId) -> bool {
        self.get(id).is_some()
    }

    /// Get the value for `id`, or None if it was removed
    pub fn get(&self, id: ArenaId) -> Option<&T> {
        self.slot(id).and_then(|s| s.s_value.as_ref())
    }

    pub fn get_mut(&mut self, id: ArenaId) -> Option<&mut T> {
        self.a_slots
            .get_mut(id.ai_index)
            .filter(|s| s.s_generation == id.ai_generation)
            .and_then(|s| s.s_value.as_mut())
    }

    /// Take the value out of the arena.
    ///
    /// The slot's generation advances so that `id` and any copies of it
    /// no longer resolve.
    pub fn remove(&mut self, id: ArenaId) -> Option<T> {
        let slot = self
            .a_slots
            .get_mut(id.ai_index)
            .filter(|s| s.s_generation == id.ai_generation)?;
        let ret = slot.s_value.take()?;

        slot.s_generation = slot.s_generation.wrapping_add(1);
        self.a_free.push(id.ai_index);
        self.a_len -= 1;
        return Some(ret);
    }

    /// Iterate over the live values and their ids
    pub fn iter(&self) -> impl Iterator<Item = (ArenaId, &T)> {
        self.a_slots.iter().enumerate().filter_map(|(i, s)| {
            s.s_value.as_ref().map(|v| {
                (
                    ArenaId {
                        ai_index: i,
                        ai_generation: s.s_generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ArenaId, &mut T)> {
        self.a_slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.s_generation;
            s.s_value.as_mut().map(|v| {
                (
                    ArenaId {
                        ai_index: i,
                        ai_generation: generation,
                    },
                    v,
                )
            })
        })
    }

    /// Snapshot of the live ids, for loops that need to mutate the arena
    pub fn ids(&self) -> Vec<ArenaId> {
        self.iter().map(|(id, _)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let _b = arena.insert(2);

        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.remove(a), None);

        let c = arena.insert(3);
        assert_eq!(c.get_raw_id(), a.get_raw_id());
        assert_ne!(a, c);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(c), Some(&3));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn iteration_skips_holes() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);

        for (_, v) in arena.iter_mut() {
            *v *= 10;
        }
        let live: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(live, vec![0, 20]);
        assert_eq!(arena.ids(), vec![ids[0], ids[2]]);
    }
}
