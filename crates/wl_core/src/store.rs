use std::collections::TryReserveError;
use std::fmt;

/// Capacity granted by the first growth of an empty store.
pub const INITIAL_CAPACITY: usize = 16;

/// An entity record that can be switched off without being removed.
pub trait Slot {
    fn is_active(&self) -> bool;
}

/// Error type for entity store growth.
#[derive(Debug)]
pub enum StoreError {
    /// The allocator refused the requested growth. The store is unchanged.
    Allocation {
        requested: usize,
        source: TryReserveError,
    },
    /// No room left for another entity.
    Full { capacity: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { requested, source } => {
                write!(f, "could not grow store to {} entries: {}", requested, source)
            }
            Self::Full { capacity } => write!(f, "store is full ({} entries)", capacity),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation { source, .. } => Some(source),
            Self::Full { .. } => None,
        }
    }
}

/// Growable array of entity records with an explicit logical capacity.
///
/// Entities are only ever appended; switching one off is a flag on the record
/// itself, never a compaction. Growth doubles the capacity (starting from
/// [`INITIAL_CAPACITY`]) or jumps straight to the requested size when doubling
/// is not enough.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    entries: Vec<T>,
    capacity: usize,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityStore<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            capacity: 0,
        }
    }

    /// Make room for at least `required` entries in total.
    ///
    /// Existing entries are never moved out of the store or altered. On
    /// failure the store keeps its previous buffer, count and capacity.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<(), StoreError> {
        if required <= self.capacity {
            return Ok(());
        }

        let doubled = if self.capacity == 0 {
            INITIAL_CAPACITY
        } else {
            self.capacity.saturating_mul(2)
        };
        let target = doubled.max(required);

        self.entries
            .try_reserve_exact(target - self.entries.len())
            .map_err(|source| StoreError::Allocation {
                requested: target,
                source,
            })?;
        self.capacity = target;
        Ok(())
    }

    /// Append an entity, returning its index.
    pub fn push(&mut self, entity: T) -> Result<usize, StoreError> {
        if self.entries.len() >= self.capacity {
            return Err(StoreError::Full {
                capacity: self.capacity,
            });
        }
        self.entries.push(entity);
        Ok(self.entries.len() - 1)
    }

    /// Drop every entry. Capacity is kept for the next population pass.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Number of entities written so far, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }
}

impl<T: Slot> EntityStore<T> {
    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(|e| e.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter(|e| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }
}

impl<'a, T> IntoIterator for &'a EntityStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
