//! Generation-checked handle table.
//!
//! A handle packs a slot index (low 32 bits) and the slot's generation
//! (high 32 bits). Removing a value bumps the slot's generation, so a handle
//! kept past its destroy call no longer matches and is rejected instead of
//! aliasing whatever reuses the slot. Generations start at 1, so no handle
//! is ever 0.

use std::fmt;
use std::num::NonZeroU64;

/// Opaque token for a value held in a [`HandleTable`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(NonZeroU64);

impl Handle {
    fn new(index: u32, generation: u32) -> Self {
        let raw = ((generation as u64) << 32) | index as u64;
        // generation is never 0
        Handle(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MAX))
    }

    /// Reinterpret a raw boundary value. `0` is not a handle.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Handle)
    }

    pub fn into_raw(self) -> u64 {
        self.0.get()
    }

    pub fn index(&self) -> u32 {
        self.0.get() as u32
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index(), self.generation())
    }
}

/// Lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The raw value was 0.
    Null,
    /// The handle was destroyed, never issued, or belongs to an older generation.
    Stale(u64),
    /// The table already holds `limit` values.
    Full { limit: usize },
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot vector with a free list and per-slot generations.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
    limit: usize,
}

impl<T> HandleTable<T> {
    /// Empty table with no capacity limit.
    pub fn new() -> Self {
        Self::with_limit(0)
    }

    /// Empty table holding at most `limit` live values (`0` = unlimited).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            limit,
        }
    }

    /// Change the live-value limit. Values already stored are kept.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store `value` and return its handle.
    pub fn insert(&mut self, value: T) -> Result<Handle, HandleError> {
        if self.limit != 0 && self.live >= self.limit {
            return Err(HandleError::Full { limit: self.limit });
        }
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| HandleError::Full { limit: u32::MAX as usize })?;
                self.slots.push(Slot {
                    generation: 1,
                    value: None,
                });
                index
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.live += 1;
        Ok(Handle::new(index, slot.generation))
    }

    fn slot_for(&self, raw: u64) -> Result<(Handle, &Slot<T>), HandleError> {
        let handle = Handle::from_raw(raw).ok_or(HandleError::Null)?;
        let slot = self
            .slots
            .get(handle.index() as usize)
            .ok_or(HandleError::Stale(raw))?;
        if slot.generation != handle.generation() || slot.value.is_none() {
            return Err(HandleError::Stale(raw));
        }
        Ok((handle, slot))
    }

    /// Borrow the value behind a raw handle.
    pub fn get(&self, raw: u64) -> Result<&T, HandleError> {
        let (_, slot) = self.slot_for(raw)?;
        slot.value.as_ref().ok_or(HandleError::Stale(raw))
    }

    /// Remove and return the value behind a raw handle.
    pub fn remove(&mut self, raw: u64) -> Result<T, HandleError> {
        let (handle, _) = self.slot_for(raw)?;
        let index = handle.index();
        let slot = &mut self.slots[index as usize];
        let value = slot.value.take().ok_or(HandleError::Stale(raw))?;
        slot.generation = match slot.generation.wrapping_add(1) {
            0 => 1,
            g => g,
        };
        self.free.push(index);
        self.live -= 1;
        Ok(value)
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
