//! Active-cell set: the indices of every live cell.
//!
//! Stored as a sparse set: a dense list of members plus a per-cell slot table
//! (`slot = position + 1`, `0` = absent). Insert, remove and membership are
//! O(1) without hashing, iteration walks only the members, and clearing costs
//! O(members) rather than O(cells).

/// Sparse set of flattened cell indices in `[0, capacity)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSet {
    members: Vec<u32>,
    slots: Vec<u32>,
}

impl ActiveSet {
    /// Empty set able to hold indices `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::new(),
            slots: vec![0; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        self.slots
            .get(index as usize)
            .map(|&slot| slot != 0)
            .unwrap_or(false)
    }

    /// Insert `index`. Returns false if already present or out of range.
    pub fn insert(&mut self, index: u32) -> bool {
        match self.slots.get_mut(index as usize) {
            Some(slot) if *slot == 0 => {
                self.members.push(index);
                *slot = self.members.len() as u32;
                true
            }
            _ => false,
        }
    }

    /// Remove `index`. Returns false if it was not present.
    pub fn remove(&mut self, index: u32) -> bool {
        let Some(&slot) = self.slots.get(index as usize) else {
            return false;
        };
        if slot == 0 {
            return false;
        }

        let pos = (slot - 1) as usize;
        self.members.swap_remove(pos);
        if let Some(&moved) = self.members.get(pos) {
            self.slots[moved as usize] = slot;
        }
        self.slots[index as usize] = 0;
        true
    }

    /// Remove every member, keeping the slot table allocation.
    pub fn clear(&mut self) {
        for &index in &self.members {
            self.slots[index as usize] = 0;
        }
        self.members.clear();
    }

    /// Members in storage order.
    pub fn as_slice(&self) -> &[u32] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.members.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.members.clone()
    }
}
