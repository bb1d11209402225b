// 🗂️ Record Store - owners + measurements held in memory for one session
//
// Ids are handed out as max(existing) + 1, so they start at 1 and never go
// backwards. Lookups are linear scans in insertion order; first match wins.

use crate::entities::{Measurement, Owner, Tags};
use crate::error::StoreError;
use log::debug;
use std::collections::HashSet;

// ============================================================================
// SELECTOR
// ============================================================================

/// Which measurements `measurements_for` should yield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// All measurements recorded against one owner
    Owner(u32),

    /// All measurements carrying a group key (metric, discipline)
    Group(&'a str),
}

impl Selector<'_> {
    pub fn matches(&self, measurement: &Measurement) -> bool {
        match self {
            Selector::Owner(owner_id) => measurement.owner_id == *owner_id,
            Selector::Group(key) => measurement.group.as_deref() == Some(*key),
        }
    }
}

// ============================================================================
// RECORD STORE
// ============================================================================

/// Collection sizes at one point in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    owners: usize,
    measurements: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    owners: Vec<Owner>,
    measurements: Vec<Measurement>,
}

/// Next identifier after the largest one in `ids` (1 when empty)
fn next_id(ids: impl Iterator<Item = u32>, collection: &'static str) -> Result<u32, StoreError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted(collection))
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        RecordStore::default()
    }

    /// Create a store from previously loaded collections
    ///
    /// Owner ids, owner names and measurement ids must each be unique; the
    /// error carries the 0-based position of the first repeat.
    pub fn from_parts(owners: Vec<Owner>, measurements: Vec<Measurement>) -> Result<Self, StoreError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for (index, owner) in owners.iter().enumerate() {
            if !ids.insert(owner.id) {
                return Err(StoreError::DuplicateOwnerId { id: owner.id, index });
            }
            if !names.insert(owner.name.as_str()) {
                return Err(StoreError::DuplicateOwnerName {
                    name: owner.name.clone(),
                    index,
                });
            }
        }

        let mut ids = HashSet::new();
        for (index, measurement) in measurements.iter().enumerate() {
            if !ids.insert(measurement.id) {
                return Err(StoreError::DuplicateMeasurementId {
                    id: measurement.id,
                    index,
                });
            }
        }

        Ok(RecordStore {
            owners,
            measurements,
        })
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Add an owner under a fresh id
    ///
    /// Fails if an owner with exactly the same name (case-sensitive) exists;
    /// the collection is left untouched in that case.
    pub fn add_owner(&mut self, name: &str) -> Result<Owner, StoreError> {
        if self.find_owner_by_name(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let id = next_id(self.owners.iter().map(|o| o.id), "owner")?;
        let owner = Owner::new(id, name)?;
        debug!("assigned owner id {} to '{}'", id, owner.name);

        self.owners.push(owner.clone());
        Ok(owner)
    }

    /// Add a measurement under a fresh id
    ///
    /// `owner_id` is NOT checked against the owner collection; see
    /// `dangling_measurements` for the audit side of that.
    pub fn add_measurement(
        &mut self,
        owner_id: u32,
        value: f64,
        tags: Tags,
    ) -> Result<Measurement, StoreError> {
        let id = next_id(self.measurements.iter().map(|m| m.id), "measurement")?;
        let measurement = Measurement::new(id, owner_id, value)?.with_tags(tags)?;
        debug!("assigned measurement id {} for owner {}", id, owner_id);

        self.measurements.push(measurement.clone());
        Ok(measurement)
    }

    /// First owner whose name matches exactly
    pub fn find_owner_by_name(&self, name: &str) -> Option<&Owner> {
        self.owners.iter().find(|o| o.name == name)
    }

    /// First owner whose name matches ignoring case
    pub fn find_owner_by_name_ignore_case(&self, name: &str) -> Option<&Owner> {
        let wanted = name.to_lowercase();
        self.owners.iter().find(|o| o.name.to_lowercase() == wanted)
    }

    /// Current collection sizes, to undo a half-finished batch of inserts
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            owners: self.owners.len(),
            measurements: self.measurements.len(),
        }
    }

    /// Drop everything added after `checkpoint` was taken
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.owners.truncate(checkpoint.owners);
        self.measurements.truncate(checkpoint.measurements);
    }

    pub fn owner(&self, id: u32) -> Option<&Owner> {
        self.owners.iter().find(|o| o.id == id)
    }

    /// Lazy, restartable view over the measurements picked by `selector`
    ///
    /// The returned iterator is `Clone`, so callers can walk it more than once.
    pub fn measurements_for<'a>(
        &'a self,
        selector: Selector<'a>,
    ) -> impl Iterator<Item = &'a Measurement> + Clone + 'a {
        self.measurements
            .iter()
            .filter(move |m| selector.matches(m))
    }

    /// Measurements whose owner id does not resolve to a known owner
    pub fn dangling_measurements(&self) -> Vec<&Measurement> {
        self.measurements
            .iter()
            .filter(|m| self.owner(m.owner_id).is_none())
            .collect()
    }

    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
