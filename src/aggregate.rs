// 📊 Aggregator - mean / best / worst over measurement subsets
// Pure functions: nothing here mutates the store.

use crate::entities::Measurement;
use crate::error::AggregateError;
use crate::store::{RecordStore, Selector};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Arithmetic mean; an empty input is an error, never a silent 0
pub fn mean<I>(values: I) -> Result<f64, AggregateError>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return Err(AggregateError::Empty);
    }
    Ok(sum / count as f64)
}

/// Mean with the documented zero-default for empty input (price averages)
pub fn mean_or_zero<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    mean(values).unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Max,
    Min,
}

/// Measurement with the extreme value; ties go to the first one seen
pub fn extremum<'a, I>(measurements: I, pick: Pick) -> Result<&'a Measurement, AggregateError>
where
    I: IntoIterator<Item = &'a Measurement>,
{
    measurements
        .into_iter()
        .reduce(|kept, m| {
            let replaces = match pick {
                Pick::Max => m.value > kept.value,
                Pick::Min => m.value < kept.value,
            };
            if replaces {
                m
            } else {
                kept
            }
        })
        .ok_or(AggregateError::Empty)
}

// ============================================================================
// GROUP STATISTICS
// ============================================================================

/// One side of a group bundle: who, and with what value
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub owner_id: u32,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub group_key: String,
    pub mean: f64,
    pub best: Standing,
    pub worst: Standing,
}

fn standing(store: &RecordStore, measurement: &Measurement) -> Result<Standing, AggregateError> {
    let owner = store
        .owner(measurement.owner_id)
        .ok_or(AggregateError::UnknownOwner(measurement.owner_id))?;

    Ok(Standing {
        owner_id: owner.id,
        name: owner.name.clone(),
        value: measurement.value,
    })
}

/// Statistics bundle for one group key
pub fn group_stats(store: &RecordStore, group_key: &str) -> Result<GroupStats, AggregateError> {
    let members = store.measurements_for(Selector::Group(group_key));
    let empty = || AggregateError::EmptyGroup(group_key.to_string());

    let mean = mean(members.clone().map(|m| m.value)).map_err(|_| empty())?;
    let best = extremum(members.clone(), Pick::Max).map_err(|_| empty())?;
    let worst = extremum(members, Pick::Min).map_err(|_| empty())?;

    Ok(GroupStats {
        group_key: group_key.to_string(),
        mean,
        best: standing(store, best)?,
        worst: standing(store, worst)?,
    })
}

/// Bundles for a fixed, caller-supplied vocabulary of groups, in that order
///
/// Groups are not discovered from the data: a listed group with no
/// measurements fails the whole call.
pub fn all_group_stats<S>(store: &RecordStore, groups: &[S]) -> Result<Vec<GroupStats>, AggregateError>
where
    S: AsRef<str>,
{
    groups
        .iter()
        .map(|group| group_stats(store, group.as_ref()))
        .collect()
}

/// Mean over every measurement of one owner
pub fn owner_mean(store: &RecordStore, owner_id: u32) -> Result<f64, AggregateError> {
    mean(store.measurements_for(Selector::Owner(owner_id)).map(|m| m.value))
        .map_err(|_| AggregateError::EmptyOwner(owner_id))
}

// ============================================================================
// TESTS
// ============================================================================
