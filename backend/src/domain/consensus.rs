//! Group consensus over submitted vacation preferences.
//!
//! The engine is a pure reduction: it never touches the store or the clock,
//! so the same input always yields the same plan.
//!
//! - The travel window is the intersection of every submitted window: the
//!   latest start and the earliest end.
//! - Destination and vacation type are each chosen by plurality. When several
//!   values share the highest count, the value seen first in the input wins,
//!   so callers must pass preferences in submission order.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Destination, VacationPreference, VacationType};

/// Number of members whose preferences are required before planning.
pub const DEFAULT_GROUP_SIZE: usize = 5;

/// The agreed group plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusResult {
    /// Winning destination.
    pub destination: Destination,
    /// Winning vacation type.
    pub vacation_type: VacationType,
    /// First day everyone is available.
    pub start_date: NaiveDate,
    /// Last day everyone is available.
    pub end_date: NaiveDate,
}

/// Reasons a plan cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsensusError {
    /// Fewer preferences than the group size.
    #[error("only {submitted} of {required} members have submitted preferences")]
    InsufficientSubmissions {
        /// Group size.
        required: usize,
        /// Preferences currently stored.
        submitted: usize,
    },
    /// The intersected window is empty.
    #[error("no overlapping availability: latest start {start} is after earliest end {end}")]
    NoOverlap {
        /// Latest submitted start date.
        start: NaiveDate,
        /// Earliest submitted end date.
        end: NaiveDate,
    },
}

/// Computes the group plan from the full set of preferences.
///
/// # Examples
/// ```
/// use vacation_planner::domain::{ConsensusEngine, ConsensusError};
///
/// let engine = ConsensusEngine::default();
/// let err = engine.compute(&[]).unwrap_err();
/// assert_eq!(err, ConsensusError::InsufficientSubmissions { required: 5, submitted: 0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusEngine {
    group_size: usize,
}

impl Default for ConsensusEngine {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_SIZE)
    }
}

impl ConsensusEngine {
    /// Build an engine requiring `group_size` submissions. A size of zero is
    /// raised to one so the reduction always has input.
    pub fn new(group_size: usize) -> Self {
        Self {
            group_size: group_size.max(1),
        }
    }

    /// Required number of submissions.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Reduce `preferences`, given in submission order, to a single plan.
    pub fn compute(
        &self,
        preferences: &[VacationPreference],
    ) -> Result<ConsensusResult, ConsensusError> {
        let insufficient = ConsensusError::InsufficientSubmissions {
            required: self.group_size,
            submitted: preferences.len(),
        };
        if preferences.len() < self.group_size {
            return Err(insufficient);
        }
        let Some(first) = preferences.first() else {
            return Err(insufficient);
        };

        let (start, end) = intersect_windows(first, preferences);
        if start > end {
            return Err(ConsensusError::NoOverlap { start, end });
        }

        let destination = plurality(preferences.iter().map(|p| &p.destination))
            .unwrap_or(&first.destination);
        let vacation_type = plurality(preferences.iter().map(|p| &p.vacation_type))
            .unwrap_or(&first.vacation_type);
        Ok(ConsensusResult {
            destination: destination.clone(),
            vacation_type: vacation_type.clone(),
            start_date: start,
            end_date: end,
        })
    }
}

fn intersect_windows(
    first: &VacationPreference,
    preferences: &[VacationPreference],
) -> (NaiveDate, NaiveDate) {
    preferences.iter().fold(
        (first.window.starting_date(), first.window.end_date()),
        |(start, end), p| {
            (
                start.max(p.window.starting_date()),
                end.min(p.window.end_date()),
            )
        },
    )
}

/// Most frequent value; ties go to the value whose first occurrence comes
/// earliest.
///
/// # Examples
/// ```
/// use vacation_planner::domain::plurality;
///
/// assert_eq!(plurality(["A", "B", "A", "B", "C"].iter()), Some(&"A"));
/// assert_eq!(plurality(["B", "A", "A", "B", "C"].iter()), Some(&"B"));
/// assert_eq!(plurality(["C", "A", "A"].iter()), Some(&"A"));
/// ```
pub fn plurality<'a, T, I>(values: I) -> Option<&'a T>
where
    T: PartialEq + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut tallies: Vec<(&'a T, usize)> = Vec::new();
    for value in values {
        match tallies.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tallies.push((value, 1)),
        }
    }

    let mut best: Option<(&'a T, usize)> = None;
    for (value, count) in tallies {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}
