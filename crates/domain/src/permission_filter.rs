//! Reduction of geo-tagged records to the subset a role may view.

use serde::{Deserialize, Serialize};

use crate::geography::{same_city, same_taluka};
use crate::hierarchy::scoped_assignment;
use crate::{Assignment, Role};

/// Record carrying a city and/or taluka tag.
pub trait GeoTagged {
    /// Returns the city tag, if any.
    fn city(&self) -> Option<&str>;

    /// Returns the taluka tag, if any.
    fn taluka(&self) -> Option<&str>;
}

/// Plain location tag used for single-record checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// City tag.
    pub city: Option<String>,
    /// Taluka tag.
    pub taluka: Option<String>,
}

impl GeoLocation {
    /// Creates a location tag.
    #[must_use]
    pub fn new(city: Option<String>, taluka: Option<String>) -> Self {
        Self { city, taluka }
    }
}

impl GeoTagged for GeoLocation {
    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn taluka(&self) -> Option<&str> {
        self.taluka.as_deref()
    }
}

impl<T: GeoTagged + ?Sized> GeoTagged for &T {
    fn city(&self) -> Option<&str> {
        (**self).city()
    }

    fn taluka(&self) -> Option<&str> {
        (**self).taluka()
    }
}

/// Returns whether one record is visible to the role.
///
/// Below the Sub-General tier a taluka match is only trusted inside the recorded city
/// context: a record that names a different city is rejected even when the taluka name
/// matches, because taluka names recur across cities.
#[must_use]
pub fn is_visible<R: GeoTagged + ?Sized>(
    record: &R,
    role: Role,
    assignment: Option<&Assignment>,
) -> bool {
    match (role, scoped_assignment(role, assignment)) {
        (Role::General, _) => true,
        (_, None) => false,
        (Role::SubGeneral, Some(assignment)) => record.city().is_some_and(|city| {
            assignment
                .assigned_cities()
                .iter()
                .any(|assigned| same_city(assigned, city))
        }),
        (Role::HrGeneral, Some(assignment)) => {
            let taluka_granted = record.taluka().is_some_and(|taluka| {
                assignment
                    .assigned_talukas()
                    .iter()
                    .any(|assigned| same_taluka(assigned, taluka))
            });
            taluka_granted && within_city_context(record, assignment)
        }
        (Role::Salesman, Some(assignment)) => {
            let taluka_granted = match (record.taluka(), assignment.single_taluka()) {
                (Some(taluka), Some(assigned)) => same_taluka(assigned, taluka),
                _ => false,
            };
            taluka_granted && within_city_context(record, assignment)
        }
    }
}

/// Keeps the records the role may view, preserving order.
///
/// General receives `records` unchanged. Any other role without an assignment recorded
/// for that role receives nothing.
#[must_use]
pub fn filter_by_permission<R: GeoTagged>(
    records: Vec<R>,
    role: Role,
    assignment: Option<&Assignment>,
) -> Vec<R> {
    if role == Role::General {
        return records;
    }

    records
        .into_iter()
        .filter(|record| is_visible(record, role, assignment))
        .collect()
}

fn within_city_context<R: GeoTagged + ?Sized>(record: &R, assignment: &Assignment) -> bool {
    match (record.city(), assignment.city_context()) {
        (Some(city), Some(context)) => same_city(city, context),
        _ => true,
    }
}
