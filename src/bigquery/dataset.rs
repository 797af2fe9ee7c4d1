//! Typed dataset records.
//!
//! Wire responses are mapped field-by-field into these structs; nothing here
//! is populated reflectively, so a field rename is a compile error rather
//! than a silently missing attribute.

use crate::bigquery::model::{DatasetAccessEntry, DatasetListItem, DatasetResource};
use std::collections::HashMap;

/// The short form returned when enumerating datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub dataset_id: String,
    pub friendly_name: Option<String>,
    pub labels: HashMap<String, String>,
}

impl DatasetSummary {
    pub(crate) fn from_item(item: DatasetListItem) -> Self {
        Self {
            dataset_id: item.dataset_reference.dataset_id,
            friendly_name: item.friendly_name,
            labels: item.labels,
        }
    }
}

/// One grantee of a dataset-level role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub role: Option<String>,
    /// Whichever grantee field the API populated (user, group, special
    /// group, or domain).
    pub entity: Option<String>,
}

impl AccessEntry {
    fn from_wire(entry: DatasetAccessEntry) -> Self {
        let entity = entry
            .user_by_email
            .or(entry.group_by_email)
            .or(entry.special_group)
            .or(entry.domain);
        Self {
            role: entry.role,
            entity,
        }
    }
}

/// The full dataset record.
///
/// Timestamps are epoch milliseconds as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub access_entries: Vec<AccessEntry>,
    pub created_on: Option<i64>,
    pub dataset_id: String,
    pub description: Option<String>,
    pub friendly_name: Option<String>,
    pub full_dataset_id: Option<String>,
    pub is_case_insensitive: bool,
    pub labels: HashMap<String, String>,
    pub location: Option<String>,
    pub max_time_travel_hours: Option<i64>,
    pub modified: Option<i64>,
    pub project: Option<String>,
}

impl DatasetInfo {
    pub(crate) fn from_resource(resource: DatasetResource) -> Self {
        Self {
            access_entries: resource
                .access
                .into_iter()
                .map(AccessEntry::from_wire)
                .collect(),
            created_on: parse_i64(resource.creation_time),
            dataset_id: resource.dataset_reference.dataset_id,
            description: resource.description,
            friendly_name: resource.friendly_name,
            full_dataset_id: resource.id,
            is_case_insensitive: resource.is_case_insensitive.unwrap_or(false),
            labels: resource.labels,
            location: resource.location,
            max_time_travel_hours: parse_i64(resource.max_time_travel_hours),
            modified: parse_i64(resource.last_modified_time),
            project: resource.dataset_reference.project_id,
        }
    }
}

/// Int64 fields come over the wire as strings.
fn parse_i64(value: Option<String>) -> Option<i64> {
    value.and_then(|s| s.parse().ok())
}
