//! Typed scheduled-query records, patch type, and config id validation.

use crate::{Error, Result, datatransfer::model::TransferConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Shape of a transfer config resource name. Checked before any request so
/// a malformed id fails locally instead of costing a round trip.
static CONFIG_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^projects/[a-zA-Z0-9-]+/locations/[a-zA-Z0-9-]+/transferConfigs/[a-zA-Z0-9-]+$")
        .expect("config id pattern is valid")
});

/// Validate a transfer config resource name
/// (`projects/{id}/locations/{loc}/transferConfigs/{id}`).
pub fn validate_config_id(id: &str) -> Result {
    if CONFIG_ID.is_match(id) {
        Ok(())
    } else {
        Err(Error::MalformedConfigId(id.to_string()))
    }
}

/// Run state of a transfer config, as reported by the API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferState {
    #[display("TRANSFER_STATE_UNSPECIFIED")]
    TransferStateUnspecified,
    #[display("PENDING")]
    Pending,
    #[display("RUNNING")]
    Running,
    #[display("SUCCEEDED")]
    Succeeded,
    #[display("FAILED")]
    Failed,
    #[display("CANCELLED")]
    Cancelled,
}

/// A scheduled query, mapped field-by-field from the transfer config wire
/// object. Timestamps are RFC 3339 strings as returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledQuery {
    pub name: String,
    pub display_name: String,
    pub dataset_region: Option<String>,
    pub destination_dataset: Option<String>,
    pub disabled: bool,
    pub next_run_time: Option<String>,
    pub query: Option<String>,
    pub partitioning_field: Option<String>,
    pub destination_table: Option<String>,
    pub write_disposition: Option<String>,
    pub schedule: Option<String>,
    pub last_state: Option<TransferState>,
    pub last_update: Option<String>,
    /// Only populated by the GET endpoint; the list endpoint omits owner
    /// info entirely.
    pub owner_email: Option<String>,
}

impl ScheduledQuery {
    pub(crate) fn from_config(config: TransferConfig) -> Self {
        let param = |key: &str| {
            config
                .params
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_owned)
        };

        Self {
            query: param("query"),
            partitioning_field: param("partitioning_field"),
            destination_table: param("destination_table_name_template"),
            write_disposition: param("write_disposition"),
            name: config.name,
            display_name: config.display_name,
            dataset_region: config.dataset_region,
            destination_dataset: config.destination_dataset_id,
            disabled: config.disabled,
            next_run_time: config.next_run_time,
            schedule: config.schedule,
            last_state: config.state,
            last_update: config.update_time,
            owner_email: config.owner_info.and_then(|o| o.email),
        }
    }
}

/// Typed partial update for a scheduled query. Only populated fields are
/// sent, and the update mask is derived from exactly those fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduledQueryPatch {
    pub display_name: Option<String>,
    pub schedule: Option<String>,
    pub disabled: Option<bool>,
    pub destination_dataset: Option<String>,
    pub query: Option<String>,
}

impl ScheduledQueryPatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.schedule.is_none()
            && self.disabled.is_none()
            && self.destination_dataset.is_none()
            && self.query.is_none()
    }

    /// Comma-joined `updateMask` paths for the populated fields.
    pub(crate) fn update_mask(&self) -> String {
        let mut paths = Vec::new();
        if self.display_name.is_some() {
            paths.push("display_name");
        }
        if self.schedule.is_some() {
            paths.push("schedule");
        }
        if self.disabled.is_some() {
            paths.push("disabled");
        }
        if self.destination_dataset.is_some() {
            paths.push("destination_dataset_id");
        }
        if self.query.is_some() {
            paths.push("params.query");
        }
        paths.join(",")
    }

    /// Partial transfer config body matching the update mask.
    pub(crate) fn body(&self) -> Value {
        let mut body = serde_json::Map::new();
        if let Some(display_name) = &self.display_name {
            body.insert("displayName".into(), json!(display_name));
        }
        if let Some(schedule) = &self.schedule {
            body.insert("schedule".into(), json!(schedule));
        }
        if let Some(disabled) = self.disabled {
            body.insert("disabled".into(), json!(disabled));
        }
        if let Some(dataset) = &self.destination_dataset {
            body.insert("destinationDatasetId".into(), json!(dataset));
        }
        if let Some(query) = &self.query {
            body.insert("params".into(), json!({ "query": query }));
        }
        Value::Object(body)
    }
}
