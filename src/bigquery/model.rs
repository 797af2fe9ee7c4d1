//! Serde models for the BigQuery v2 wire format. Internal only; the public
//! surface exposes the typed records in `dataset.rs` instead.
//!
//! Numeric 64-bit fields arrive as JSON strings per the API convention and
//! are parsed during mapping.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest {
    pub query: String,
    pub use_legacy_sql: bool,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryResponse {
    pub schema: Option<TableSchema>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    pub total_rows: Option<String>,
    pub total_bytes_processed: Option<String>,
    pub job_complete: Option<bool>,
    pub cache_hit: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableSchema {
    #[serde(default)]
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableFieldSchema {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableRow {
    #[serde(default)]
    pub f: Vec<TableCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TableCell {
    #[serde(default)]
    pub v: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetListResponse {
    #[serde(default)]
    pub datasets: Vec<DatasetListItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetListItem {
    pub dataset_reference: DatasetReference,
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetReference {
    pub dataset_id: String,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetResource {
    pub dataset_reference: DatasetReference,
    pub id: Option<String>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub location: Option<String>,
    pub creation_time: Option<String>,
    pub last_modified_time: Option<String>,
    #[serde(default)]
    pub access: Vec<DatasetAccessEntry>,
    pub is_case_insensitive: Option<bool>,
    pub max_time_travel_hours: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasetAccessEntry {
    pub role: Option<String>,
    pub user_by_email: Option<String>,
    pub group_by_email: Option<String>,
    pub special_group: Option<String>,
    pub domain: Option<String>,
}
