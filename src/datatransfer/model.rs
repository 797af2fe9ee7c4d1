//! Serde models for the Data Transfer v1 wire format. Internal only.

use crate::datatransfer::scheduled_query::TransferState;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub data_source_id: String,
    pub destination_dataset_id: Option<String>,
    pub schedule: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    pub state: Option<TransferState>,
    pub update_time: Option<String>,
    pub next_run_time: Option<String>,
    pub dataset_region: Option<String>,
    pub owner_info: Option<UserInfo>,
    /// Data-source specific key/value bag; for scheduled queries it holds
    /// `query`, `partitioning_field`, `destination_table_name_template`,
    /// and `write_disposition`.
    #[serde(default)]
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserInfo {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListTransferConfigsResponse {
    #[serde(default)]
    pub transfer_configs: Vec<TransferConfig>,
    pub next_page_token: Option<String>,
}
