use crate::{Error, Result};
use confique::Config as _;

/// Connection settings shared by both service clients.
///
/// Token acquisition is out of scope: callers supply a ready OAuth2 bearer
/// token (e.g. from `gcloud auth print-access-token` or a metadata server).
#[derive(Debug, Clone, confique::Config)]
pub struct Config {
    #[config(env = "BQKIT_PROJECT_ID")]
    pub project_id: String,

    #[config(env = "BQKIT_LOCATION")]
    pub location: String,

    #[config(env = "BQKIT_ACCESS_TOKEN")]
    pub access_token: String,

    #[config(
        env = "BQKIT_BIGQUERY_ENDPOINT",
        default = "https://bigquery.googleapis.com/bigquery/v2"
    )]
    pub bigquery_endpoint: String,

    #[config(
        env = "BQKIT_DATATRANSFER_ENDPOINT",
        default = "https://bigquerydatatransfer.googleapis.com/v1"
    )]
    pub datatransfer_endpoint: String,
}

impl Config {
    /// Load every value from the current environment.
    pub fn from_env() -> Result<Self> {
        Self::builder()
            .env()
            .load()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Build a config explicitly, with default endpoints.
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            access_token: access_token.into(),
            bigquery_endpoint: "https://bigquery.googleapis.com/bigquery/v2".into(),
            datatransfer_endpoint: "https://bigquerydatatransfer.googleapis.com/v1".into(),
        }
    }
}
