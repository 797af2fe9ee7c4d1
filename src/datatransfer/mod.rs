//! Scheduled query (data transfer) management.
//!
//! Convenience layer over the BigQuery Data Transfer v1 REST API, narrowed
//! to the `scheduled_query` data source: fetch one scheduled query, list
//! them all, filter by owner, and patch one with a typed update.
//!
//! Config ids are validated against the
//! `projects/{id}/locations/{loc}/transferConfigs/{id}` shape before any
//! request goes out, so a malformed id never costs a round trip.
//!
//! Modules:
//! - `client`          : `DatatransferClient` with the list / get / update operations.
//! - `scheduled_query` : Typed `ScheduledQuery` record, patch type, id validation.
//! - `model`           : Private serde models mirroring the wire format.

pub mod client;
pub(crate) mod model;
pub mod scheduled_query;

pub use client::DatatransferClient;
pub use scheduled_query::{
    ScheduledQuery, ScheduledQueryPatch, TransferState, validate_config_id,
};
