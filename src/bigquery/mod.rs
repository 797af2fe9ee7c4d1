//! BigQuery query execution and dataset inspection.
//!
//! Thin convenience layer over the BigQuery v2 REST API: run a query (for
//! real or as a dry run), enumerate datasets, and fetch one dataset as a
//! typed record. Auth, retry, and transport tuning are the caller's concern;
//! the client only needs a ready bearer token.
//!
//! Modules:
//! - `client`  : `BigqueryClient` with the query / dataset operations.
//! - `dataset` : Typed `DatasetInfo` / `DatasetSummary` records.
//! - `model`   : Private serde models mirroring the wire format.

pub mod client;
pub mod dataset;
pub(crate) mod model;

pub use client::{BigqueryClient, QueryOutcome};
pub use dataset::{AccessEntry, DatasetInfo, DatasetSummary};
