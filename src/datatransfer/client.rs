//! Data Transfer v1 REST client, narrowed to scheduled queries.

use crate::{
    Config, Error, Result, debug,
    datatransfer::{
        model::{ListTransferConfigsResponse, TransferConfig},
        scheduled_query::{ScheduledQuery, ScheduledQueryPatch, validate_config_id},
    },
    rest,
};
use moka::future::Cache;
use std::{sync::Arc, time::Duration};

/// The only data source this client cares about; other transfer kinds
/// (e.g. cross-region copies) are filtered out of listings.
const SCHEDULED_QUERY_SOURCE: &str = "scheduled_query";

/// How long a cached listing stays fresh.
const LISTING_TTL: Duration = Duration::from_secs(300);

/// Client for inspecting and updating scheduled queries in one
/// project/location.
pub struct DatatransferClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    location: String,
    access_token: String,
    /// Listing is expensive (one GET per config to resolve the owner), so
    /// the assembled result is memoized, keyed by parent resource name.
    listing: Cache<String, Arc<Vec<ScheduledQuery>>>,
}

impl DatatransferClient {
    /// Build a client from connection settings.
    pub fn new(config: &Config) -> Result<Self> {
        if config.project_id.is_empty() || config.location.is_empty() {
            return Err(Error::Config(
                "project_id and location must be set".to_string(),
            ));
        }
        if config.access_token.is_empty() {
            return Err(Error::Config("access_token must be set".to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.datatransfer_endpoint.clone(),
            project_id: config.project_id.clone(),
            location: config.location.clone(),
            access_token: config.access_token.clone(),
            listing: Cache::builder()
                .max_capacity(1)
                .time_to_live(LISTING_TTL)
                .build(),
        })
    }

    fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }

    /// Fetch one scheduled query by its full resource name.
    ///
    /// The id is validated locally first, so a malformed id fails with
    /// [`Error::MalformedConfigId`] without a request being sent.
    pub async fn scheduled_query(&self, id: &str) -> Result<ScheduledQuery> {
        validate_config_id(id)?;

        let url = format!("{}/{}", self.endpoint, id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let config: TransferConfig = rest::decode(response).await?;
        Ok(ScheduledQuery::from_config(config))
    }

    /// List every scheduled query in the project/location.
    ///
    /// The list endpoint omits owner info, so each config is re-fetched
    /// individually; the assembled listing is cached for [`LISTING_TTL`].
    pub async fn scheduled_queries(&self) -> Result<Vec<ScheduledQuery>> {
        let parent = self.parent();
        if let Some(cached) = self.listing.get(&parent).await {
            debug!(%parent, "serving scheduled queries from cache");
            return Ok(cached.as_ref().clone());
        }

        let queries = self.fetch_all(&parent).await?;
        self.listing
            .insert(parent, Arc::new(queries.clone()))
            .await;
        Ok(queries)
    }

    async fn fetch_all(&self, parent: &str) -> Result<Vec<ScheduledQuery>> {
        let url = format!("{}/{}/transferConfigs", self.endpoint, parent);
        let mut queries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).bearer_auth(&self.access_token);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }
            let page: ListTransferConfigsResponse =
                rest::decode(request.send().await?).await?;

            for config in page.transfer_configs {
                if config.data_source_id != SCHEDULED_QUERY_SOURCE {
                    continue;
                }
                // Owner email only comes back from GET.
                queries.push(self.scheduled_query(&config.name).await?);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = queries.len(), %parent, "listed scheduled queries");
        Ok(queries)
    }

    /// Scheduled queries whose owner matches `email`.
    pub async fn scheduled_queries_by_owner(&self, email: &str) -> Result<Vec<ScheduledQuery>> {
        if email.is_empty() {
            return Err(Error::InvalidArgument("owner email must not be empty"));
        }

        let queries = self.scheduled_queries().await?;
        Ok(queries
            .into_iter()
            .filter(|q| q.owner_email.as_deref() == Some(email))
            .collect())
    }

    /// Apply a typed partial update to a scheduled query and return the
    /// updated record. The update mask is derived from the populated patch
    /// fields; an empty patch fails locally.
    pub async fn update_scheduled_query(
        &self,
        id: &str,
        patch: &ScheduledQueryPatch,
    ) -> Result<ScheduledQuery> {
        validate_config_id(id)?;
        if patch.is_empty() {
            return Err(Error::InvalidArgument("patch must set at least one field"));
        }

        let url = format!("{}/{}", self.endpoint, id);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.access_token)
            .query(&[("updateMask", patch.update_mask())])
            .json(&patch.body())
            .send()
            .await?;
        let config: TransferConfig = rest::decode(response).await?;

        // The cached listing is stale now.
        if self.listing.remove(&self.parent()).await.is_some() {
            debug!(%id, "invalidated scheduled query listing after update");
        }
        Ok(ScheduledQuery::from_config(config))
    }
}
