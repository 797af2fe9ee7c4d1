//! BigQuery v2 REST client.

use crate::{
    Config, Error, Result,
    bigquery::{
        dataset::{DatasetInfo, DatasetSummary},
        model::{DatasetListResponse, DatasetResource, QueryRequest, QueryResponse},
    },
    debug, rest,
};

/// Client for running queries and inspecting datasets in one project.
pub struct BigqueryClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    location: String,
    access_token: String,
}

/// Result of a query submission.
///
/// For a dry run `rows` is empty and `total_bytes_processed` carries the
/// cost estimate; for a real run the first page of rows is materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    pub total_rows: u64,
    pub total_bytes_processed: Option<i64>,
    pub cache_hit: bool,
    pub complete: bool,
}

impl QueryOutcome {
    pub(crate) fn from_response(response: QueryResponse) -> Self {
        Self {
            columns: response
                .schema
                .map(|s| s.fields.into_iter().map(|f| f.name).collect())
                .unwrap_or_default(),
            rows: response
                .rows
                .into_iter()
                .map(|row| row.f.into_iter().map(|cell| cell.v).collect())
                .collect(),
            total_rows: response
                .total_rows
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            total_bytes_processed: response.total_bytes_processed.and_then(|s| s.parse().ok()),
            cache_hit: response.cache_hit.unwrap_or(false),
            complete: response.job_complete.unwrap_or(true),
        }
    }
}

impl BigqueryClient {
    /// Build a client from connection settings.
    ///
    /// Fails with [`Error::Config`] when project, location, or token is
    /// missing, before any request can be attempted.
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
            endpoint: config.bigquery_endpoint.clone(),
            project_id: config.project_id.clone(),
            location: config.location.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// Run `sql` and wait for the first page of results.
    pub async fn query(&self, sql: &str) -> Result<QueryOutcome> {
        self.run_query(sql, false).await
    }

    /// Validate `sql` and estimate its cost without materializing results.
    pub async fn dry_run(&self, sql: &str) -> Result<QueryOutcome> {
        self.run_query(sql, true).await
    }

    async fn run_query(&self, sql: &str, dry_run: bool) -> Result<QueryOutcome> {
        if sql.trim().is_empty() {
            return Err(Error::InvalidArgument("query text must not be empty"));
        }

        debug!(project = %self.project_id, dry_run, "submitting query");
        let url = format!("{}/projects/{}/queries", self.endpoint, self.project_id);
        let request = QueryRequest {
            query: sql.to_string(),
            use_legacy_sql: false,
            dry_run,
            location: Some(self.location.clone()),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;
        let body: QueryResponse = rest::decode(response).await?;
        Ok(QueryOutcome::from_response(body))
    }

    /// Enumerate every dataset in the project (short form).
    pub async fn list_datasets(&self) -> Result<Vec<DatasetSummary>> {
        let url = format!("{}/projects/{}/datasets", self.endpoint, self.project_id);
        let mut summaries = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).bearer_auth(&self.access_token);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }
            let page: DatasetListResponse = rest::decode(request.send().await?).await?;
            summaries.extend(page.datasets.into_iter().map(DatasetSummary::from_item));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = summaries.len(), "listed datasets");
        Ok(summaries)
    }

    /// Fetch one dataset as a typed record.
    pub async fn dataset(&self, dataset_id: &str) -> Result<DatasetInfo> {
        if dataset_id.is_empty() {
            return Err(Error::InvalidArgument("dataset_id must not be empty"));
        }

        let url = format!(
            "{}/projects/{}/datasets/{}",
            self.endpoint, self.project_id, dataset_id
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let resource: DatasetResource = rest::decode(response).await?;
        Ok(DatasetInfo::from_resource(resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path, query_param, query_param_is_missing},
    };

    fn client() -> BigqueryClient {
        BigqueryClient::new(&Config::new("proj", "eu", "token")).unwrap()
    }

    fn client_for(endpoint: String) -> BigqueryClient {
        let mut config = Config::new("proj", "eu", "token");
        config.bigquery_endpoint = endpoint;
        BigqueryClient::new(&config).unwrap()
    }

    #[test]
    fn construction_requires_project_location_and_token() {
        assert!(matches!(
            BigqueryClient::new(&Config::new("", "eu", "token")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BigqueryClient::new(&Config::new("proj", "", "token")),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BigqueryClient::new(&Config::new("proj", "eu", "")),
            Err(Error::Config(_))
        ));
        assert!(BigqueryClient::new(&Config::new("proj", "eu", "token")).is_ok());
    }

    #[tokio::test]
    async fn empty_query_is_rejected_locally() {
        let err = client().query("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn outcome_maps_rows_and_schema() {
        let wire = json!({
            "schema": {"fields": [{"name": "id", "type": "INT64"}, {"name": "name", "type": "STRING"}]},
            "rows": [
                {"f": [{"v": "1"}, {"v": "alpha"}]},
                {"f": [{"v": "2"}, {"v": "beta"}]}
            ],
            "totalRows": "2",
            "totalBytesProcessed": "1024",
            "jobComplete": true,
            "cacheHit": false
        });
        let response = serde_json::from_value(wire).unwrap();
        let outcome = QueryOutcome::from_response(response);

        assert_eq!(outcome.columns, vec!["id", "name"]);
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[1][1], json!("beta"));
        assert_eq!(outcome.total_rows, 2);
        assert_eq!(outcome.total_bytes_processed, Some(1024));
        assert!(outcome.complete);
        assert!(!outcome.cache_hit);
    }

    #[tokio::test]
    async fn query_posts_request_and_maps_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/proj/queries"))
            .and(body_json(json!({
                "query": "SELECT id FROM p.d.t",
                "useLegacySql": false,
                "dryRun": false,
                "location": "eu"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "schema": {"fields": [{"name": "id", "type": "INT64"}]},
                "rows": [{"f": [{"v": "7"}]}],
                "totalRows": "1",
                "jobComplete": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(server.uri())
            .query("SELECT id FROM p.d.t")
            .await
            .unwrap();
        assert_eq!(outcome.columns, vec!["id"]);
        assert_eq!(outcome.rows, vec![vec![json!("7")]]);
        assert_eq!(outcome.total_rows, 1);
    }

    #[tokio::test]
    async fn dry_run_flag_goes_over_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/proj/queries"))
            .and(body_json(json!({
                "query": "SELECT 1",
                "useLegacySql": false,
                "dryRun": true,
                "location": "eu"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalBytesProcessed": "2048",
                "jobComplete": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(server.uri()).dry_run("SELECT 1").await.unwrap();
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.total_bytes_processed, Some(2048));
    }

    #[tokio::test]
    async fn dataset_listing_chains_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/datasets"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "datasets": [
                    {"datasetReference": {"datasetId": "raw"}},
                    {"datasetReference": {"datasetId": "staging"}}
                ],
                "nextPageToken": "page-2"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/proj/datasets"))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "datasets": [{"datasetReference": {"datasetId": "analytics"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summaries = client_for(server.uri()).list_datasets().await.unwrap();
        let ids: Vec<_> = summaries.iter().map(|s| s.dataset_id.as_str()).collect();
        assert_eq!(ids, vec!["raw", "staging", "analytics"]);
    }

    #[tokio::test]
    async fn api_error_envelope_maps_to_error_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/proj/queries"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Access Denied", "status": "PERMISSION_DENIED"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(server.uri()).query("SELECT 1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Api { status: 403, ref message } if message == "Access Denied"
        ));
    }

    #[test]
    fn dry_run_outcome_carries_estimate_only() {
        let wire = json!({
            "totalBytesProcessed": "5242880",
            "jobComplete": true
        });
        let response = serde_json::from_value(wire).unwrap();
        let outcome = QueryOutcome::from_response(response);

        assert!(outcome.rows.is_empty());
        assert!(outcome.columns.is_empty());
        assert_eq!(outcome.total_bytes_processed, Some(5_242_880));
    }
}
