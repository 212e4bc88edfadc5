//! Search-index strategy: versions from a solr search endpoint

use serde::Deserialize;
use tracing::warn;

use crate::config;
use crate::dependency::Coordinate;
use crate::version::error::SourceError;
use crate::version::ordering::VersionOrdering;
use crate::version::source::VersionSource;
use crate::version::types::VersionSet;

/// Response from the solr search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(rename = "latestVersion")]
    latest_version: Option<String>,
    #[serde(default)]
    v: Vec<String>,
}

/// Queries a central search index with `g:<group> AND a:<artifact>` and
/// reads the first matching document.
pub struct SearchSource {
    client: reqwest::Client,
    endpoint: String,
    id: String,
    ordering: VersionOrdering,
}

impl SearchSource {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        id: impl Into<String>,
        ordering: VersionOrdering,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            id: id.into(),
            ordering,
        }
    }
}

#[async_trait::async_trait]
impl VersionSource for SearchSource {
    fn source_id(&self) -> &str {
        &self.id
    }

    async fn fetch_versions(&self, coordinate: &Coordinate) -> Result<VersionSet, SourceError> {
        let query = format!(
            "g:{} AND a:{}",
            coordinate.group_id, coordinate.artifact_id
        );

        let rows = config::SEARCH_ROWS.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("rows", rows.as_str()),
                ("wt", "json"),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(coordinate.to_string()));
        }

        if !status.is_success() {
            warn!("search index returned status {}: {}", status, self.endpoint);
            return Err(SourceError::Status(status));
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse search response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        let Some(doc) = search.response.docs.into_iter().next() else {
            return Ok(VersionSet::empty());
        };

        let set = match doc.latest_version {
            Some(latest) if !latest.is_empty() => {
                // The index names its own latest; trust it even when the
                // embedded version list is absent or disagrees.
                let versions = if doc.v.is_empty() {
                    vec![latest.clone()]
                } else {
                    doc.v
                };
                VersionSet::with_reported_latest(versions, latest, self.ordering)
            }
            _ => VersionSet::from_unsorted(doc.v, self.ordering),
        };

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn coord() -> Coordinate {
        Coordinate::new("com.google.guava", "guava")
    }

    fn source(endpoint: &str) -> SearchSource {
        SearchSource::new(
            reqwest::Client::new(),
            endpoint,
            "central",
            VersionOrdering::Lexicographic,
        )
    }

    #[tokio::test]
    async fn fetch_versions_reads_first_doc_with_version_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "g:com.google.guava AND a:guava".into()),
                Matcher::UrlEncoded("rows".into(), "20".into()),
                Matcher::UrlEncoded("wt".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "response": {
                        "docs": [
                            {"g": "com.google.guava", "a": "guava",
                             "latestVersion": "33.0.0-jre",
                             "v": ["32.0.0-jre", "33.0.0-jre", "31.1-jre"]},
                            {"g": "com.google.guava", "a": "guava-gwt",
                             "latestVersion": "99.0"}
                        ]
                    }
                }"#,
            )
            .create_async()
            .await;

        let result = source(&format!("{}/solrsearch/select", server.url()))
            .fetch_versions(&coord())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            result.versions(),
            ["31.1-jre", "32.0.0-jre", "33.0.0-jre"]
        );
        assert_eq!(result.latest(), Some("33.0.0-jre"));
    }

    #[tokio::test]
    async fn fetch_versions_uses_reported_latest_without_version_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"response": {"docs": [{"g": "com.google.guava", "a": "guava", "latestVersion": "33.0.0-jre"}]}}"#,
            )
            .create_async()
            .await;

        let result = source(&format!("{}/solrsearch/select", server.url()))
            .fetch_versions(&coord())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.versions(), ["33.0.0-jre"]);
        assert_eq!(result.latest(), Some("33.0.0-jre"));
    }

    #[tokio::test]
    async fn fetch_versions_yields_empty_set_when_nothing_matches() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": {"docs": []}}"#)
            .create_async()
            .await;

        let result = source(&format!("{}/solrsearch/select", server.url()))
            .fetch_versions(&coord())
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn fetch_versions_rejects_unparseable_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>definitely not json</html>")
            .create_async()
            .await;

        let result = source(&format!("{}/solrsearch/select", server.url()))
            .fetch_versions(&coord())
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(SourceError::InvalidResponse(_))));
    }
}
