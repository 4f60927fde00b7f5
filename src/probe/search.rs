//! Search-engine index lookup over HTTP.

use super::{ProbeError, ReputationProbe};
use crate::config::ProbeConfig;
use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use std::time::Duration;

pub struct SearchIndexProbe {
    client: reqwest::Client,
    endpoint: String,
    result_re: Regex,
}

impl SearchIndexProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let result_re =
            Regex::new(&config.result_pattern).map_err(|e| ProbeError::Config(e.to_string()))?;
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ProbeError::Config(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            result_re,
        })
    }
}

#[async_trait]
impl ReputationProbe for SearchIndexProbe {
    async fn is_indexed(&self, url: &str) -> Result<bool, ProbeError> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("q", url), ("num", "1")])
            .send()
            .await?;
        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProbeError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }
        let body = res.text().await?;
        Ok(self.result_re.is_match(&body))
    }

    fn name(&self) -> &'static str {
        "search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeMode;
    use axum::extract::Query;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;

    async fn search(Query(params): Query<HashMap<String, String>>) -> String {
        match params.get("q").map(String::as_str) {
            Some("http://known.example/") => r#"<a class="result-link" href="x">hit</a>"#.to_string(),
            _ => "<p>no results</p>".to_string(),
        }
    }

    async fn spawn_endpoint() -> String {
        let app = Router::new()
            .route("/search", get(search))
            .route("/limited", get(|| async { (AxumStatus::TOO_MANY_REQUESTS, "slow down") }))
            .route("/broken", get(|| async { (AxumStatus::BAD_GATEWAY, "") }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn probe(base: &str, path: &str, timeout_ms: u64) -> SearchIndexProbe {
        SearchIndexProbe::new(&ProbeConfig {
            mode: ProbeMode::Search,
            endpoint: format!("{base}{path}"),
            timeout_ms,
            result_pattern: "result-link".to_string(),
            ..ProbeConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn positive_and_negative_results() {
        let base = spawn_endpoint().await;
        let p = probe(&base, "/search", 2000);
        assert!(p.is_indexed("http://known.example/").await.unwrap());
        assert!(!p.is_indexed("http://unknown.example/").await.unwrap());
    }

    #[tokio::test]
    async fn failures_are_typed() {
        let base = spawn_endpoint().await;
        let err = probe(&base, "/limited", 2000).is_indexed("u").await.unwrap_err();
        assert!(matches!(err, ProbeError::RateLimited));
        let err = probe(&base, "/broken", 2000).is_indexed("u").await.unwrap_err();
        assert!(matches!(err, ProbeError::Status(502)));
        let err = probe(&base, "/slow", 100).is_indexed("u").await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout));
    }

    #[tokio::test]
    async fn unreachable_endpoint_errors() {
        let p = probe("http://127.0.0.1:1", "/search", 500);
        assert!(p.is_indexed("u").await.is_err());
    }
}
