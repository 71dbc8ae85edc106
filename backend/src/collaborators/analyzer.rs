use crate::error::AppError;
use async_trait::async_trait;
use common::model::analysis::{Analysis, RawAnalysis};
use log::warn;
use serde::Serialize;
use std::time::Duration;

const ANALYZER_TIMEOUT: Duration = Duration::from_secs(15);

/// Scores a testimonial's text.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Analysis, AppError>;
}

/// Posts `{"text": ...}` to a JSON endpoint fronting the generative model and
/// expects `{score, sentiment, keywords, reasoning, isAuthentic}` back.
pub struct HttpAnalyzer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

impl HttpAnalyzer {
    pub fn new(endpoint: String, api_key: Option<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(ANALYZER_TIMEOUT)
            .build()
            .map_err(|e| AppError::Dependency(format!("analyzer client: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Analysis, AppError> {
        let mut request = self.client.post(&self.endpoint).json(&AnalyzeRequest { text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let raw: RawAnalysis = request
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::Dependency(format!("analyzer request failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::Dependency(format!("analyzer reply unreadable: {e}")))?;
        Ok(Analysis::try_from(raw)?)
    }
}

/// Used when no analyzer endpoint is configured.
pub struct NoAnalyzer;

#[async_trait]
impl Analyzer for NoAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<Analysis, AppError> {
        Err(AppError::Dependency("no analyzer configured".to_string()))
    }
}

/// Asks `analyzer`, falling back to [`Analysis::estimate`] on any failure,
/// including a reply that fails validation.
pub async fn analyze_or_estimate(analyzer: &dyn Analyzer, text: &str) -> Analysis {
    match analyzer.analyze(text).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("analyzer unavailable, estimating score locally: {}", e);
            Analysis::estimate(text)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use common::model::testimonial::Sentiment;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a fixed score, or fails when `score` is `None`. Counts calls.
    pub struct FixedAnalyzer {
        pub score: Option<u8>,
        pub calls: Arc<AtomicUsize>,
    }

    impl FixedAnalyzer {
        pub fn scoring(score: u8) -> Self {
            Self {
                score: Some(score),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing() -> Self {
            Self {
                score: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Analyzer for FixedAnalyzer {
        async fn analyze(&self, _text: &str) -> Result<Analysis, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.score {
                Some(score) => Ok(Analysis {
                    score,
                    sentiment: Sentiment::Positive,
                    keywords: vec!["reliable".to_string()],
                    reasoning: "Specific praise.".to_string(),
                    is_authentic: true,
                    estimated: false,
                }),
                None => Err(AppError::Dependency("analyzer offline".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FixedAnalyzer;
    use super::*;
    use common::model::analysis::ESTIMATE_REASONING;

    #[actix_web::test]
    async fn analyzer_result_is_used_when_available() {
        let analysis = analyze_or_estimate(&FixedAnalyzer::scoring(93), "Great").await;
        assert_eq!(analysis.score, 93);
        assert!(!analysis.estimated);
    }

    #[actix_web::test]
    async fn failure_falls_back_to_the_estimate() {
        let analysis = analyze_or_estimate(&FixedAnalyzer::failing(), "Great work").await;
        assert!(analysis.estimated);
        assert_eq!(analysis.reasoning, ESTIMATE_REASONING);

        let analysis = analyze_or_estimate(&NoAnalyzer, "Great work").await;
        assert!(analysis.estimated);
    }
}
