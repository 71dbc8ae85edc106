//! Output of the text analyzer and the local estimate used when it is absent.

use crate::model::testimonial::{MAX_SCORE, Sentiment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasoning attached to every locally estimated analysis.
pub const ESTIMATE_REASONING: &str =
    "Estimated locally from testimonial length; the analyzer was unavailable.";

const ESTIMATE_BASE: u32 = 60;
const ESTIMATE_CEILING: u32 = 90;
const ESTIMATE_POSITIVE_FROM: u8 = 75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub score: u8,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub reasoning: String,
    pub is_authentic: bool,
    /// Set only by [`Analysis::estimate`].
    #[serde(default)]
    pub estimated: bool,
}

impl Analysis {
    /// The single fallback policy for a missing analyzer result.
    ///
    /// Longer testimonials score higher, from 60 up to 90 at sixty words.
    pub fn estimate(text: &str) -> Analysis {
        let words = text.split_whitespace().count() as u32;
        let score = (ESTIMATE_BASE + words.min(60) / 2).min(ESTIMATE_CEILING) as u8;
        let sentiment = if score >= ESTIMATE_POSITIVE_FROM {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        };
        Analysis {
            score,
            sentiment,
            keywords: Vec::new(),
            reasoning: ESTIMATE_REASONING.to_string(),
            is_authentic: true,
            estimated: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("analyzer score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),
    #[error("analyzer returned unknown sentiment '{0}'")]
    UnknownSentiment(String),
    #[error("analyzer returned no reasoning")]
    MissingReasoning,
}

/// The analyzer's reply as it arrives on the wire, before any checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub score: f64,
    pub sentiment: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default = "default_authentic")]
    pub is_authentic: bool,
}

fn default_authentic() -> bool {
    true
}

impl TryFrom<RawAnalysis> for Analysis {
    type Error = AnalysisError;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        if !raw.score.is_finite() || raw.score < 0.0 || raw.score > f64::from(MAX_SCORE) {
            return Err(AnalysisError::ScoreOutOfRange(raw.score));
        }
        let sentiment = raw
            .sentiment
            .trim()
            .parse::<Sentiment>()
            .map_err(|_| AnalysisError::UnknownSentiment(raw.sentiment.clone()))?;
        let reasoning = raw.reasoning.trim().to_string();
        if reasoning.is_empty() {
            return Err(AnalysisError::MissingReasoning);
        }
        let keywords = raw
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(Analysis {
            score: raw.score.round() as u8,
            sentiment,
            keywords,
            reasoning,
            is_authentic: raw.is_authentic,
            estimated: false,
        })
    }
}
