//! The Testimonial Record and the shapes used to create one.
//!
//! A [`Testimonial`] is a single piece of social proof submitted about an owner
//! (the business account). Its `status` is governed by the rules in
//! [`crate::lifecycle`]; only `verified` records are shown publicly and fed to
//! the trust score in [`crate::score`].
//!
//! [`TestimonialDraft`] is what a submitter sends. It has to pass
//! [`TestimonialDraft::validate`] before anything touches the analyzer or the
//! store.

use crate::model::UnknownVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest value a quality score can take.
pub const MAX_SCORE: u8 = 100;

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_COMPANY_LEN: usize = 120;
pub const MAX_TEXT_LEN: usize = 5000;

/// The mechanism asserting a testimonial's authenticity. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
    #[default]
    Manual,
    Email,
    Linkedin,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::Manual => "manual",
            VerificationMethod::Email => "email",
            VerificationMethod::Linkedin => "linkedin",
        }
    }
}

impl FromStr for VerificationMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(VerificationMethod::Manual),
            "email" => Ok(VerificationMethod::Email),
            "linkedin" => Ok(VerificationMethod::Linkedin),
            other => Err(UnknownVariant::new("verification method", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonialStatus {
    /// Submitted through the public form, waiting for the owner.
    Pending,
    /// Waiting for the client to click the emailed confirmation link.
    PendingVerification,
    /// Terminal. Publicly displayed and counted by the trust score.
    Verified,
    /// Terminal and hidden. Reserved: nothing transitions here yet.
    Rejected,
}

impl TestimonialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonialStatus::Pending => "pending",
            TestimonialStatus::PendingVerification => "pending_verification",
            TestimonialStatus::Verified => "verified",
            TestimonialStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            TestimonialStatus::Pending | TestimonialStatus::PendingVerification
        )
    }
}

impl fmt::Display for TestimonialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestimonialStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TestimonialStatus::Pending),
            "pending_verification" => Ok(TestimonialStatus::PendingVerification),
            "verified" => Ok(TestimonialStatus::Verified),
            "rejected" => Ok(TestimonialStatus::Rejected),
            other => Err(UnknownVariant::new("status", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl FromStr for Sentiment {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Neutral" => Ok(Sentiment::Neutral),
            "Negative" => Ok(Sentiment::Negative),
            other => Err(UnknownVariant::new("sentiment", other)),
        }
    }
}

/// Cosmetic card colour. The owner may change it at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    #[default]
    White,
    Lime,
    Dark,
}

impl CardStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStyle::White => "white",
            CardStyle::Lime => "lime",
            CardStyle::Dark => "dark",
        }
    }
}

impl FromStr for CardStyle {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(CardStyle::White),
            "lime" => Ok(CardStyle::Lime),
            "dark" => Ok(CardStyle::Dark),
            other => Err(UnknownVariant::new("card style", other)),
        }
    }
}

/// Who submitted the record. Decides the initial status of manual and
/// LinkedIn submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The owner, through the dashboard "Add Proof" action.
    Owner,
    /// An external reviewer, through the public collection form.
    Reviewer,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Owner => "owner",
            Origin::Reviewer => "reviewer",
        }
    }
}

impl FromStr for Origin {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Origin::Owner),
            "reviewer" => Ok(Origin::Reviewer),
            other => Err(UnknownVariant::new("origin", other)),
        }
    }
}

/// A persisted Testimonial Record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub owner_id: String,
    pub client_name: String,
    pub client_company: String,
    pub client_email: Option<String>,
    pub text: String,
    pub video_ref: Option<String>,
    pub avatar_ref: Option<String>,
    pub verification_method: VerificationMethod,
    pub status: TestimonialStatus,
    /// Quality score in `0..=100`, absent for video-only submissions.
    pub score: Option<u8>,
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub analysis_reasoning: Option<String>,
    /// `true` when `score` came from the local estimate instead of the analyzer.
    #[serde(default)]
    pub score_estimated: bool,
    pub card_style: CardStyle,
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    /// Secret behind the email confirmation link. Never serialized.
    #[serde(skip)]
    pub verification_token: Option<String>,
    #[serde(skip)]
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl Testimonial {
    pub fn has_video(&self) -> bool {
        self.video_ref
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }

    pub fn is_public(&self) -> bool {
        self.status == TestimonialStatus::Verified
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("reviewer name is required")]
    MissingName,
    #[error("testimonial text is required when no video is attached")]
    MissingContent,
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("a client email is required for email verification")]
    EmailRequired,
}

/// A submission, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDraft {
    pub client_name: String,
    #[serde(default)]
    pub client_company: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub video_ref: Option<String>,
    #[serde(default)]
    pub avatar_ref: Option<String>,
    #[serde(default)]
    pub verification_method: VerificationMethod,
    #[serde(default)]
    pub card_style: CardStyle,
}

impl TestimonialDraft {
    /// Trims every field, drops blank optional references and checks the
    /// submission rules. Returns the normalized draft.
    pub fn validate(self) -> Result<TestimonialDraft, DraftError> {
        let draft = TestimonialDraft {
            client_name: self.client_name.trim().to_string(),
            client_company: self.client_company.trim().to_string(),
            client_email: non_blank(self.client_email),
            text: self.text.trim().to_string(),
            video_ref: non_blank(self.video_ref),
            avatar_ref: non_blank(self.avatar_ref),
            verification_method: self.verification_method,
            card_style: self.card_style,
        };

        if draft.client_name.is_empty() {
            return Err(DraftError::MissingName);
        }
        if draft.text.is_empty() && draft.video_ref.is_none() {
            return Err(DraftError::MissingContent);
        }
        check_len("clientName", &draft.client_name, MAX_NAME_LEN)?;
        check_len("clientCompany", &draft.client_company, MAX_COMPANY_LEN)?;
        check_len("text", &draft.text, MAX_TEXT_LEN)?;

        match &draft.client_email {
            Some(email) if !looks_like_email(email) => {
                return Err(DraftError::InvalidEmail(email.clone()));
            }
            None if draft.verification_method == VerificationMethod::Email => {
                return Err(DraftError::EmailRequired);
            }
            _ => {}
        }

        Ok(draft)
    }

    pub fn has_video(&self) -> bool {
        self.video_ref.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), DraftError> {
    if value.chars().count() > max {
        return Err(DraftError::TooLong { field, max });
    }
    Ok(())
}

/// Loose structural check: one `@`, a non-empty local part and a dotted domain.
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TestimonialDraft {
        TestimonialDraft {
            client_name: "  Ada Lovelace ".to_string(),
            client_company: "Analytical Engines".to_string(),
            text: "Great work, shipped on time.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn validate_trims_and_keeps_valid_draft() {
        let d = draft().validate().unwrap();
        assert_eq!(d.client_name, "Ada Lovelace");
        assert_eq!(d.video_ref, None);
    }

    #[test]
    fn empty_text_without_video_is_rejected() {
        let mut d = draft();
        d.text = "   ".to_string();
        assert_eq!(d.validate(), Err(DraftError::MissingContent));
    }

    #[test]
    fn empty_text_with_video_is_accepted() {
        let mut d = draft();
        d.text = String::new();
        d.video_ref = Some("videos/abc.mp4".to_string());
        assert!(d.validate().is_ok());
    }

    #[test]
    fn blank_video_ref_does_not_count_as_video() {
        let mut d = draft();
        d.text = String::new();
        d.video_ref = Some("  ".to_string());
        assert_eq!(d.validate(), Err(DraftError::MissingContent));
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut d = draft();
        d.client_name = " ".to_string();
        assert_eq!(d.validate(), Err(DraftError::MissingName));
    }

    #[test]
    fn email_channel_requires_an_address() {
        let mut d = draft();
        d.verification_method = VerificationMethod::Email;
        assert_eq!(d.clone().validate(), Err(DraftError::EmailRequired));

        d.client_email = Some("not-an-email".to_string());
        assert_eq!(
            d.clone().validate(),
            Err(DraftError::InvalidEmail("not-an-email".to_string()))
        );

        d.client_email = Some("ada@engines.io".to_string());
        assert!(d.validate().is_ok());
    }

    #[test]
    fn overlong_text_is_rejected() {
        let mut d = draft();
        d.text = "a".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            d.validate(),
            Err(DraftError::TooLong {
                field: "text",
                max: MAX_TEXT_LEN
            })
        );
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@@b.co"));
        assert!(!looks_like_email("a b@c.io"));
    }

    #[test]
    fn enums_round_trip_through_their_storage_strings() {
        for status in [
            TestimonialStatus::Pending,
            TestimonialStatus::PendingVerification,
            TestimonialStatus::Verified,
            TestimonialStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<TestimonialStatus>(), Ok(status));
        }
        assert!("archived".parse::<TestimonialStatus>().is_err());
        assert!("LinkedIn".parse::<VerificationMethod>().is_err());
    }

    #[test]
    fn token_is_never_serialized() {
        let t = Testimonial {
            id: "t1".to_string(),
            owner_id: "o1".to_string(),
            client_name: "Ada".to_string(),
            client_company: String::new(),
            client_email: Some("ada@engines.io".to_string()),
            text: "Great".to_string(),
            video_ref: None,
            avatar_ref: None,
            verification_method: VerificationMethod::Email,
            status: TestimonialStatus::PendingVerification,
            score: Some(80),
            sentiment: Some(Sentiment::Positive),
            keywords: vec![],
            analysis_reasoning: None,
            score_estimated: false,
            card_style: CardStyle::Lime,
            origin: Origin::Owner,
            created_at: Utc::now(),
            verified_at: None,
            verification_token: Some("secret-token".to_string()),
            token_expires_at: None,
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(json.contains("\"status\":\"pending_verification\""));
        assert!(json.contains("\"cardStyle\":\"lime\""));
    }
}
