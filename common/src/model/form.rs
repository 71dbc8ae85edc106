//! The owner's public collection form.

use crate::model::SettingsError;
use crate::model::testimonial::VerificationMethod;
use serde::{Deserialize, Serialize};

pub const MAX_HEADLINE_LEN: usize = 120;
pub const MAX_PROMPT_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    pub headline: String,
    pub prompt: String,
    pub collect_email: bool,
    pub allow_video: bool,
    /// Channel applied to every submission made through this form.
    pub verification_method: VerificationMethod,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            headline: "Share your experience".to_string(),
            prompt: "What was it like working with us?".to_string(),
            collect_email: true,
            allow_video: true,
            verification_method: VerificationMethod::Manual,
        }
    }
}

impl FormConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.headline.trim().is_empty() {
            return Err(SettingsError::Empty("headline"));
        }
        if self.headline.chars().count() > MAX_HEADLINE_LEN {
            return Err(SettingsError::TooLong {
                field: "headline",
                max: MAX_HEADLINE_LEN,
            });
        }
        if self.prompt.chars().count() > MAX_PROMPT_LEN {
            return Err(SettingsError::TooLong {
                field: "prompt",
                max: MAX_PROMPT_LEN,
            });
        }
        if self.verification_method == VerificationMethod::Email && !self.collect_email {
            return Err(SettingsError::EmailNotCollected);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_is_valid() {
        assert!(FormConfig::default().validate().is_ok());
    }

    #[test]
    fn email_channel_needs_collected_email() {
        let form = FormConfig {
            collect_email: false,
            verification_method: VerificationMethod::Email,
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(SettingsError::EmailNotCollected));
    }

    #[test]
    fn blank_headline_is_rejected() {
        let form = FormConfig {
            headline: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(SettingsError::Empty("headline")));
    }
}
