//! Display preferences for the public testimonial wall.
//!
//! Purely a rendering instruction: nothing here changes a Testimonial Record.
//! The backend only uses `min_score` and `max_items` to trim the public list.

use crate::model::SettingsError;
use serde::{Deserialize, Serialize};

pub const MAX_WIDGET_ITEMS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetLayout {
    #[default]
    Grid,
    Carousel,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetTheme {
    #[default]
    Light,
    Dark,
    Lime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub layout: WidgetLayout,
    pub theme: WidgetTheme,
    pub show_avatar: bool,
    pub show_company: bool,
    pub show_score: bool,
    pub show_date: bool,
    /// Records scoring below this are left off the wall. Unscored records always show.
    pub min_score: u8,
    pub max_items: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            layout: WidgetLayout::Grid,
            theme: WidgetTheme::Light,
            show_avatar: true,
            show_company: true,
            show_score: false,
            show_date: true,
            min_score: 0,
            max_items: 12,
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_score > 100 {
            return Err(SettingsError::OutOfRange {
                field: "minScore",
                min: 0,
                max: 100,
            });
        }
        if self.max_items == 0 || self.max_items > MAX_WIDGET_ITEMS {
            return Err(SettingsError::OutOfRange {
                field: "maxItems",
                min: 1,
                max: MAX_WIDGET_ITEMS,
            });
        }
        Ok(())
    }

    /// Whether a record with `score` passes the minimum score filter.
    pub fn admits(&self, score: Option<u8>) -> bool {
        score.is_none_or(|s| s >= self.min_score)
    }
}
