//! Script configuration
//!
//! Every field has a default matching the site's markup, so an empty JSON
//! object is a complete configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ScriptError;
use crate::news::{self, NewsItem};

/// Automatic-advance period of the carousel
pub const DEFAULT_INTERVAL_MS: u64 = 4500;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    pub carousel: CarouselConfig,
    pub news: NewsConfig,
    pub contact: ContactConfig,
}

impl ScriptConfig {
    /// Parse a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Which arrow-key presses drive the carousel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardScope {
    /// Any arrow key pressed anywhere in the document
    #[default]
    Document,
    /// Only while the pointer or focus is inside the carousel root
    Root,
}

/// Carousel markup hooks and timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub viewport_id: String,
    pub slide_class: String,
    pub prev_id: String,
    pub next_id: String,
    pub dots_id: String,
    pub root_class: String,
    pub active_class: String,
    pub interval_ms: u64,
    pub keyboard_scope: KeyboardScope,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            viewport_id: "carouselViewport".to_string(),
            slide_class: "slide".to_string(),
            prev_id: "carouselPrev".to_string(),
            next_id: "carouselNext".to_string(),
            dots_id: "carouselDots".to_string(),
            root_class: "carousel".to_string(),
            active_class: "active".to_string(),
            interval_ms: DEFAULT_INTERVAL_MS,
            keyboard_scope: KeyboardScope::Document,
        }
    }
}

/// News containers and content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Card grid on the index page
    pub grid_id: String,
    /// How many items the index grid shows
    pub grid_limit: usize,
    /// Full list on the news page
    pub list_id: String,
    pub items: Vec<NewsItem>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            grid_id: "newsGrid".to_string(),
            grid_limit: 3,
            list_id: "newsList".to_string(),
            items: news::sample_news(),
        }
    }
}

/// Contact form hooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_id: String,
    pub result_id: String,
    pub confirmation: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            result_id: "contactResult".to_string(),
            confirmation: "Thank you — your message has been sent.".to_string(),
        }
    }
}
