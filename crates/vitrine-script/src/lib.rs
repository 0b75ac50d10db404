//! Vitrine site script
//!
//! Page behaviors for a small static site, run against a [`Page`] host:
//! an auto-advancing carousel, news cards filled into two page templates,
//! and a simulated contact-form submission. Everything is wired once by the
//! `DOMContentLoaded` startup hook; absent markup simply disables the
//! matching behavior.

pub mod carousel;
pub mod config;
pub mod contact;
mod error;
pub mod news;
mod page;

pub use carousel::{Carousel, CarouselCommand, CarouselState, Direction, PauseSource};
pub use config::{CarouselConfig, ContactConfig, KeyboardScope, NewsConfig, ScriptConfig};
pub use contact::{ContactForm, ContactSubmission};
pub use error::ScriptError;
pub use news::NewsItem;
pub use page::{Action, Page};

/// Version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
