use std::path::PathBuf;

use vitrine_dom::DomError;

/// Site script error
///
/// Missing page elements are not errors; they only disable a behavior.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
