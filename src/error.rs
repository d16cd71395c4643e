use std::path::PathBuf;

/// Result alias used by the validation, normalization and rendering core
pub type Result<T> = std::result::Result<T, Error>;

/// Typed error for every failure the core can raise.
///
/// `Clone` so a failure raised inside a template filter can be pulled back
/// out of the Tera error chain with its original kind intact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("'{value}' is not a supported ansible_network_os")]
    UnsupportedPlatform { value: String },

    #[error("{operation}: '{value}' {reason}")]
    Validation {
        operation: &'static str,
        value: String,
        reason: String,
    },

    #[error("{operation}: '{value}' {reason}")]
    Normalization {
        operation: &'static str,
        value: String,
        reason: String,
    },

    #[error(
        "could not locate template_name: '{}' or src: '{}'",
        .template_name.as_deref().unwrap_or("None"),
        .src.as_deref().unwrap_or("None")
    )]
    TemplateNotFound {
        template_name: Option<String>,
        src: Option<String>,
    },

    #[error("templates directory not found, searched {} location(s)", .searched.len())]
    TemplatesDirectoryNotFound { searched: Vec<PathBuf> },

    #[error("failed to read template {}: {reason}", .path.display())]
    TemplateRead { path: PathBuf, reason: String },

    #[error("failed to render {template}: {reason}")]
    Render { template: String, reason: String },

    #[error("inventory config error: {0}")]
    InventoryConfig(String),

    #[error("inventory source error: {0}")]
    InventorySource(String),
}

impl Error {
    pub fn validation(
        operation: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            operation,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn normalization(
        operation: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::Normalization {
            operation,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable, machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform { .. } => "unsupported_platform",
            Self::Validation { .. } => "validation",
            Self::Normalization { .. } => "normalization",
            Self::TemplateNotFound { .. } => "template_not_found",
            Self::TemplatesDirectoryNotFound { .. } => "templates_directory_not_found",
            Self::TemplateRead { .. } => "template_read",
            Self::Render { .. } => "render",
            Self::InventoryConfig(_) => "inventory_config",
            Self::InventorySource(_) => "inventory_source",
        }
    }
}

/// Walk an error chain looking for a core `Error`.
pub(crate) fn find_cause<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a Error> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = e.downcast_ref::<Error>() {
            return Some(found);
        }
        current = e.source();
    }
    None
}

/// Flatten an error chain into a single `a: b: c` message
pub(crate) fn chain_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}

/// Convert a Tera error back into a core error, keeping the original kind
/// when the failure came from one of our filters.
pub(crate) fn from_tera(err: tera::Error, template: &str) -> Error {
    if let Some(cause) = find_cause(&err) {
        return cause.clone();
    }
    Error::Render {
        template: template.to_string(),
        reason: chain_message(&err),
    }
}
