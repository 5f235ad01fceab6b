//! Configuration types for figure rendering.
//!
//! This module provides the configuration structures that control how a
//! figure is rendered. All types implement [`serde::Deserialize`] for
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`RenderConfig`] - Backend selection and output naming.
//!
//! # Example
//!
//! ```
//! # use gridfig::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().fragment_stem(), "module");
//! ```

use serde::Deserialize;

use crate::export::Backend;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rendering configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given render configuration.
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Backend selection and output naming for rendered figures.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Default rendering backend.
    #[serde(default = "default_backend")]
    backend: Backend,

    /// Filename stem of per-module fragments (`{stem}{index}.{ext}`).
    #[serde(default = "default_fragment_stem")]
    fragment_stem: String,

    /// Filename stem of the combined output document.
    #[serde(default = "default_document_stem")]
    document_stem: String,
}

impl RenderConfig {
    /// Returns the default [`Backend`] used when the caller names none.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the stem of per-module fragment filenames.
    pub fn fragment_stem(&self) -> &str {
        &self.fragment_stem
    }

    /// Returns the stem of the combined document filename.
    pub fn document_stem(&self) -> &str {
        &self.document_stem
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            fragment_stem: default_fragment_stem(),
            document_stem: default_document_stem(),
        }
    }
}

fn default_backend() -> Backend {
    Backend::Tikz
}

fn default_fragment_stem() -> String {
    "module".to_string()
}

fn default_document_stem() -> String {
    "figure".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.render().backend(), Backend::Tikz);
        assert_eq!(config.render().fragment_stem(), "module");
        assert_eq!(config.render().document_stem(), "figure");
    }

    #[test]
    fn test_config_deserializes_partial_document() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "render": { "backend": "html" } }"#).unwrap();
        assert_eq!(config.render().backend(), Backend::Html);
        // Unnamed fields keep their defaults.
        assert_eq!(config.render().document_stem(), "figure");
    }
}
