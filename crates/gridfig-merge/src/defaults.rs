//! The built-in default layout document.
//!
//! Every module starts from this document; user overrides are applied on
//! top of it with [`crate::apply_overrides`], so any leaf the user does not
//! touch keeps its default value.

use serde_json::Value;

/// The default layout document, embedded at build time.
const DEFAULT_LAYOUT_JSON: &str = include_str!("default_layout.json");

/// Returns a fresh copy of the default layout document.
pub fn default_layout() -> Value {
    serde_json::from_str(DEFAULT_LAYOUT_JSON).expect("embedded default layout is valid JSON")
}
