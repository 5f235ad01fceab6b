//! Dotted-path overrides over the default layout document.
//!
//! Users address layout options with dotted paths such as
//! `"row_titles.east.text_color"`. Each override overwrites exactly one
//! leaf of the default document; every other leaf is retained. Paths that
//! do not exist in the default document are rejected rather than silently
//! created, which catches misspelled option names.

use serde_json::{Map, Value};

use crate::MergeError;

/// Overwrites one leaf of `tree` at the given key path.
///
/// Every intermediate key must name an existing object and the leaf key
/// must already exist; the layout document is a closed set of options.
///
/// # Errors
///
/// [`MergeError::UnknownKey`] when any path segment is missing.
pub fn set_path(tree: &mut Value, path: &[&str], value: Value) -> Result<(), MergeError> {
    let unknown = || MergeError::UnknownKey {
        path: path.join("."),
    };

    match path {
        [] => Err(unknown()),
        [leaf] => {
            let object = tree.as_object_mut().ok_or_else(unknown)?;
            if !object.contains_key(*leaf) {
                return Err(unknown());
            }
            object.insert((*leaf).to_string(), value);
            Ok(())
        }
        [head, rest @ ..] => {
            let child = tree.get_mut(*head).ok_or_else(unknown)?;
            set_path(child, rest, value)
        }
    }
}

/// Applies a user override document to `tree`.
///
/// Each top-level key of `overrides` is a dotted path; its value replaces
/// the corresponding default leaf.
///
/// # Errors
///
/// [`MergeError::UnknownKey`] for the first override naming an unknown
/// option; earlier overrides may already have been applied.
pub fn apply_overrides(tree: &mut Value, overrides: &Map<String, Value>) -> Result<(), MergeError> {
    for (name, value) in overrides {
        let path: Vec<&str> = name.split('.').collect();
        set_path(tree, &path, value.clone()).map_err(|_| MergeError::UnknownKey {
            path: name.clone(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::defaults::default_layout;

    #[test]
    fn test_set_path_overwrites_nested_leaf() {
        let mut doc = default_layout();
        set_path(
            &mut doc,
            &["row_titles", "east", "size"],
            json!(4.0),
        )
        .unwrap();
        assert_eq!(doc["row_titles"]["east"]["size"], json!(4.0));
    }

    #[test]
    fn test_set_path_rejects_unknown_intermediate() {
        let mut doc = default_layout();
        let err = set_path(&mut doc, &["rox_titles", "east", "size"], json!(1.0)).unwrap_err();
        assert!(matches!(err, MergeError::UnknownKey { path } if path == "rox_titles.east.size"));
    }

    #[test]
    fn test_set_path_rejects_unknown_leaf() {
        let mut doc = default_layout();
        assert!(set_path(&mut doc, &["row_titles", "east", "sizes"], json!(1.0)).is_err());
    }

    #[test]
    fn test_apply_overrides_keeps_untouched_defaults() {
        let mut doc = default_layout();
        let defaults = default_layout();

        let mut overrides = Map::new();
        overrides.insert(
            "row_titles.east.content".to_string(),
            json!(["A", "B"]),
        );
        apply_overrides(&mut doc, &overrides).unwrap();

        assert_eq!(doc["row_titles"]["east"]["content"], json!(["A", "B"]));
        // Every other leaf is untouched, including sibling keys of the one
        // that changed.
        assert_eq!(
            doc["row_titles"]["east"]["background_colors"],
            defaults["row_titles"]["east"]["background_colors"]
        );
        assert_eq!(doc["column_titles"], defaults["column_titles"]);
        assert_eq!(doc["padding"], defaults["padding"]);
        assert_eq!(doc["titles"], defaults["titles"]);
    }

    #[test]
    fn test_apply_overrides_multiple_paths() {
        let mut doc = default_layout();
        let mut overrides = Map::new();
        overrides.insert("padding.west".to_string(), json!(2.5));
        overrides.insert("spacing.horizontal".to_string(), json!(1.2));
        apply_overrides(&mut doc, &overrides).unwrap();

        assert_eq!(doc["padding"]["west"], json!(2.5));
        assert_eq!(doc["spacing"]["horizontal"], json!(1.2));
        assert_eq!(doc["padding"]["east"], json!(0.5));
    }
}
