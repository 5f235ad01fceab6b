//! Stitches per-module fragments into one output document.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::{ExportError, Generator};

/// Concatenates every fragment in `dir` whose filename starts with
/// `fragment_stem` and carries the generator's extension into
/// `{document_stem}.{ext}`, framed by the generator's prologue and
/// epilogue.
///
/// Fragments are taken in filename order, so numbered stems
/// (`module0`, `module1`, ...) combine in module order. Returns the
/// path of the combined document.
///
/// # Errors
///
/// [`ExportError::Io`] when the directory cannot be read or a fragment
/// or the document cannot be written.
pub fn combine_fragments(
    dir: &Path,
    fragment_stem: &str,
    document_stem: &str,
    generator: &dyn Generator,
) -> Result<PathBuf, ExportError> {
    let extension = generator.fragment_extension();

    let mut fragments: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == extension)
                && path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem.starts_with(fragment_stem) && stem != document_stem)
        })
        .collect();
    fragments.sort();

    let mut document = String::from(generator.document_prologue());
    for fragment in &fragments {
        document.push_str(&fs::read_to_string(fragment)?);
    }
    document.push_str(generator.document_epilogue());

    let path = dir.join(format!("{document_stem}.{extension}"));
    fs::write(&path, document)?;
    info!(
        path = path.display().to_string(),
        fragments = fragments.len();
        "combined fragments into document"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TikzGenerator;

    #[test]
    fn test_combines_fragments_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("module1.tex"), "second\n").unwrap();
        fs::write(dir.path().join("module0.tex"), "first\n").unwrap();
        fs::write(dir.path().join("unrelated.tex"), "ignored\n").unwrap();
        fs::write(dir.path().join("module0.png"), "not a fragment").unwrap();

        let path = combine_fragments(dir.path(), "module", "figure", &TikzGenerator).unwrap();
        let document = fs::read_to_string(path).unwrap();

        assert!(document.starts_with(TikzGenerator.document_prologue()));
        assert!(document.ends_with(TikzGenerator.document_epilogue()));
        let first = document.find("first").unwrap();
        let second = document.find("second").unwrap();
        assert!(first < second);
        assert!(!document.contains("ignored"));
    }

    #[test]
    fn test_empty_directory_yields_bare_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = combine_fragments(dir.path(), "module", "figure", &TikzGenerator).unwrap();
        let document = fs::read_to_string(path).unwrap();
        assert_eq!(
            document,
            format!(
                "{}{}",
                TikzGenerator.document_prologue(),
                TikzGenerator.document_epilogue()
            )
        );
    }
}
