use crate::Documents;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Read every `.txt` file directly inside `dir`, keyed by file name.
///
/// Subdirectories are not descended into. Files must be valid UTF-8.
pub fn load_documents<P: AsRef<Path>>(dir: P) -> Result<Documents> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("document directory not found: {}", dir.display());
    }

    let mut documents = Documents::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        documents.insert(name, text);
    }

    tracing::info!(dir = %dir.display(), num_docs = documents.len(), "loaded documents");
    Ok(documents)
}
