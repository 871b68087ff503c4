use crate::error::Result;
use std::path::Path;

/// Load a document as an ordered sequence of page texts.
///
/// Documents are read as raw text. A single file is split into pages on
/// form feed characters; a file without form feeds is one page. A
/// directory contributes the pages of each regular file, in file-name
/// order, so a directory of per-page text files works unchanged.
pub fn load_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut pages = Vec::new();

    if path.is_dir() {
        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect();
        entries.sort();
        for entry in entries {
            let content = std::fs::read_to_string(&entry)?;
            pages.extend(split_form_feeds(&content));
        }
    } else {
        let content = std::fs::read_to_string(path)?;
        pages.extend(split_form_feeds(&content));
    }

    log::debug!("Loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

fn split_form_feeds(content: &str) -> Vec<String> {
    content.split('\x0c').map(ToString::to_string).collect()
}
