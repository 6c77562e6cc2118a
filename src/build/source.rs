//! Content discovery and loading.
//!
//! Missing directories and unreadable files are not build errors: they are
//! logged and skipped, so the rest of the site still gets generated.

use std::path::{Path, PathBuf};

/// One content file read verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    /// File name without the content extension (unique within its directory)
    pub name: String,
    /// Where the file was read from
    pub path: PathBuf,
    /// The file's full text
    pub raw_text: String,
}

/// The optional singleton pages read from the pages directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    About,
    Contact,
}

impl Singleton {
    pub const ALL: [Singleton; 2] = [Singleton::About, Singleton::Contact];

    /// Source file stem and output page name.
    pub fn name(self) -> &'static str {
        match self {
            Singleton::About => "about",
            Singleton::Contact => "contact",
        }
    }

    /// Label used in the site navigation.
    pub fn label(self) -> &'static str {
        match self {
            Singleton::About => "About",
            Singleton::Contact => "Contact",
        }
    }
}

/// List `dir`, keep files ending in `.{extension}` and read each one.
///
/// Entries are returned ordered by file name, which fixes the discovery
/// order used to break ties when posts are sorted by date.
pub async fn load_content(dir: &Path, extension: &str) -> Vec<RawContent> {
    let suffix = format!(".{}", extension);

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), "content directory unreadable, treating as empty: {}", e);
            return Vec::new();
        }
    };

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let file_name = entry.file_name().to_string_lossy().to_string();
                let Some(name) = file_name.strip_suffix(&suffix) else {
                    continue;
                };
                if name.is_empty() {
                    continue;
                }
                candidates.push((name.to_string(), entry.path()));
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(path = %dir.display(), "failed to read directory entry: {}", e);
                break;
            }
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut contents = Vec::with_capacity(candidates.len());
    for (name, path) in candidates {
        match tokio::fs::read_to_string(&path).await {
            Ok(raw_text) => contents.push(RawContent {
                name,
                path,
                raw_text,
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping unreadable file: {}", e);
            }
        }
    }

    tracing::debug!(path = %dir.display(), files = contents.len(), "loaded content");
    contents
}

/// Read one singleton source (`about.md`, `contact.md`) if it exists.
///
/// Absence is normal and only logged at debug level.
pub async fn load_singleton(
    pages_dir: &Path,
    singleton: Singleton,
    extension: &str,
) -> Option<RawContent> {
    let path = pages_dir.join(format!("{}.{}", singleton.name(), extension));
    match tokio::fs::read_to_string(&path).await {
        Ok(raw_text) => Some(RawContent {
            name: singleton.name().to_string(),
            path,
            raw_text,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no {} page source", singleton.name());
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "skipping unreadable page: {}", e);
            None
        }
    }
}
