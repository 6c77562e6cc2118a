//! Writing rendered pages to disk.
//!
//! All writes of a build are issued together and joined; the caller only
//! gets a [`WriteReport`] once every one of them has finished. A failed page
//! is logged and counted, it never stops its siblings.

use std::path::{Path, PathBuf};

use futures_util::future::join_all;

use super::pipeline::RenderedPage;

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of writing a batch of pages.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteError>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write one page, creating parent directories and replacing any existing file.
pub async fn write_page(path: &Path, html: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, html)
        .await
        .map_err(|source| WriteError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Write every page and wait for all of them.
///
/// Pages must have distinct output paths (the pipeline guarantees this).
pub async fn write_pages(pages: &[RenderedPage]) -> WriteReport {
    let results = join_all(pages.iter().map(|page| async move {
        write_page(&page.output_path, &page.html)
            .await
            .map(|()| page.output_path.clone())
    }))
    .await;

    let mut report = WriteReport::default();
    for result in results {
        match result {
            Ok(path) => report.written.push(path),
            Err(e) => {
                tracing::warn!("{}", e);
                report.failed.push(e);
            }
        }
    }
    report
}
