//! Output paths and public URLs.
//!
//! Layout of the generated site:
//! - `index.html`, `posts.html`, `about.html`, `contact.html` at the root
//! - `{posts_dir}/{name}.html` per post
//! - `{tags_dir}/{slug}.html` per tag

use std::path::{Path, PathBuf};

use crate::config::BlogConfig;
use crate::util::tag_slug;

use super::source::Singleton;

/// Where pages are written and how they link to each other.
#[derive(Debug, Clone)]
pub struct SitePaths {
    output_dir: PathBuf,
    /// Public base URL without trailing slash (may be empty for root-relative links)
    base_url: String,
    posts_dir: String,
    tags_dir: String,
}

impl SitePaths {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        base_url: &str,
        posts_dir: impl Into<String>,
        tags_dir: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            posts_dir: posts_dir.into(),
            tags_dir: tags_dir.into(),
        }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(
            config.output_dir(),
            config.base_url(),
            config.posts_dir.as_str(),
            config.tags_dir.as_str(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // === Output files ===

    pub fn home_file(&self) -> PathBuf {
        self.output_dir.join("index.html")
    }

    pub fn post_index_file(&self) -> PathBuf {
        self.output_dir.join("posts.html")
    }

    pub fn post_file(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(&self.posts_dir)
            .join(format!("{}.html", name))
    }

    pub fn tag_file(&self, tag: &str) -> PathBuf {
        self.output_dir
            .join(&self.tags_dir)
            .join(format!("{}.html", tag_slug(tag)))
    }

    pub fn singleton_file(&self, singleton: Singleton) -> PathBuf {
        self.output_dir.join(format!("{}.html", singleton.name()))
    }

    // === Public URLs ===

    pub fn home_url(&self) -> String {
        format!("{}/index.html", self.base_url)
    }

    pub fn post_index_url(&self) -> String {
        format!("{}/posts.html", self.base_url)
    }

    /// Base URL that post page names are appended to.
    pub fn posts_base(&self) -> String {
        format!("{}/{}", self.base_url, self.posts_dir)
    }

    pub fn post_url(&self, name: &str) -> String {
        format!("{}/{}.html", self.posts_base(), name)
    }

    /// Base URL that tag slugs are appended to.
    pub fn tags_base(&self) -> String {
        format!("{}/{}", self.base_url, self.tags_dir)
    }

    pub fn singleton_url(&self, singleton: Singleton) -> String {
        format!("{}/{}.html", self.base_url, singleton.name())
    }

    pub fn stylesheet_url(&self) -> String {
        format!("{}/main.css", self.base_url)
    }
}
