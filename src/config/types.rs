//! Configuration type definitions.
//!
//! These types are pure data - no I/O. Every field has a default so a blog
//! can be built with no configuration file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// =============================================================================
// Blog configuration
// =============================================================================

/// Top-level blog configuration.
///
/// YAML format:
/// ```yaml
/// root: .
/// output: output
/// base_url: https://example.github.io/blog
/// branding:
///   name: My Blog
///   favicon: https://example.github.io/blog/favicon.ico
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Root content path (contains the posts, pages and templates directories)
    pub root: PathBuf,
    /// Output directory; relative paths resolve against `root`
    pub output: PathBuf,
    /// Template directory override (defaults to `{root}/templates`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
    /// Directory name for post sources and post pages
    pub posts_dir: String,
    /// Directory name for the about/contact sources
    pub pages_dir: String,
    /// Directory name for tag pages
    pub tags_dir: String,
    /// Content file extension, without the dot
    pub extension: String,
    /// Public base URL of the site
    pub base_url: String,
    /// How many of the newest posts the home page shows
    pub home_posts: usize,
    /// Site branding
    pub branding: Branding,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("output"),
            templates: None,
            posts_dir: "posts".to_string(),
            pages_dir: "pages".to_string(),
            tags_dir: "tags".to_string(),
            extension: "md".to_string(),
            base_url: String::new(),
            home_posts: 8,
            branding: Branding::default(),
        }
    }
}

impl BlogConfig {
    /// The base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Directory holding post sources.
    pub fn posts_source(&self) -> PathBuf {
        self.root.join(&self.posts_dir)
    }

    /// Directory holding the about/contact sources.
    pub fn pages_source(&self) -> PathBuf {
        self.root.join(&self.pages_dir)
    }

    /// Directory holding page templates.
    pub fn templates_dir(&self) -> PathBuf {
        resolve_against(&self.root, self.templates.as_deref().unwrap_or(Path::new("templates")))
    }

    /// Output directory, resolved against `root`.
    pub fn output_dir(&self) -> PathBuf {
        resolve_against(&self.root, &self.output)
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

// =============================================================================
// Branding
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Site name, shown in the header and appended to page titles
    pub name: String,
    /// Logo image URL for the header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Favicon URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Site description for listing pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Blog".to_string(),
            logo: None,
            favicon: None,
            description: None,
        }
    }
}
