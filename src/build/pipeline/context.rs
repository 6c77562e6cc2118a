//! Pipeline context for sharing state across stages.

use chrono::NaiveDate;
use serde_yaml::Value;

use crate::build::document::Attributes;
use crate::build::fragments::{favicon_fragment, meta_fragment, title_fragment};
use crate::build::paths::SitePaths;
use crate::build::post::{Post, resolve_text};
use crate::build::render::{Bindings, PageKind, Placeholder, Renderer};
use crate::build::source::Singleton;
use crate::build::tags::TagIndex;
use crate::config::Branding;

/// A resolved about/contact page.
#[derive(Debug, Clone)]
pub struct SingletonPage {
    pub singleton: Singleton,
    pub page: Post,
}

impl SingletonPage {
    pub fn kind(&self) -> PageKind {
        match self.singleton {
            Singleton::About => PageKind::About,
            Singleton::Contact => PageKind::Contact,
        }
    }
}

/// Shared, read-only state for pipeline stages.
///
/// Everything here is built once per build before any stage runs.
pub struct PipelineContext<'a> {
    // === Content ===
    /// Posts, newest first
    pub posts: &'a [Post],

    /// Posts grouped by tag
    pub tags: &'a TagIndex<'a>,

    /// About/contact pages that have a source file
    pub singletons: &'a [SingletonPage],

    // === Site-level data ===
    pub paths: &'a SitePaths,
    pub branding: &'a Branding,

    /// How many posts the home page lists
    pub home_posts: usize,

    /// The build date, shown for undated content
    pub today: NaiveDate,

    // === Services ===
    /// Template renderer (chrome already applied)
    pub renderer: &'a Renderer,
}

impl<'a> PipelineContext<'a> {
    /// Meta block for a page with its own front matter.
    ///
    /// When the front matter has no usable `title` (absent, null or blank),
    /// a `<title>` from the resolved title is emitted ahead of the front
    /// matter tags.
    pub fn page_meta(&self, attributes: &Attributes, title: &str) -> String {
        let mut meta = favicon_fragment(self.branding);
        if resolve_text(attributes, &["title"]).is_none() {
            meta.push_str(&title_fragment(title, &self.branding.name));
        }
        meta.push_str(&meta_fragment(attributes, &self.branding.name));
        meta
    }

    /// Meta block for a listing page (home, post index, tag pages).
    pub fn listing_meta(&self, title: &str) -> String {
        let mut attributes = Attributes::new();
        attributes.insert("title".to_string(), Value::String(title.to_string()));
        if let Some(description) = &self.branding.description {
            attributes.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        self.page_meta(&attributes, title)
    }

    /// Bindings every page starts from.
    pub fn base_bindings(&self, meta: String) -> Bindings {
        Bindings::new()
            .bind(Placeholder::Meta, meta)
            .bind(Placeholder::Css, self.paths.stylesheet_url())
    }
}
