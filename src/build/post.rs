//! Posts and the fallback chains that resolve their fields.
//!
//! Each logical field is read from an ordered list of front matter keys. The
//! canonical key beats its open graph alias, and the alias beats the
//! structural default (file name, build date, `untagged`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::document::{Attributes, ParsedContent, list_value, parse_front_matter, text_value};
use super::markdown::render_markdown;
use super::source::RawContent;

/// Tag given to posts that declare none.
pub const UNTAGGED: &str = "untagged";

/// Keys tried, in order, for each field.
pub const TITLE_KEYS: &[&str] = &["title", "og:title"];
pub const DESCRIPTION_KEYS: &[&str] = &["description", "og:description"];
pub const IMAGE_KEYS: &[&str] = &["image", "og:image"];
pub const IMAGE_DESCRIPTION_KEYS: &[&str] = &["image_description", "image_alt", "og:image:alt"];
pub const IMAGE_SOURCE_KEYS: &[&str] = &["image_source", "image_credit"];
pub const DATE_KEYS: &[&str] = &["date"];
pub const TAG_KEYS: &[&str] = &["tags"];

/// A post's cover image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    pub url: Option<String>,
    /// Caption text
    pub description: Option<String>,
    /// Link for the caption (photo credit, original source)
    pub source: Option<String>,
}

/// A resolved post.
#[derive(Debug, Clone)]
pub struct Post {
    /// File name without extension; names the output page
    pub name: String,
    /// Markdown source without the front matter block
    pub body: String,
    /// Rendered body, empty until [`Post::render_body`] runs
    pub html_body: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub cover: Cover,
    /// Never empty; deduplicated, in front matter order
    pub tags: Vec<String>,
    /// The raw front matter, passed through to the meta tags
    pub meta: Attributes,
}

impl Post {
    /// Split and resolve one content file.
    pub fn from_raw(raw: &RawContent, today: NaiveDate) -> Self {
        derive_fields(&raw.name, parse_front_matter(&raw.raw_text), today)
    }

    /// Render the markdown body into `html_body`.
    pub fn render_body(&mut self) {
        self.html_body = render_markdown(&self.body);
    }
}

/// First candidate key holding a non-empty text value.
pub fn resolve_text(attributes: &Attributes, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| attributes.get(*key))
        .filter_map(text_value)
        .find(|value| !value.is_empty())
}

/// First candidate key holding a non-empty list.
pub fn resolve_list(attributes: &Attributes, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter()
        .filter_map(|key| attributes.get(*key))
        .map(list_value)
        .find(|items| !items.is_empty())
}

/// Resolve the post date, falling back to `today` when absent or unparseable.
pub fn resolve_date(attributes: &Attributes, today: NaiveDate) -> NaiveDate {
    let Some(text) = resolve_text(attributes, DATE_KEYS) else {
        return today;
    };
    match parse_date(&text) {
        Some(date) => date,
        None => {
            tracing::warn!(date = %text, "unrecognised date, using build date");
            today
        }
    }
}

/// Parse a date at day precision.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}

/// Resolve the tag list, deduplicated, or `["untagged"]`.
pub fn resolve_tags(attributes: &Attributes) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in resolve_list(attributes, TAG_KEYS).unwrap_or_default() {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.is_empty() {
        tags.push(UNTAGGED.to_string());
    }
    tags
}

/// Apply every fallback chain to a parsed file.
pub fn derive_fields(name: &str, parsed: ParsedContent, today: NaiveDate) -> Post {
    let attributes = parsed.attributes;

    Post {
        name: name.to_string(),
        body: parsed.body,
        html_body: String::new(),
        date: resolve_date(&attributes, today),
        title: resolve_text(&attributes, TITLE_KEYS).unwrap_or_else(|| name.to_string()),
        description: resolve_text(&attributes, DESCRIPTION_KEYS).unwrap_or_default(),
        cover: Cover {
            url: resolve_text(&attributes, IMAGE_KEYS),
            description: resolve_text(&attributes, IMAGE_DESCRIPTION_KEYS),
            source: resolve_text(&attributes, IMAGE_SOURCE_KEYS),
        },
        tags: resolve_tags(&attributes),
        meta: attributes,
    }
}

/// Sort newest first. Equal dates keep their incoming order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}
