//! Page templates and placeholder substitution.
//!
//! Templates are plain HTML with `={name}=` markers. Each page kind declares
//! the markers it fills; the header and footer are filled into every template
//! once, when the [`Renderer`] is built, before any page content.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::fragments::Chrome;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("{page} page rendered without a value for {placeholder}")]
    Unbound {
        page: PageKind,
        placeholder: Placeholder,
    },

    #[error("failed to read template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Placeholders
// =============================================================================

/// A named marker in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Meta,
    Css,
    Header,
    Footer,
    Title,
    Content,
    Posts,
    Tags,
    Cover,
    Date,
}

impl Placeholder {
    const ALL: [Placeholder; 10] = [
        Placeholder::Meta,
        Placeholder::Css,
        Placeholder::Header,
        Placeholder::Footer,
        Placeholder::Title,
        Placeholder::Content,
        Placeholder::Posts,
        Placeholder::Tags,
        Placeholder::Cover,
        Placeholder::Date,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Meta => "meta",
            Placeholder::Css => "css",
            Placeholder::Header => "header",
            Placeholder::Footer => "footer",
            Placeholder::Title => "title",
            Placeholder::Content => "content",
            Placeholder::Posts => "posts",
            Placeholder::Tags => "tags",
            Placeholder::Cover => "cover",
            Placeholder::Date => "date",
        }
    }

    /// The literal marker, e.g. `={meta}=`.
    pub fn marker(self) -> String {
        format!("={{{}}}=", self.name())
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marker())
    }
}

/// Values for a template's placeholders.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<Placeholder, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, placeholder: Placeholder, html: impl Into<String>) -> Self {
        self.values.insert(placeholder, html.into());
        self
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.values.contains_key(&placeholder)
    }
}

/// Replace the first occurrence of each bound marker with its value.
///
/// Runs in a single pass over the template, so markers that appear inside
/// substituted values are left alone. Unbound markers stay in place.
pub fn render_page(template: &str, bindings: &Bindings) -> String {
    let mut output = String::with_capacity(template.len());
    let mut used: Vec<Placeholder> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("={") {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let substituted = candidate[2..].find("}=").and_then(|end| {
            let placeholder = Placeholder::from_name(&candidate[2..2 + end])?;
            if used.contains(&placeholder) {
                return None;
            }
            let value = bindings.get(placeholder)?;
            Some((placeholder, value, 2 + end + 2))
        });

        match substituted {
            Some((placeholder, value, marker_len)) => {
                used.push(placeholder);
                output.push_str(value);
                rest = &candidate[marker_len..];
            }
            None => {
                output.push_str("={");
                rest = &candidate[2..];
            }
        }
    }
    output.push_str(rest);
    output
}

// =============================================================================
// Page kinds and templates
// =============================================================================

/// The kinds of page a blog is made of, one template each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    PostIndex,
    PostDetail,
    TagIndex,
    About,
    Contact,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::Home,
        PageKind::PostIndex,
        PageKind::PostDetail,
        PageKind::TagIndex,
        PageKind::About,
        PageKind::Contact,
    ];

    /// Template file name in the templates directory.
    pub fn template_file(self) -> &'static str {
        match self {
            PageKind::Home => "home.html",
            PageKind::PostIndex => "posts.html",
            PageKind::PostDetail => "post.html",
            PageKind::TagIndex => "tag.html",
            PageKind::About => "about.html",
            PageKind::Contact => "contact.html",
        }
    }

    /// Placeholders each page must bind (header and footer come from the chrome).
    pub fn placeholders(self) -> &'static [Placeholder] {
        use Placeholder::*;
        match self {
            PageKind::Home => &[Meta, Css, Posts],
            PageKind::PostIndex => &[Meta, Css, Posts, Tags],
            PageKind::PostDetail => &[Meta, Css, Cover, Date, Tags, Content],
            PageKind::TagIndex => &[Meta, Css, Title, Posts],
            PageKind::About | PageKind::Contact => &[Meta, Css, Cover, Content],
        }
    }

    fn default_template(self) -> &'static str {
        match self {
            PageKind::Home => include_str!("../../templates/home.html"),
            PageKind::PostIndex => include_str!("../../templates/posts.html"),
            PageKind::PostDetail => include_str!("../../templates/post.html"),
            PageKind::TagIndex => include_str!("../../templates/tag.html"),
            PageKind::About => include_str!("../../templates/about.html"),
            PageKind::Contact => include_str!("../../templates/contact.html"),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Home => "home",
            PageKind::PostIndex => "post index",
            PageKind::PostDetail => "post",
            PageKind::TagIndex => "tag",
            PageKind::About => "about",
            PageKind::Contact => "contact",
        };
        f.write_str(name)
    }
}

/// One template text per page kind.
#[derive(Debug, Clone)]
pub struct Templates {
    templates: HashMap<PageKind, String>,
}

impl Templates {
    /// The built-in template set.
    pub fn builtin() -> Self {
        Self {
            templates: PageKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.default_template().to_string()))
                .collect(),
        }
    }

    /// Load templates from `dir`, using the built-in template for any file
    /// that doesn't exist. A file that exists but can't be read is an error.
    pub async fn load(dir: &Path) -> Result<Self, RenderError> {
        let mut templates = Self::builtin();
        for kind in PageKind::ALL {
            let path = dir.join(kind.template_file());
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    templates.templates.insert(kind, text);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "using built-in {} template", kind);
                }
                Err(source) => return Err(RenderError::ReadTemplate { path, source }),
            }
        }
        Ok(templates)
    }

    pub fn get(&self, kind: PageKind) -> &str {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template())
    }
}

/// Renders pages from templates that already carry the site chrome.
pub struct Renderer {
    templates: HashMap<PageKind, String>,
}

impl Renderer {
    /// Fill the header and footer into every template.
    pub fn new(templates: &Templates, chrome: &Chrome) -> Self {
        let chrome_bindings = Bindings::new()
            .bind(Placeholder::Header, chrome.header.as_str())
            .bind(Placeholder::Footer, chrome.footer.as_str());

        let templates = PageKind::ALL
            .into_iter()
            .map(|kind| (kind, render_page(templates.get(kind), &chrome_bindings)))
            .collect();

        Self { templates }
    }

    /// Render one page. Every placeholder the page kind declares must be bound.
    pub fn render(&self, kind: PageKind, bindings: &Bindings) -> Result<String, RenderError> {
        if let Some(&placeholder) = kind
            .placeholders()
            .iter()
            .find(|p| !bindings.contains(**p))
        {
            return Err(RenderError::Unbound {
                page: kind,
                placeholder,
            });
        }

        let template = self
            .templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template());

        for placeholder in kind.placeholders() {
            if !template.contains(&placeholder.marker()) {
                tracing::debug!("{} template has no {} marker", kind, placeholder);
            }
        }

        Ok(render_page(template, bindings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> Chrome {
        Chrome {
            header: "<header>H</header>".to_string(),
            footer: "<footer>F</footer>".to_string(),
        }
    }

    #[test]
    fn test_render_page_replaces_first_occurrence() {
        let bindings = Bindings::new().bind(Placeholder::Content, "X");
        let html = render_page("<p>={content}=</p><p>={content}=</p>", &bindings);
        assert_eq!(html, "<p>X</p><p>={content}=</p>");
    }

    #[test]
    fn test_render_page_leaves_unknown_and_unbound_markers() {
        let bindings = Bindings::new().bind(Placeholder::Meta, "M");
        let html = render_page("={meta}= ={posts}= ={bogus}= ={ x", &bindings);
        assert_eq!(html, "M ={posts}= ={bogus}= ={ x");
    }

    #[test]
    fn test_render_page_does_not_expand_inserted_markers() {
        let bindings = Bindings::new()
            .bind(Placeholder::Content, "literal ={date}= in a post")
            .bind(Placeholder::Date, "D");
        let html = render_page("={content}=|={date}=", &bindings);
        assert_eq!(html, "literal ={date}= in a post|D");
    }

    #[test]
    fn test_marker() {
        assert_eq!(Placeholder::Meta.marker(), "={meta}=");
        assert_eq!(Placeholder::Tags.to_string(), "={tags}=");
    }

    #[test]
    fn test_builtin_templates_carry_declared_markers() {
        let templates = Templates::builtin();
        for kind in PageKind::ALL {
            let template = templates.get(kind);
            for placeholder in kind.placeholders() {
                assert!(template.contains(&placeholder.marker()), "{} lacks {}", kind, placeholder);
            }
            assert!(template.contains("={header}="));
            assert!(template.contains("={footer}="));
        }
    }

    #[test]
    fn test_renderer_applies_chrome_first() {
        let renderer = Renderer::new(&Templates::builtin(), &chrome());
        let bindings = Bindings::new()
            .bind(Placeholder::Meta, "")
            .bind(Placeholder::Css, "/main.css")
            .bind(Placeholder::Posts, "<ul></ul>");
        let html = renderer.render(PageKind::Home, &bindings).unwrap();
        assert!(html.contains("<header>H</header>"));
        assert!(html.contains("<footer>F</footer>"));
        assert!(html.contains("<ul></ul>"));
        assert!(!html.contains("={"));
    }

    #[test]
    fn test_renderer_rejects_unbound_placeholder() {
        let renderer = Renderer::new(&Templates::builtin(), &chrome());
        let bindings = Bindings::new().bind(Placeholder::Meta, "");
        let err = renderer.render(PageKind::Home, &bindings).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Unbound {
                page: PageKind::Home,
                placeholder: Placeholder::Css
            }
        ));
    }

    #[tokio::test]
    async fn test_load_templates_with_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("home.html"), "custom ={posts}=").unwrap();

        let templates = Templates::load(dir.path()).await.unwrap();
        assert_eq!(templates.get(PageKind::Home), "custom ={posts}=");
        assert_eq!(
            templates.get(PageKind::PostDetail),
            PageKind::PostDetail.default_template()
        );
    }

    #[tokio::test]
    async fn test_load_templates_missing_directory_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let templates = Templates::load(&dir.path().join("missing")).await.unwrap();
        assert_eq!(templates.get(PageKind::TagIndex), PageKind::TagIndex.default_template());
    }
}
