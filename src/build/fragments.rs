//! Small HTML fragments substituted into page templates.
//!
//! Every function here is pure: same input, same markup. Values from front
//! matter are author-trusted; only attribute values are escaped so quotes
//! can't break the surrounding tag.

use chrono::NaiveDate;

use crate::config::Branding;
use crate::util::{escape_attr, tag_slug, truncate_text};

use super::document::{Attributes, text_value};
use super::paths::SitePaths;
use super::post::{Cover, Post};
use super::source::Singleton;

/// Display format for post dates: "Tuesday, 02 January 2024".
pub const DATE_FORMAT: &str = "%A, %d %B %Y";

/// Front matter keys that never become meta tags.
const META_EXCEPTIONS: &[&str] = &["date"];

// =============================================================================
// Meta tags
// =============================================================================

/// Build the `<title>`/`<meta>` block for a page from its front matter.
///
/// | key            | output                                   |
/// |----------------|------------------------------------------|
/// | `title`        | `<title>` with the blog name + `og:title` |
/// | `description`  | `description` + `og:description`         |
/// | `image`        | `og:image`                               |
/// | `og:*`         | that open graph property                 |
/// | `date`         | nothing                                  |
/// | anything else  | `<meta name="{key}">`                    |
///
/// Tags are emitted in front matter order.
pub fn meta_fragment(attributes: &Attributes, blog_name: &str) -> String {
    let mut meta = String::new();

    for (key, value) in attributes {
        if META_EXCEPTIONS.contains(&key.as_str()) {
            continue;
        }
        let Some(value) = text_value(value) else {
            continue;
        };
        let content = escape_attr(&value);

        match key.as_str() {
            "title" if value.is_empty() => {}
            "title" => {
                let title = escape_attr(&format!("{} - {}", value, blog_name));
                meta.push_str(&format!("<title>{}</title>\n", title));
                meta.push_str(&og_tag("title", &title));
            }
            "description" => {
                meta.push_str(&name_tag("description", &content));
                meta.push_str(&og_tag("description", &content));
            }
            "image" => meta.push_str(&og_tag("image", &content)),
            og if og.starts_with("og:") => meta.push_str(&og_tag(&og[3..], &content)),
            other => meta.push_str(&name_tag(&escape_attr(other), &content)),
        }
    }

    meta
}

/// A bare `<title>` for pages whose front matter has no `title` key.
pub fn title_fragment(title: &str, blog_name: &str) -> String {
    format!("<title>{}</title>\n", escape_attr(&format!("{} - {}", title, blog_name)))
}

/// `<link rel="icon">` for the configured favicon, if any.
pub fn favicon_fragment(branding: &Branding) -> String {
    match &branding.favicon {
        Some(url) => format!("<link rel=\"icon\" href=\"{}\" />\n", escape_attr(url)),
        None => String::new(),
    }
}

fn og_tag(property: &str, content: &str) -> String {
    format!("<meta property=\"og:{}\" content=\"{}\" />\n", property, content)
}

fn name_tag(name: &str, content: &str) -> String {
    format!("<meta name=\"{}\" content=\"{}\" />\n", name, content)
}

// =============================================================================
// Post parts
// =============================================================================

/// The cover image block, or nothing when the post has no cover.
pub fn cover_image_fragment(cover: &Cover) -> String {
    let Some(url) = &cover.url else {
        return String::new();
    };

    let alt = cover.description.as_deref().unwrap_or("cover image");
    let caption = match (&cover.description, &cover.source) {
        (Some(text), Some(source)) => format!(
            "\n  <figcaption><a href=\"{}\">{}</a></figcaption>",
            escape_attr(source),
            text
        ),
        (None, Some(source)) => format!(
            "\n  <figcaption><a href=\"{}\">{}</a></figcaption>",
            escape_attr(source),
            source
        ),
        (Some(text), None) => format!("\n  <figcaption>{}</figcaption>", text),
        (None, None) => String::new(),
    };

    format!(
        "<figure class=\"cover\">\n  <img src=\"{}\" alt=\"{}\" />{}\n</figure>",
        escape_attr(url),
        escape_attr(alt),
        caption
    )
}

/// The date badge. A missing date shows `today` instead of nothing.
pub fn date_fragment(date: Option<NaiveDate>, today: NaiveDate) -> String {
    let date = date.unwrap_or(today);
    format!(
        "<div class=\"post-date\"><time datetime=\"{}\">{}</time></div>",
        date.format("%Y-%m-%d"),
        date.format(DATE_FORMAT)
    )
}

/// One link per tag, pointing at `{tag_base}/{slug}.html`.
pub fn tag_chips_fragment<S: AsRef<str>>(tags: &[S], tag_base: &str) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let chips = tags
        .iter()
        .map(|tag| {
            let tag = tag.as_ref();
            format!(
                "  <a href=\"{}/{}.html\" class=\"tag\">{}</a>",
                tag_base,
                escape_attr(&tag_slug(tag)),
                tag
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("<div class=\"tags\">\n{}\n</div>", chips)
}

/// A card linking to the post page, with optional thumbnail and description.
pub fn post_teaser_fragment(post: &Post, paths: &SitePaths) -> String {
    let thumbnail = match &post.cover.url {
        Some(url) => format!(
            "\n  <div class=\"post-card-thumb\"><img src=\"{}\" alt=\"{}\" /></div>",
            escape_attr(url),
            escape_attr(post.cover.description.as_deref().unwrap_or(&post.title))
        ),
        None => String::new(),
    };

    let description = if post.description.is_empty() {
        String::new()
    } else {
        format!("\n    <p>{}</p>", truncate_text(&post.description))
    };

    format!(
        "<a href=\"{}\" class=\"post-card\">{}\n  <div class=\"post-card-body\">\n    <h2>{}</h2>{}\n  </div>\n</a>",
        paths.post_url(&post.name), thumbnail, post.title, description
    )
}

/// Teasers for a run of posts, one per line.
pub fn post_list_fragment<'p>(posts: impl IntoIterator<Item = &'p Post>, paths: &SitePaths) -> String {
    posts
        .into_iter()
        .map(|post| post_teaser_fragment(post, paths))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Site chrome
// =============================================================================

/// Header and footer markup shared by every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub header: String,
    pub footer: String,
}

/// Build the header and footer once per build.
///
/// The navigation links to the about/contact pages only when they exist.
pub fn build_chrome(
    branding: &Branding,
    paths: &SitePaths,
    singletons: &[Singleton],
    year: i32,
) -> Chrome {
    let logo = match &branding.logo {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\" class=\"logo\" />",
            escape_attr(url),
            escape_attr(&branding.name)
        ),
        None => String::new(),
    };

    let mut links = vec![
        format!("<a href=\"{}\">Home</a>", paths.home_url()),
        format!("<a href=\"{}\">Posts</a>", paths.post_index_url()),
    ];
    for singleton in Singleton::ALL {
        if singletons.contains(&singleton) {
            links.push(format!(
                "<a href=\"{}\">{}</a>",
                paths.singleton_url(singleton),
                singleton.label()
            ));
        }
    }

    let header = format!(
        "<header class=\"site-header\">\n  <a href=\"{}\" class=\"brand\">{}<span>{}</span></a>\n  <nav>\n    {}\n  </nav>\n</header>",
        paths.home_url(),
        logo,
        branding.name,
        links.join("\n    ")
    );

    let footer = format!(
        "<footer class=\"site-footer\">\n  <p>&copy; {} {}</p>\n</footer>",
        year, branding.name
    );

    Chrome { header, footer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::parse_front_matter;
    use crate::build::post::derive_fields;

    fn attributes(yaml: &str) -> Attributes {
        parse_front_matter(&format!("---\n{}\n---\n", yaml)).attributes
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_meta_fragment_rule_table() {
        let attrs = attributes("title: A\ndescription: B\ndate: 2024-01-01\nog:type: article");
        let meta = meta_fragment(&attrs, "My Blog");

        assert!(meta.contains("<title>A - My Blog</title>"));
        assert!(meta.contains("<meta property=\"og:title\" content=\"A - My Blog\" />"));
        assert!(meta.contains("<meta name=\"description\" content=\"B\" />"));
        assert!(meta.contains("<meta property=\"og:description\" content=\"B\" />"));
        assert!(meta.contains("<meta property=\"og:type\" content=\"article\" />"));
        assert!(!meta.contains("date"));
        assert!(!meta.contains("2024-01-01"));
    }

    #[test]
    fn test_meta_fragment_image_and_generic_keys() {
        let attrs = attributes("author: Ada\nimage: /c.png\ntags: [a, b]");
        let meta = meta_fragment(&attrs, "Blog");
        let lines: Vec<&str> = meta.lines().collect();
        assert_eq!(
            lines,
            vec![
                "<meta name=\"author\" content=\"Ada\" />",
                "<meta property=\"og:image\" content=\"/c.png\" />",
                "<meta name=\"tags\" content=\"a, b\" />",
            ]
        );
    }

    #[test]
    fn test_meta_fragment_escapes_attributes() {
        let attrs = attributes("description: 'Say \"hi\"'");
        let meta = meta_fragment(&attrs, "Blog");
        assert!(meta.contains("content=\"Say &quot;hi&quot;\""));
    }

    #[test]
    fn test_meta_fragment_empty() {
        assert_eq!(meta_fragment(&Attributes::new(), "Blog"), "");
    }

    #[test]
    fn test_meta_fragment_skips_blank_title() {
        let meta = meta_fragment(&attributes("title: ''\nauthor: Ada"), "Blog");
        assert!(!meta.contains("<title>"));
        assert!(!meta.contains("og:title"));
        assert!(meta.contains("<meta name=\"author\" content=\"Ada\" />"));

        let meta = meta_fragment(&attributes("title:"), "Blog");
        assert_eq!(meta, "");
    }

    #[test]
    fn test_favicon_fragment() {
        let mut branding = Branding::default();
        assert_eq!(favicon_fragment(&branding), "");
        branding.favicon = Some("/favicon.ico".to_string());
        assert_eq!(favicon_fragment(&branding), "<link rel=\"icon\" href=\"/favicon.ico\" />\n");
    }

    #[test]
    fn test_cover_image_fragment() {
        assert_eq!(cover_image_fragment(&Cover::default()), "");

        let plain = Cover {
            url: Some("/c.png".to_string()),
            ..Default::default()
        };
        let html = cover_image_fragment(&plain);
        assert!(html.contains("<img src=\"/c.png\""));
        assert!(!html.contains("figcaption"));

        let captioned = Cover {
            url: Some("/c.png".to_string()),
            description: Some("Dunes at dawn".to_string()),
            source: None,
        };
        let html = cover_image_fragment(&captioned);
        assert!(html.contains("<figcaption>Dunes at dawn</figcaption>"));

        let linked = Cover {
            source: Some("https://photos.example/1".to_string()),
            ..captioned
        };
        let html = cover_image_fragment(&linked);
        assert!(html.contains(
            "<figcaption><a href=\"https://photos.example/1\">Dunes at dawn</a></figcaption>"
        ));
    }

    #[test]
    fn test_date_fragment() {
        let html = date_fragment(Some(day(2024, 1, 2)), day(2025, 1, 1));
        assert!(html.contains("datetime=\"2024-01-02\""));
        assert!(html.contains("Tuesday, 02 January 2024"));

        let html = date_fragment(None, day(2025, 3, 9));
        assert!(html.contains("Sunday, 09 March 2025"));
    }

    #[test]
    fn test_tag_chips_fragment() {
        let empty: [&str; 0] = [];
        assert_eq!(tag_chips_fragment(&empty, "/tags"), "");

        let html = tag_chips_fragment(&["Web Dev", "rust"], "https://x.dev/tags");
        assert!(html.contains("<a href=\"https://x.dev/tags/web-dev.html\" class=\"tag\">Web Dev</a>"));
        assert!(html.contains("<a href=\"https://x.dev/tags/rust.html\" class=\"tag\">rust</a>"));
    }

    #[test]
    fn test_post_teaser_fragment() {
        let post = derive_fields(
            "hello",
            parse_front_matter("---\ntitle: Hello\ndescription: Short and sweet.\nimage: /h.png\n---\n"),
            day(2024, 1, 1),
        );
        let html = post_teaser_fragment(&post, &SitePaths::new("out", "https://x.dev", "posts", "tags"));
        assert!(html.starts_with("<a href=\"https://x.dev/posts/hello.html\" class=\"post-card\">"));
        assert!(html.contains("<img src=\"/h.png\" alt=\"Hello\" />"));
        assert!(html.contains("<h2>Hello</h2>"));
        assert!(html.contains("<p>Short and sweet.</p>"));
        assert!(!html.contains("..."));
    }

    #[test]
    fn test_post_teaser_truncates_long_description() {
        let long = "lorem ipsum ".repeat(20);
        let post = derive_fields(
            "long",
            parse_front_matter(&format!("---\ndescription: {}\n---\n", long.trim())),
            day(2024, 1, 1),
        );
        let html = post_teaser_fragment(&post, &SitePaths::new("out", "", "posts", "tags"));
        assert!(html.contains("...</p>"));
        assert!(!html.contains("post-card-thumb"));
    }

    #[test]
    fn test_post_teaser_without_description() {
        let post = derive_fields("bare", parse_front_matter("Body"), day(2024, 1, 1));
        let html = post_teaser_fragment(&post, &SitePaths::new("out", "", "posts", "tags"));
        assert!(html.contains("<h2>bare</h2>"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_build_chrome() {
        let branding = Branding {
            name: "Field Notes".to_string(),
            logo: Some("/logo.svg".to_string()),
            ..Default::default()
        };
        let paths = SitePaths::new("out", "https://x.dev", "posts", "tags");

        let chrome = build_chrome(&branding, &paths, &[Singleton::Contact], 2024);
        assert!(chrome.header.contains("<img src=\"/logo.svg\" alt=\"Field Notes\" class=\"logo\" />"));
        assert!(chrome.header.contains("<a href=\"https://x.dev/posts.html\">Posts</a>"));
        assert!(chrome.header.contains("<a href=\"https://x.dev/contact.html\">Contact</a>"));
        assert!(!chrome.header.contains("about.html"));
        assert!(chrome.footer.contains("&copy; 2024 Field Notes"));
    }
}
