//! Markdown rendering with heading anchors.
//!
//! Raw HTML in a post passes through untouched. Posts are written by the
//! blog's own authors; do not feed this untrusted input.

use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Render markdown to HTML using pulldown-cmark.
///
/// Headings without an explicit `{#id}` get one generated from their text,
/// unique within the document.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;

    let parser = Parser::new_ext(markdown, options);

    let mut used_heading_ids: HashSet<String> = HashSet::new();
    let mut heading: Option<HeadingState> = None;
    let mut events: Vec<Event> = Vec::new();

    for event in parser {
        if let Some(state) = heading.as_mut() {
            if matches!(event, Event::End(TagEnd::Heading(_))) {
                let rendered = state.render(&mut used_heading_ids);
                heading = None;
                events.push(Event::Html(rendered.into()));
            } else {
                state.push(event);
            }
            continue;
        }

        match event {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                heading = Some(HeadingState {
                    level,
                    classes,
                    attrs,
                    text: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::Start(Tag::Heading {
                id: Some(ref id), ..
            }) => {
                used_heading_ids.insert(id.to_string());
                events.push(event);
            }
            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// A heading being collected until its end tag.
struct HeadingState<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    /// Plain text, for the id
    text: String,
    /// Inline events, rendered as the heading's content
    inner: Vec<Event<'a>>,
}

impl<'a> HeadingState<'a> {
    fn push(&mut self, event: Event<'a>) {
        if let Event::Text(text) | Event::Code(text) = &event {
            self.text.push_str(text);
        }
        self.inner.push(event);
    }

    fn render(&mut self, used_ids: &mut HashSet<String>) -> String {
        let base_id = match slugify(&self.text) {
            slug if slug.is_empty() => "section".to_string(),
            slug => slug,
        };
        let mut id = base_id.clone();
        let mut suffix = 1;
        while used_ids.contains(&id) {
            id = format!("{}-{}", base_id, suffix);
            suffix += 1;
        }
        used_ids.insert(id.clone());

        let class_attr = if self.classes.is_empty() {
            String::new()
        } else {
            format!(
                " class=\"{}\"",
                self.classes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
            )
        };

        let extra_attrs = self
            .attrs
            .iter()
            .map(|(k, v)| match v {
                Some(val) => format!(" {}=\"{}\"", k, val),
                None => format!(" {}", k),
            })
            .collect::<String>();

        let mut content = String::new();
        html::push_html(&mut content, self.inner.drain(..));

        let level = self.level as usize;
        format!(
            "<h{} id=\"{}\"{}{}>{}</h{}>\n",
            level, id, class_attr, extra_attrs, content, level
        )
    }
}

/// Convert heading text to a slug suitable for use as an HTML id.
fn slugify(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(' ', "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-', "")
}
