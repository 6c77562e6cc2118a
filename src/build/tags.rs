//! Grouping posts by tag.

use indexmap::IndexMap;

use crate::util::tag_slug;

use super::post::Post;

/// Posts sharing one tag page.
#[derive(Debug)]
struct TagBucket<'a> {
    /// The spelling seen first; names the page
    name: String,
    posts: Vec<&'a Post>,
}

/// Posts grouped by tag.
///
/// Tags iterate in the order they were first seen across the post sequence;
/// each bucket lists its posts in post order. Spellings that share a slug
/// (`Web Dev`, `web dev`) share one bucket, since they share one page.
/// Buckets borrow the posts, so every per-post field must be final before
/// the index is built.
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    buckets: IndexMap<String, TagBucket<'a>>,
}

impl<'a> TagIndex<'a> {
    /// Build the index over already sorted posts.
    pub fn build(posts: &'a [Post]) -> Self {
        let mut buckets: IndexMap<String, TagBucket<'a>> = IndexMap::new();
        for post in posts {
            for tag in &post.tags {
                let bucket = buckets.entry(tag_slug(tag)).or_insert_with(|| TagBucket {
                    name: tag.clone(),
                    posts: Vec::new(),
                });
                if bucket.posts.last().is_some_and(|last| std::ptr::eq(*last, post)) {
                    continue;
                }
                bucket.posts.push(post);
            }
        }
        Self { buckets }
    }

    /// Tags in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.values().map(|bucket| bucket.name.as_str())
    }

    /// Posts carrying `tag` or any spelling with the same slug.
    #[cfg(test)]
    pub fn get(&self, tag: &str) -> Option<&[&'a Post]> {
        self.buckets
            .get(&tag_slug(tag))
            .map(|bucket| bucket.posts.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Post])> {
        self.buckets
            .values()
            .map(|bucket| (bucket.name.as_str(), bucket.posts.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::parse_front_matter;
    use crate::build::post::{UNTAGGED, derive_fields};
    use chrono::NaiveDate;

    fn post(name: &str, tags: &str) -> Post {
        let text = if tags.is_empty() {
            "Body".to_string()
        } else {
            format!("---\ntags: {}\n---\nBody", tags)
        };
        derive_fields(
            name,
            parse_front_matter(&text),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    fn names(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_tags_in_first_seen_order() {
        let posts = vec![post("a", "zebra, apple"), post("b", "mango, zebra"), post("c", "")];
        let index = TagIndex::build(&posts);
        let tags: Vec<&str> = index.tags().collect();
        assert_eq!(tags, vec!["zebra", "apple", "mango", UNTAGGED]);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_membership_matches_post_tags() {
        let posts = vec![
            post("a", "rust, web"),
            post("b", "web"),
            post("c", ""),
            post("d", "rust"),
        ];
        let index = TagIndex::build(&posts);

        for post in &posts {
            for (tag, members) in index.iter() {
                let listed = members.iter().any(|p| p.name == post.name);
                assert_eq!(listed, post.tags.iter().any(|t| t == tag), "{} in {}", post.name, tag);
            }
        }

        assert_eq!(names(index.get("rust").unwrap()), vec!["a", "d"]);
        assert_eq!(names(index.get("web").unwrap()), vec!["a", "b"]);
        assert_eq!(names(index.get(UNTAGGED).unwrap()), vec!["c"]);
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_empty_index() {
        let posts: Vec<Post> = Vec::new();
        let index = TagIndex::build(&posts);
        assert!(index.is_empty());
    }

    #[test]
    fn test_spellings_with_one_slug_share_a_bucket() {
        let posts = vec![
            post("a", "Web Dev"),
            post("b", "web dev, rust"),
            post("c", "Web Dev, web dev, web  dev"),
            post("d", "WEB DEV"),
        ];
        let index = TagIndex::build(&posts);

        let tags: Vec<&str> = index.tags().collect();
        assert_eq!(tags, vec!["Web Dev", "rust", "web  dev"]);
        assert_eq!(names(index.get("web dev").unwrap()), vec!["a", "b", "c", "d"]);
        assert_eq!(names(index.get("Web Dev").unwrap()), vec!["a", "b", "c", "d"]);
    }
}
