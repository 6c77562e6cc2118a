//! Default pipeline stages, one per page type.
//!
//! 1. **PostPagesStage** - one page per post
//! 2. **PostIndexStage** - every post plus the tag list
//! 3. **TagPagesStage** - one page per tag
//! 4. **HomeStage** - the newest posts
//! 5. **SingletonStage** - about/contact, when their sources exist

mod home;
mod index;
mod pages;
mod posts;
mod tags;

pub use home::HomeStage;
pub use index::PostIndexStage;
pub use pages::SingletonStage;
pub use posts::PostPagesStage;
pub use tags::TagPagesStage;

#[cfg(test)]
pub(crate) mod testing {
    //! A small in-memory site for stage tests.

    use chrono::NaiveDate;

    use crate::build::document::parse_front_matter;
    use crate::build::fragments::{Chrome, build_chrome};
    use crate::build::paths::SitePaths;
    use crate::build::pipeline::{PipelineContext, SingletonPage};
    use crate::build::post::{Post, derive_fields};
    use crate::build::render::{Renderer, Templates};
    use crate::build::tags::TagIndex;
    use crate::config::Branding;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    pub fn post(name: &str, front_matter: &str, body: &str) -> Post {
        let mut post = derive_fields(
            name,
            parse_front_matter(&format!("---\n{}\n---\n{}", front_matter, body)),
            today(),
        );
        post.render_body();
        post
    }

    pub fn sample_posts() -> Vec<Post> {
        vec![
            post("newest", "title: Newest\ndate: 2024-01-03\ntags: rust, Web Dev", "# Newest"),
            post("middle", "title: Middle\ndate: 2024-01-02\ntags: rust", "Middle body"),
            post("oldest", "date: 2024-01-01", "Oldest body"),
        ]
    }

    pub fn paths() -> SitePaths {
        SitePaths::new("/out", "https://blog.test/", "posts", "tags")
    }

    pub fn branding() -> Branding {
        Branding {
            name: "Test Blog".to_string(),
            ..Default::default()
        }
    }

    pub fn renderer(paths: &SitePaths, branding: &Branding) -> Renderer {
        let chrome: Chrome = build_chrome(branding, paths, &[], 2024);
        Renderer::new(&Templates::builtin(), &chrome)
    }

    pub fn context<'a>(
        posts: &'a [Post],
        tags: &'a TagIndex<'a>,
        singletons: &'a [SingletonPage],
        paths: &'a SitePaths,
        branding: &'a Branding,
        renderer: &'a Renderer,
    ) -> PipelineContext<'a> {
        PipelineContext {
            posts,
            tags,
            singletons,
            paths,
            branding,
            home_posts: 2,
            today: today(),
            renderer,
        }
    }
}
