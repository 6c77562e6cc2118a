use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};

use crate::config::BlogConfig;

use super::fragments::build_chrome;
use super::paths::SitePaths;
use super::pipeline::{Pipeline, PipelineContext, PipelineError, SingletonPage};
use super::post::{Post, sort_posts};
use super::render::{RenderError, Renderer, Templates};
use super::source::{Singleton, load_content, load_singleton};
use super::tags::TagIndex;
use super::write::{WriteError, write_pages};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// What a finished build produced.
///
/// `failed` holds page writes that didn't succeed; every other page was
/// written before this is returned.
#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    pub posts: usize,
    pub tags: usize,
    pub pages_written: usize,
    pub failed: Vec<WriteError>,
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Builder {
    config: BlogConfig,
    today: NaiveDate,
}

impl Builder {
    pub fn new(config: BlogConfig) -> Self {
        Self {
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the build date (used for undated posts and the footer year).
    #[cfg(test)]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Load and derive posts, newest first
        // 2. Group posts by tag
        // 3. Load about/contact pages
        // 4. Load templates and bake in the chrome
        // 5. Render every page in memory
        // 6. Write all pages and wait for every write

        // Step 1: Posts
        let posts_dir = self.config.posts_source();
        let mut posts: Vec<Post> = load_content(&posts_dir, &self.config.extension)
            .await
            .iter()
            .map(|raw| {
                let mut post = Post::from_raw(raw, self.today);
                post.render_body();
                post
            })
            .collect();
        sort_posts(&mut posts);
        tracing::info!(dir = %posts_dir.display(), "loaded {} post(s)", posts.len());

        // Step 2: Tags
        let tags = TagIndex::build(&posts);
        if tags.is_empty() {
            tracing::warn!(dir = %posts_dir.display(), "no posts found");
        } else {
            tracing::debug!("indexed {} tag(s)", tags.len());
        }

        // Step 3: Singletons
        let singletons = self.load_singletons().await;

        // Step 4: Templates
        let templates = Templates::load(&self.config.templates_dir()).await?;
        let paths = SitePaths::from_config(&self.config);
        let present: Vec<Singleton> = singletons.iter().map(|s| s.singleton).collect();
        let chrome = build_chrome(&self.config.branding, &paths, &present, self.today.year());
        let renderer = Renderer::new(&templates, &chrome);

        // Step 5: Render
        let ctx = PipelineContext {
            posts: &posts,
            tags: &tags,
            singletons: &singletons,
            paths: &paths,
            branding: &self.config.branding,
            home_posts: self.config.home_posts,
            today: self.today,
            renderer: &renderer,
        };
        let pages = Pipeline::default().run(&ctx)?;

        // Step 6: Write
        let report = write_pages(&pages).await;
        tracing::info!(
            dir = %paths.output_dir().display(),
            "wrote {} of {} page(s)",
            report.written.len(),
            pages.len()
        );
        if !report.is_success() {
            tracing::warn!("{} page(s) failed to write", report.failed.len());
        }

        Ok(BuildResult {
            output_dir: paths.output_dir().to_path_buf(),
            posts: posts.len(),
            tags: tags.len(),
            pages_written: report.written.len(),
            failed: report.failed,
        })
    }

    /// Load the about/contact pages whose sources exist.
    async fn load_singletons(&self) -> Vec<SingletonPage> {
        let pages_dir = self.config.pages_source();
        let mut singletons = Vec::new();

        for singleton in Singleton::ALL {
            let Some(raw) = load_singleton(&pages_dir, singleton, &self.config.extension).await
            else {
                continue;
            };
            let mut page = Post::from_raw(&raw, self.today);
            page.render_body();
            singletons.push(SingletonPage { singleton, page });
        }

        singletons
    }
}
