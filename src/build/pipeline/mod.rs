//! Page rendering pipeline.
//!
//! Each stage renders one kind of page from the shared posts and tag index:
//! 1. Post pages
//! 2. Post index
//! 3. Tag pages
//! 4. Home page
//! 5. About/contact pages
//!
//! Stages only read the context, so their order decides nothing but the
//! order pages are handed to the writer.

mod context;
mod error;
mod stages;

use std::path::PathBuf;

use indexmap::IndexMap;

pub use context::{PipelineContext, SingletonPage};
pub use error::PipelineError;

use crate::build::render::PageKind;
use stages::{HomeStage, PostIndexStage, PostPagesStage, SingletonStage, TagPagesStage};

/// A fully rendered page waiting to be written.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub kind: PageKind,
    pub output_path: PathBuf,
    pub html: String,
}

/// A stage in the page rendering pipeline.
pub trait Stage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Render this stage's pages.
    fn render(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError>;
}

/// The page rendering pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with one stage per page type.
    ///
    /// Stages: posts → post-index → tags → home → pages
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(PostPagesStage);
        pipeline.add_stage(PostIndexStage);
        pipeline.add_stage(TagPagesStage);
        pipeline.add_stage(HomeStage);
        pipeline.add_stage(SingletonStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage and collect their pages.
    ///
    /// If two pages target the same file (e.g. an empty `posts_dir` and a
    /// post named `about`), the later one is kept and a warning logged.
    pub fn run(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError> {
        let mut pages: IndexMap<PathBuf, RenderedPage> = IndexMap::new();

        for stage in &self.stages {
            let rendered = stage.render(ctx)?;
            tracing::debug!(stage = stage.name(), pages = rendered.len(), "rendered stage");

            for page in rendered {
                if let Some(previous) = pages.insert(page.output_path.clone(), page) {
                    tracing::warn!(
                        path = %previous.output_path.display(),
                        "two pages share an output path, keeping the later {} page",
                        previous.kind
                    );
                }
            }
        }

        Ok(pages.into_values().collect())
    }

    /// Get the names of all stages in order.
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
