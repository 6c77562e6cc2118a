//! Home page stage.

use crate::build::fragments::post_list_fragment;
use crate::build::pipeline::{PipelineContext, PipelineError, RenderedPage, Stage};
use crate::build::render::{PageKind, Placeholder};

/// Renders `index.html` with the newest `home_posts` posts.
pub struct HomeStage;

impl Stage for HomeStage {
    fn name(&self) -> &'static str {
        "home"
    }

    fn render(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError> {
        let recent = ctx.posts.iter().take(ctx.home_posts);

        let bindings = ctx.base_bindings(ctx.listing_meta("Home")).bind(
            Placeholder::Posts,
            post_list_fragment(recent, ctx.paths),
        );

        let html = ctx
            .renderer
            .render(PageKind::Home, &bindings)
            .map_err(|e| PipelineError::stage(self.name(), e))?;

        Ok(vec![RenderedPage {
            kind: PageKind::Home,
            output_path: ctx.paths.home_file(),
            html,
        }])
    }
}
