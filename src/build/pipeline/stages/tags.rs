//! Tag page stage.

use crate::build::fragments::post_list_fragment;
use crate::build::pipeline::{PipelineContext, PipelineError, RenderedPage, Stage};
use crate::build::render::{PageKind, Placeholder};

/// Renders one page per tag listing the posts that carry it.
pub struct TagPagesStage;

impl Stage for TagPagesStage {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn render(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError> {
        ctx.tags
            .iter()
            .map(|(tag, posts)| {
                let bindings = ctx
                    .base_bindings(ctx.listing_meta(tag))
                    .bind(Placeholder::Title, tag)
                    .bind(
                        Placeholder::Posts,
                        post_list_fragment(posts.iter().copied(), ctx.paths),
                    );

                let html = ctx
                    .renderer
                    .render(PageKind::TagIndex, &bindings)
                    .map_err(|e| PipelineError::stage(self.name(), e))?;

                Ok(RenderedPage {
                    kind: PageKind::TagIndex,
                    output_path: ctx.paths.tag_file(tag),
                    html,
                })
            })
            .collect()
    }
}
