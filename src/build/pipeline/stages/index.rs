//! Post index stage.

use crate::build::fragments::{post_list_fragment, tag_chips_fragment};
use crate::build::pipeline::{PipelineContext, PipelineError, RenderedPage, Stage};
use crate::build::render::{PageKind, Placeholder};

/// Renders `posts.html`: every post, newest first, and every tag.
pub struct PostIndexStage;

impl Stage for PostIndexStage {
    fn name(&self) -> &'static str {
        "post-index"
    }

    fn render(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError> {
        let tags: Vec<&str> = ctx.tags.tags().collect();

        let bindings = ctx
            .base_bindings(ctx.listing_meta("Posts"))
            .bind(
                Placeholder::Posts,
                post_list_fragment(ctx.posts, ctx.paths),
            )
            .bind(
                Placeholder::Tags,
                tag_chips_fragment(tags.as_slice(), &ctx.paths.tags_base()),
            );

        let html = ctx
            .renderer
            .render(PageKind::PostIndex, &bindings)
            .map_err(|e| PipelineError::stage(self.name(), e))?;

        Ok(vec![RenderedPage {
            kind: PageKind::PostIndex,
            output_path: ctx.paths.post_index_file(),
            html,
        }])
    }
}
