//! Post page stage.

use crate::build::fragments::{cover_image_fragment, date_fragment, tag_chips_fragment};
use crate::build::pipeline::{PipelineContext, PipelineError, RenderedPage, Stage};
use crate::build::render::{PageKind, Placeholder};

/// Renders one page per post: cover, date, tags and the rendered body.
pub struct PostPagesStage;

impl Stage for PostPagesStage {
    fn name(&self) -> &'static str {
        "posts"
    }

    fn render(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError> {
        let tags_base = ctx.paths.tags_base();

        ctx.posts
            .iter()
            .map(|post| {
                let bindings = ctx
                    .base_bindings(ctx.page_meta(&post.meta, &post.title))
                    .bind(Placeholder::Cover, cover_image_fragment(&post.cover))
                    .bind(Placeholder::Date, date_fragment(Some(post.date), ctx.today))
                    .bind(Placeholder::Tags, tag_chips_fragment(post.tags.as_slice(), &tags_base))
                    .bind(Placeholder::Content, post.html_body.as_str());

                let html = ctx
                    .renderer
                    .render(PageKind::PostDetail, &bindings)
                    .map_err(|e| PipelineError::stage(self.name(), e))?;

                Ok(RenderedPage {
                    kind: PageKind::PostDetail,
                    output_path: ctx.paths.post_file(&post.name),
                    html,
                })
            })
            .collect()
    }
}
