//! About/contact page stage.

use crate::build::fragments::cover_image_fragment;
use crate::build::pipeline::{PipelineContext, PipelineError, RenderedPage, Stage};
use crate::build::render::Placeholder;

/// Renders the about and contact pages that have a source file.
pub struct SingletonStage;

impl Stage for SingletonStage {
    fn name(&self) -> &'static str {
        "pages"
    }

    fn render(&self, ctx: &PipelineContext) -> Result<Vec<RenderedPage>, PipelineError> {
        ctx.singletons
            .iter()
            .map(|singleton| {
                let page = &singleton.page;
                let bindings = ctx
                    .base_bindings(ctx.page_meta(&page.meta, &page.title))
                    .bind(Placeholder::Cover, cover_image_fragment(&page.cover))
                    .bind(Placeholder::Content, page.html_body.as_str());

                let html = ctx
                    .renderer
                    .render(singleton.kind(), &bindings)
                    .map_err(|e| PipelineError::stage(self.name(), e))?;

                Ok(RenderedPage {
                    kind: singleton.kind(),
                    output_path: ctx.paths.singleton_file(singleton.singleton),
                    html,
                })
            })
            .collect()
    }
}
