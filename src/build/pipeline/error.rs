//! Pipeline error types.

use crate::build::render::RenderError;

/// Errors that can occur while rendering pages.
///
/// Only programming errors end up here (a template bound without one of its
/// declared placeholders); bad content is handled by falling back to defaults.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        source: RenderError,
    },
}

impl PipelineError {
    /// Attach the failing stage's name to a render error.
    pub fn stage(stage: &'static str, source: RenderError) -> Self {
        Self::Stage { stage, source }
    }
}
