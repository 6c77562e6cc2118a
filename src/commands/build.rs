use crate::{
    BuildArgs,
    build::Builder,
    config::{BlogConfig, Overrides},
};

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let overrides = Overrides {
        root: args.root.clone(),
        output: args.output.clone(),
        base_url: args.base_url.clone(),
    };
    let config = BlogConfig::load_from_arg(args.config_file.as_deref(), &overrides)?;

    let builder = Builder::new(config);
    let result = builder.build().await?;

    tracing::info!(
        posts = result.posts,
        tags = result.tags,
        pages = result.pages_written,
        failed = result.failed.len(),
        "built blog to {}",
        result.output_dir.display()
    );

    // Every write has finished by now; failures only decide the exit status.
    if !result.is_success() {
        return Err(anyhow::anyhow!(
            "{} page(s) could not be written",
            result.failed.len()
        ));
    }

    Ok(())
}
