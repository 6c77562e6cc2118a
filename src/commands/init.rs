use std::path::Path;

use crate::{
    InitArgs,
    config::{BlogConfig, Branding, CONFIG_FILE},
};

const SAMPLE_POST: &str = "---
title: Hello, world
description: The first post on this blog.
date: 2024-01-01
tags: [meta]
---
# Hello, world

This post was created by `readyblog init`. Edit or delete it, then run
`readyblog build`.
";

const SAMPLE_ABOUT: &str = "---
title: About
---
Write something about yourself here.
";

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            tracing::info!("created directory {}", path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(CONFIG_FILE);
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "{} already exists",
            config_file.display()
        ));
    }

    tracing::info!("initializing blog in {}", path.display());

    let default_config = BlogConfig {
        branding: Branding {
            name: "My Blog".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let config_text = serde_yaml::to_string(&default_config)?;
    tokio::fs::write(&config_file, config_text).await?;
    tracing::info!("created config file {}", config_file.display());

    scaffold(&path, &default_config).await?;

    Ok(())
}

/// Write a sample post and about page, leaving existing files alone.
async fn scaffold(path: &Path, config: &BlogConfig) -> Result<(), anyhow::Error> {
    let files = [
        (
            path.join(&config.posts_dir)
                .join(format!("hello-world.{}", config.extension)),
            SAMPLE_POST,
        ),
        (
            path.join(&config.pages_dir)
                .join(format!("about.{}", config.extension)),
            SAMPLE_ABOUT,
        ),
    ];

    for (file, text) in files {
        if file.exists() {
            tracing::debug!("keeping existing {}", file.display());
            continue;
        }
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, text).await?;
        tracing::info!("created {}", file.display());
    }

    Ok(())
}
