use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lore_machine::{
    generate_json, generate_lore, render, segment_remote, Event, FnEventHandler, LoreError, RunCtx,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lore-machine")]
#[command(about = "Turn a story into scene lore via a hosted generation service", long_about = None)]
struct Args {
    /// Base URL of the generation service (or LORE_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one JSON object from the whole story (non-streaming)
    Generate {
        /// The story text
        #[arg(short, long)]
        story: Option<String>,

        /// Read the story from a file instead
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Generate one scene per sentence and write the lore file
    Lore {
        /// The story text
        #[arg(short, long)]
        story: Option<String>,

        /// Read the story from a file instead
        #[arg(short, long)]
        file: Option<String>,

        /// Output path for the lore array
        #[arg(short, long, default_value = "lore.json")]
        output: String,
    },
    /// Ask the service to segment the story into paragraphs
    Segment {
        /// The story text
        #[arg(short, long)]
        story: Option<String>,

        /// Read the story from a file instead
        #[arg(short, long)]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let base_url = args
        .base_url
        .or_else(|| std::env::var("LORE_BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    match args.command {
        Command::Generate { story, file } => {
            let story = read_story(story, file).await?;
            let ctx = RunCtx::builder(base_url).build();
            match generate_json(&ctx, &story).await {
                Ok(generated) => {
                    println!("{}", generated.raw);
                    println!();
                    println!("{}", render::pretty(&generated.value));
                    println!();
                    println!("{}", render::tree(&generated.value));
                }
                Err(LoreError::InvalidJson { raw }) => {
                    error!("model did not return valid JSON");
                    eprintln!("Raw response from model:\n{}", raw);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Lore { story, file, output } => {
            let story = read_story(story, file).await?;
            let ctx = RunCtx::builder(base_url)
                .event_handler(Arc::new(FnEventHandler(|event| match event {
                    Event::SentenceStart { id, sentence } => {
                        info!("scene {}: {}", id, sentence);
                    }
                    Event::SceneSkipped { id, reason } => {
                        warn!("scene {} skipped: {}", id, reason);
                    }
                    _ => {}
                })))
                .build();

            let lore = generate_lore(&ctx, &story).await?;
            lore.save(&output).await?;
            info!("wrote {} scenes to {}", lore.len(), output);
            println!("{}", lore.to_json()?);
        }
        Command::Segment { story, file } => {
            let story = read_story(story, file).await?;
            let ctx = RunCtx::builder(base_url).build();
            match segment_remote(&ctx, &story).await {
                Ok(()) => info!("story segmented successfully"),
                Err(e) => {
                    error!("failed to segment story: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// The story comes from --story or --file, exactly one of which is required.
async fn read_story(story: Option<String>, file: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = story {
        return Ok(text);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(&path)
            .await
            .context(format!("Failed to read file: {}", path));
    }
    eprintln!("Error: Either --story or --file must be provided");
    std::process::exit(1);
}
