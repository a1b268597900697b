//! Demo binary: runs a YAML show file against the headless view adapter,
//! logging every fade, swap, and timer firing.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::time::sleep;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use slideshow_engine::engine::Regions;
use slideshow_engine::view::headless::HeadlessView;
use slideshow_engine::{Catalog, ShowRegistry, Slideshow, config};

#[derive(Debug, Parser)]
#[command(name = "slideshow-engine", about = "Slide rotation engine demo")]
struct Cli {
    /// Path to YAML show file
    #[arg(short, long, value_name = "FILE", default_value = "slideshow.yaml")]
    config: PathBuf,

    /// Stop after this long instead of waiting for ctrl-c
    #[arg(long, value_name = "DURATION")]
    run_for: Option<humantime::Duration>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("slideshow_engine={}", level).parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let show_file = config::from_yaml_file(&cli.config)
        .with_context(|| format!("loading show file from {}", cli.config.display()))?;
    show_file.options.validate().context("validating options")?;

    let view = HeadlessView::new();
    let regions = Regions {
        image: view.region("image"),
        carousel: Some(view.region("carousel")),
        title: Some(view.region("title")),
        caption: Some(view.region("caption")),
    };
    let registry = ShowRegistry::new();
    let catalog = Arc::new(Catalog::new(show_file.slides));
    info!(slides = catalog.len(), "starting show");
    let show = Slideshow::new(
        catalog,
        regions,
        show_file.options,
        view.clone(),
        &registry,
    )?;

    match cli.run_for {
        Some(duration) => sleep(duration.into()).await,
        None => tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?,
    }
    registry.pause_all();
    info!(current = ?show.current_index(), "show stopped");
    Ok(())
}
