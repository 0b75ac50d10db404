//! Vitrine - Main Entry Point
//!
//! Loads a page, fires `DOMContentLoaded`, lets the virtual clock run and
//! prints the resulting document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_script::{Page, ScriptConfig};

#[derive(Debug, Parser)]
#[command(name = "vitrine")]
#[command(about = "Run the site script against an HTML page and print the resulting DOM", long_about = None)]
#[command(version)]
struct Args {
    /// HTML page to load
    page: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Virtual milliseconds to run after startup
    #[arg(long, default_value_t = 0)]
    run_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting Vitrine {}", vitrine_script::VERSION);

    let config = match &args.config {
        Some(path) => ScriptConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScriptConfig::default(),
    };

    let mut page = Page::open(&args.page, config)
        .with_context(|| format!("opening {}", args.page.display()))?;
    page.content_loaded();
    page.advance_time(args.run_ms);

    if let Some(carousel) = page.carousel() {
        info!(
            "t={}ms: showing slide {} of {}",
            page.now(),
            carousel.current_index() + 1,
            carousel.slides().len()
        );
    }

    println!("{}", page.to_html());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("vitrine").chain(list.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_page_only() {
        let parsed = args(&["index.html"]).unwrap();
        assert_eq!(parsed.page, PathBuf::from("index.html"));
        assert!(parsed.config.is_none());
        assert_eq!(parsed.run_ms, 0);
    }

    #[test]
    fn test_all_options() {
        let parsed = args(&["--run-ms", "9000", "index.html", "--config", "site.json"]).unwrap();
        assert_eq!(parsed.page, PathBuf::from("index.html"));
        assert_eq!(parsed.config, Some(PathBuf::from("site.json")));
        assert_eq!(parsed.run_ms, 9000);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(args(&[]).is_err());
        assert!(args(&["index.html", "--run-ms", "soon"]).is_err());
        assert!(args(&["index.html", "--config"]).is_err());
        assert!(args(&["index.html", "--verbose"]).is_err());
        assert!(args(&["a.html", "b.html"]).is_err());
    }
}
