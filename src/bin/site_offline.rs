//! Build-time CLI exposing the offline site tooling.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use offline_site_worker::pages::collect_site_pages;
use offline_site_worker::{Locale, PrecacheManifest, SiteConfig};

#[derive(Parser)]
#[command(
  name = "site-offline",
  version,
  about = "Offline cache and locale tooling for localized static sites"
)]
struct Cli {
  /// Project root containing site.config.json and the content tree.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Write the precache manifest for the site.
  Manifest {
    /// Output file; printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also precache asset references harvested from the content tree.
    #[arg(long)]
    content_assets: bool,
  },
  /// Resolve the locale for one or more content paths.
  Locale {
    /// Content-relative paths to resolve.
    paths: Vec<String>,
  },
  /// Emit metadata JSON for every authored page.
  Pages,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();
  let config = SiteConfig::discover(&cli.root);

  match cli.command {
    Command::Manifest {
      out,
      content_assets,
    } => {
      let mut manifest = PrecacheManifest::for_site(&config);
      if content_assets {
        let pages = collect_site_pages(&config, &config.content_dir_path(&cli.root))?;
        for page in &pages {
          manifest.extend_from_references(page.asset_references.iter());
        }
      }

      let json = manifest
        .to_json()
        .context("failed to serialize precache manifest")?;
      match out {
        Some(path) => fs::write(&path, json)
          .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
      }
    }
    Command::Locale { paths } => {
      for path in &paths {
        println!(
          "{}\t{}",
          path,
          Locale::resolve_path_or(path, config.default_locale)
        );
      }
    }
    Command::Pages => {
      let pages = collect_site_pages(&config, &config.content_dir_path(&cli.root))?;
      let json =
        serde_json::to_string_pretty(&pages).context("failed to serialize page metadata")?;
      println!("{json}");
    }
  }

  Ok(())
}
