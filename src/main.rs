use autotoc::{autotoc as toc, config, generate, markdown, output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "autotoc")]
#[command(about = "Static article site builder with automatic tables of contents")]
#[command(long_about = "\
Static article site builder with automatic tables of contents

Every markdown file under the content directory becomes an article page.
Headings become a nested \"Contents\" navigation, and each listed heading
gets a fragment id derived from its text (\"Getting Started\" → #getting-started).

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Copied as-is to the output root
  ├── 010-bessel-correction.md     # Article \"bessel-correction\"
  └── python/
      └── snakebytes-enum.md       # Subdirectories only group files

Front matter (optional, between +++ lines):
  title, date, summary, tags, draft

Run 'autotoc gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Print debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags that override the `[toc]` config section.
#[derive(clap::Args, Clone)]
struct TocArgs {
    /// Tag that starts a section (repeatable, e.g. --heading-tag H2 --heading-tag H3)
    #[arg(long = "heading-tag", value_name = "TAG")]
    heading_tags: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the outline of a single markdown file
    Outline {
        /// Markdown file to outline
        file: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        toc: TocArgs,
    },
    /// Validate content directory without building
    Check,
    /// Build the site: scan → generate
    Build(TocArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Outline { file, json, toc: toc_args } => {
            let tags = if toc_args.heading_tags.is_empty() {
                load_source_config(&cli.source)?.toc.heading_tags()
            } else {
                toc::HeadingTags::new(&toc_args.heading_tags)
            };
            let content = std::fs::read_to_string(&file)?;
            let mut doc = markdown::parse(&content);
            let sections = toc::extract_with(&mut doc, &tags);
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                output::print_outline(&sections);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Build(toc_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let mut manifest = scan::scan(&cli.source)?;
            if !toc_args.heading_tags.is_empty() {
                manifest.config.toc.heading_tags = toc_args.heading_tags;
                manifest.config.validate()?;
            }
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Config of the content directory, or stock defaults when it does not exist.
fn load_source_config(source: &Path) -> Result<config::SiteConfig, config::ConfigError> {
    if source.is_dir() {
        config::load_config(source)
    } else {
        Ok(config::SiteConfig::default())
    }
}
