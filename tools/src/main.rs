use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use pointillism::config::{BuildMode, ResolvedConfig, SiteConfig};
use pointillism::{RGBColor, SchemeSet};
use rgb::RGB8;

#[derive(Parser, Debug)]
#[command(
    name = "pointillism",
    about = "Color schemes and site configuration of population pointillism maps",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the color of a value as #rrggbb
    Color {
        /// Scheme name (people, gender, density)
        scheme: String,
        /// Category key, or a number in [0, 1] for the density scheme
        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Print the built-in color schemes as JSON
    Export,

    /// Print the resolved site configuration as JSON
    Config {
        /// TOML configuration file (defaults are used otherwise)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Build tool arguments, after `--`; `dev` selects the
        /// development base path
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Color of `value` in the built-in scheme `scheme`, as #rrggbb.
fn color(scheme: &str, value: &str) -> Result<String> {
    let scheme = RGB8::scheme(scheme)?;
    let input = scheme.parse_input(value)?;
    Ok(css_string(scheme.color(input)?))
}

fn resolve_config(config: Option<&PathBuf>, args: &[String])
                  -> Result<ResolvedConfig> {
    let site = match config {
        Some(path) => SiteConfig::load(path).with_context(
            || format!("Failed to load {}", path.display()))?,
        None => SiteConfig::default(),
    };
    let mode = BuildMode::from_args(args);
    info!("Building in {mode:?} mode");
    Ok(site.resolve(mode))
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Color { scheme, value } => {
            println!("{}", color(&scheme, &value)?);
        }
        Command::Export => {
            println!("{}", SchemeSet::builtin().to_json()?);
        }
        Command::Config { config, args } => {
            let resolved = resolve_config(config.as_ref(), &args)?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
    }
    Ok(())
}
