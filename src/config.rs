//! Build configuration of the statically exported site.
//!
//! The site is exported to a directory of pages and assets and served
//! under a base path.  The base path is empty during development and
//! a fixed sub-path in production:
//!
//! ```
//! use pointillism::config::{BuildMode, SiteConfig};
//! let config = SiteConfig::default();
//! let dev = config.resolve(BuildMode::from_args(["vite", "dev"]));
//! assert_eq!(dev.base, "");
//! let prod = config.resolve(BuildMode::from_args(["vite", "build"]));
//! assert_eq!(prod.base, "/population-pointillism");
//! assert_eq!(prod.url("favicon.png"), "/population-pointillism/favicon.png");
//! ```

use std::fs;
use std::path::Path;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Base path of the production site.
pub const DEFAULT_BASE_PATH: &str = "/population-pointillism";

/// Directory receiving the exported pages and assets.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Whether the site is built for local development or for publishing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Development iff one of the command line arguments is `dev`.
    pub fn from_args<I, S>(args: I) -> Self
    where I: IntoIterator<Item = S>, S: AsRef<str> {
        if args.into_iter().any(|a| a.as_ref() == "dev") {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub fn is_dev(self) -> bool { self == BuildMode::Development }
}

/// Site configuration, usually read from a TOML file:
///
/// ```toml
/// [adapter]
/// pages = "docs"
/// assets = "docs"
/// precompress = false
/// strict = true
///
/// [paths]
/// base = "/population-pointillism"
/// ```
///
/// Missing fields take their [default][Default] values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub adapter: AdapterOptions,
    pub paths: Paths,
}

/// Options of the static export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterOptions {
    /// Output directory of the pages.
    pub pages: String,
    /// Output directory of the assets.  Same as `pages` if unset.
    pub assets: Option<String>,
    /// Fallback page for routes that are not prerendered (SPA mode).
    pub fallback: Option<String>,
    /// Also write gzip and brotli compressed files.
    pub precompress: bool,
    /// Fail the build if some page cannot be prerendered.
    pub strict: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        AdapterOptions {
            pages: DEFAULT_OUTPUT_DIR.to_string(),
            assets: None,
            fallback: None,
            precompress: false,
            strict: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Paths {
    /// Base path in production.  Empty, or starting but not ending
    /// with `/`.
    pub base: String,
}

impl Default for Paths {
    fn default() -> Self { Paths { base: DEFAULT_BASE_PATH.to_string() } }
}

/// The configuration for a given [`BuildMode`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub mode: BuildMode,
    pub pages: String,
    pub assets: String,
    pub fallback: Option<String>,
    pub precompress: bool,
    pub strict: bool,
    pub base: String,
}

impl SiteConfig {
    /// Parse and [validate][Self::validate] a TOML configuration.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration file `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded site configuration from {}", path.display());
        Ok(config)
    }

    /// Check the base path and the output directories.
    pub fn validate(&self) -> Result<()> {
        let base = &self.paths.base;
        if !base.is_empty() && (!base.starts_with('/') || base.ends_with('/')) {
            return Err(Error::InvalidConfig(format!(
                "paths.base = {base:?} must be empty or start, \
                 but not end, with '/'")))
        }
        if self.adapter.pages.is_empty() {
            return Err(Error::InvalidConfig(
                "adapter.pages must not be empty".into()))
        }
        if self.adapter.assets.as_deref() == Some("") {
            return Err(Error::InvalidConfig(
                "adapter.assets must not be empty".into()))
        }
        Ok(())
    }

    /// The configuration used when building in `mode`.
    pub fn resolve(&self, mode: BuildMode) -> ResolvedConfig {
        let base = if mode.is_dev() { String::new() }
                   else { self.paths.base.clone() };
        debug!("Resolved base path {base:?} for {mode:?}");
        let a = &self.adapter;
        ResolvedConfig {
            mode,
            pages: a.pages.clone(),
            assets: a.assets.clone().unwrap_or_else(|| a.pages.clone()),
            fallback: a.fallback.clone(),
            precompress: a.precompress,
            strict: a.strict,
            base,
        }
    }
}

impl ResolvedConfig {
    /// URL of the site path `path` (with or without leading `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}


#[cfg(test)]
mod tests {
    use std::io::Write;
    use super::*;

    #[test]
    fn mode_from_args() {
        assert_eq!(BuildMode::from_args(["vite", "dev"]), BuildMode::Development);
        assert_eq!(BuildMode::from_args(["vite", "build"]), BuildMode::Production);
        assert_eq!(BuildMode::from_args(["--dev", "develop"]),
                   BuildMode::Production);
        assert_eq!(BuildMode::from_args(Vec::<String>::new()),
                   BuildMode::Production);
    }

    #[test]
    fn defaults() {
        let c = SiteConfig::default().resolve(BuildMode::Production);
        assert_eq!(c, ResolvedConfig {
            mode: BuildMode::Production,
            pages: "docs".into(),
            assets: "docs".into(),
            fallback: None,
            precompress: false,
            strict: true,
            base: "/population-pointillism".into(),
        });
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn base_path_depends_on_mode() {
        let config = SiteConfig::from_toml_str(
            "[paths]\nbase = \"/maps\"").unwrap();
        assert_eq!(config.resolve(BuildMode::Development).base, "");
        assert_eq!(config.resolve(BuildMode::Production).base, "/maps");
    }

    #[test]
    fn urls() {
        let dev = SiteConfig::default().resolve(BuildMode::Development);
        assert_eq!(dev.url("/data/people.json"), "/data/people.json");
        assert_eq!(dev.url(""), "/");
        let prod = SiteConfig::default().resolve(BuildMode::Production);
        assert_eq!(prod.url("/data/people.json"),
                   "/population-pointillism/data/people.json");
    }

    #[test]
    fn partial_toml() {
        let config = SiteConfig::from_toml_str(r#"
            [adapter]
            pages = "build"
            fallback = "200.html"
            precompress = true
        "#).unwrap();
        let c = config.resolve(BuildMode::Production);
        assert_eq!(c.pages, "build");
        assert_eq!(c.assets, "build");
        assert_eq!(c.fallback.as_deref(), Some("200.html"));
        assert!(c.precompress);
        assert!(c.strict);
        assert_eq!(c.base, DEFAULT_BASE_PATH);
    }

    #[test]
    fn invalid_base_paths() {
        for base in ["maps", "/maps/", "/"] {
            let toml = format!("[paths]\nbase = {base:?}");
            assert!(matches!(SiteConfig::from_toml_str(&toml),
                             Err(Error::InvalidConfig(_))), "{base}");
        }
        assert!(SiteConfig::from_toml_str("[paths]\nbase = \"\"").is_ok());
    }

    #[test]
    fn invalid_toml() {
        assert!(matches!(SiteConfig::from_toml_str("[adapter]\npage = \"x\""),
                         Err(Error::Toml(_))));
        assert!(matches!(SiteConfig::from_toml_str("[adapter]\npages = \"\""),
                         Err(Error::InvalidConfig(_))));
        assert!(matches!(SiteConfig::from_toml_str("[adapter]\nassets = \"\""),
                         Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[paths]\nbase = \"/pp\"").unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.paths.base, "/pp");
        assert!(matches!(SiteConfig::load("/nonexistent/site.toml"),
                         Err(Error::Io(_))));
    }
}
