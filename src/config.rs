use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "toolshed.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub packages: PackagesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageConfig {
    /// LCOV tracefile, relative to the project root
    #[serde(default = "default_coverage_file")]
    pub file: PathBuf,
    /// Minimum overall line coverage, in percent
    #[serde(default = "default_minimum")]
    pub minimum: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Removed from the child environment of every wrapped tool
    #[serde(default = "default_strip_env")]
    pub strip_env: Vec<String>,
    #[serde(default = "default_format")]
    pub format: Vec<String>,
    #[serde(default = "default_analyze")]
    pub analyze: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    #[serde(default = "default_packages_dir")]
    pub dir: PathBuf,
    /// A subdirectory is a package only if it contains this file
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// The package path is appended as the last argument
    #[serde(default = "default_analyzer")]
    pub analyzer: Vec<String>,
}

fn default_coverage_file() -> PathBuf {
    PathBuf::from("coverage/lcov.info")
}

fn default_minimum() -> f64 {
    78.0
}

fn default_strip_env() -> Vec<String> {
    vec!["GIT_DIR".to_string(), "GIT_WORK_TREE".to_string()]
}

fn default_format() -> Vec<String> {
    vec!["dart".to_string(), "format".to_string()]
}

fn default_analyze() -> Vec<String> {
    vec!["flutter".to_string(), "analyze".to_string()]
}

fn default_packages_dir() -> PathBuf {
    PathBuf::from("packages")
}

fn default_manifest() -> String {
    "pubspec.yaml".to_string()
}

fn default_analyzer() -> Vec<String> {
    vec![
        "dart".to_string(),
        "analyze".to_string(),
        "--fatal-infos".to_string(),
    ]
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            file: default_coverage_file(),
            minimum: default_minimum(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            strip_env: default_strip_env(),
            format: default_format(),
            analyze: default_analyze(),
        }
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            dir: default_packages_dir(),
            manifest: default_manifest(),
            analyzer: default_analyzer(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the config and resolve the project root it applies to.
    ///
    /// An explicit path must exist. Without one, `toolshed.toml` in the
    /// current directory is used if present, otherwise the defaults.
    pub fn locate(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let cwd = std::env::current_dir().context("Could not determine current directory")?;

        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = cwd.join(CONFIG_FILE);
                if !default_path.is_file() {
                    return Ok((Config::default(), cwd));
                }
                default_path
            }
        };

        let path = fs::canonicalize(&path)
            .with_context(|| format!("Could not find config file: {}", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or(cwd);

        Ok((Config::load(&path)?, base_dir))
    }

    fn validate(&self) -> Result<()> {
        let minimum = self.coverage.minimum;
        if !(0.0..=100.0).contains(&minimum) {
            anyhow::bail!("coverage.minimum must be between 0 and 100, got {}", minimum);
        }

        for (key, command) in [
            ("tools.format", &self.tools.format),
            ("tools.analyze", &self.tools.analyze),
            ("packages.analyzer", &self.packages.analyzer),
        ] {
            if command.is_empty() {
                anyhow::bail!("{} must name an executable", key);
            }
        }

        if self.packages.manifest.is_empty() {
            anyhow::bail!("packages.manifest must not be empty");
        }

        Ok(())
    }
}
