//! Multi-package static analysis

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::ToolCommand;

/// A package directory directly under the packages root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub path: PathBuf,
}

/// Outcome of analyzing every discovered package
#[derive(Debug, Clone, Default)]
pub struct PackageAnalysis {
    pub analyzed: Vec<String>,
    pub failed: Vec<String>,
}

impl PackageAnalysis {
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Immediate subdirectories of `packages_dir` containing `manifest`, sorted by name
pub fn discover_packages(packages_dir: &Path, manifest: &str) -> Result<Vec<Package>> {
    if !packages_dir.is_dir() {
        anyhow::bail!("Packages directory not found: {}", packages_dir.display());
    }

    let escaped = glob::Pattern::escape(&packages_dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*");
    let pattern = pattern.to_string_lossy();

    let mut packages = Vec::new();
    for entry in glob::glob(&pattern)
        .with_context(|| format!("Invalid packages directory: {}", packages_dir.display()))?
    {
        let path = entry.with_context(|| {
            format!("Failed to read packages directory: {}", packages_dir.display())
        })?;
        if !path.join(manifest).is_file() {
            continue;
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        packages.push(Package { name, path });
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(packages)
}

/// Run `analyzer <package path>` for each package, one at a time
pub fn analyze_packages(packages: &[Package], analyzer: &ToolCommand) -> Result<PackageAnalysis> {
    let mut analysis = PackageAnalysis::default();

    for package in packages {
        println!("{} Analyzing {}...", "→".blue(), package.name.cyan());

        let code = analyzer.clone().arg(package.path.as_os_str()).status()?;

        analysis.analyzed.push(package.name.clone());
        if code != 0 {
            analysis.failed.push(package.name.clone());
        }
    }

    Ok(analysis)
}
