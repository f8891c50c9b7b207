//! txtbook configuration: project layout and default input/output paths.

use crate::convert::ConvertPaths;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_INPUT: &str = "original/吾輩は猫である.txt";
const DEFAULT_OUTPUT: &str = "lib/mock-data/wagahai.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtbookConfig {
    /// Directory relative paths are resolved against. None means the current directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    /// Source text, relative to the project root unless absolute
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// JSON destination, relative to the project root unless absolute
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for TxtbookConfig {
    fn default() -> Self {
        Self {
            project_root: None,
            input: default_input(),
            output: default_output(),
        }
    }
}

/// Per-run path overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub root: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl TxtbookConfig {
    /// Get the config file path: ~/.config/cli-programs/txtbook.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("txtbook.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config for a conversion run.
    ///
    /// A missing home directory means there is no config file to read, so the
    /// built-in layout is used instead of failing the run.
    pub fn load_for_run() -> Result<Self> {
        Self::load_or_default(Self::config_path())
    }

    fn load_or_default(path: Result<PathBuf>) -> Result<Self> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::debug!("No config location ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Load config from `path`, returning default if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: TxtbookConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Resolve the input and output paths for one run.
    ///
    /// Overrides win over configured values. Relative paths are joined onto
    /// the project root, which itself is resolved against `cwd`.
    pub fn resolve_paths(&self, overrides: &PathOverrides, cwd: &Path) -> ConvertPaths {
        let root = overrides
            .root
            .as_deref()
            .or(self.project_root.as_deref())
            .map(|r| cwd.join(r))
            .unwrap_or_else(|| cwd.to_path_buf());

        let input = overrides.input.as_deref().unwrap_or(&self.input);
        let output = overrides.output.as_deref().unwrap_or(&self.output);

        ConvertPaths {
            input: root.join(input),
            output: root.join(output),
        }
    }
}
