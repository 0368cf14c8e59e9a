//! TOML configuration loading and validation. Every field has a default, so a missing file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::report::LogLevel;

/// File looked up in the working directory when no override is given.
pub const CONFIG_FILE_NAME: &str = "brabble-launcher.toml";

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "BRABBLE_LAUNCHER_CONFIG";

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "BRABBLE_LAUNCHER_LOG";

/// Top-level configuration for the launcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name of the compiled artifact
    pub program: String,

    /// Directory holding the artifact, relative to the working directory
    pub bin_dir: PathBuf,

    /// Subcommand forwarded when the launcher receives no arguments
    pub default_subcommand: String,

    /// Arguments used to query the artifact's version
    pub version_args: Vec<String>,

    /// Console verbosity
    pub log: LogLevel,

    /// How to produce the artifact when it is missing
    pub build: BuildConfig,
}

/// External build toolchain invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Toolchain executable, looked up on `PATH`
    pub program: String,

    /// Arguments; `{artifact}` and `{program}` are substituted
    pub args: Vec<String>,

    /// Directory the build runs in, relative to the working directory
    pub source_dir: PathBuf,

    /// Extra environment for the build process only
    pub env: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: "brabble".into(),
            bin_dir: PathBuf::from("bin"),
            default_subcommand: "serve".into(),
            version_args: vec!["--version".into()],
            log: LogLevel::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "go".into(),
            args: vec![
                "build".into(),
                "-o".into(),
                "{artifact}".into(),
                "./cmd/brabble".into(),
            ],
            source_dir: PathBuf::from("."),
            env: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from file, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            config.expand_tildes()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Expand `~` in all path fields.
    fn expand_tildes(&mut self) -> Result<()> {
        self.bin_dir = expand_tilde(&self.bin_dir)?;
        self.build.source_dir = expand_tilde(&self.build.source_dir)?;
        Ok(())
    }

    /// Load the config that applies to `workdir`, honouring the environment overrides.
    pub fn load_for(workdir: &Path) -> Result<Self> {
        let path = config_path(workdir, std::env::var_os(CONFIG_ENV));
        let mut config = Self::load(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = lookup(LOG_ENV) {
            self.log = level
                .parse()
                .with_context(|| format!("invalid {LOG_ENV} value"))?;
        }
        Ok(())
    }

    /// Validate config for common misconfigurations.
    pub fn validate(&self, workdir: &Path) -> Result<()> {
        anyhow::ensure!(!self.program.is_empty(), "program cannot be empty");
        anyhow::ensure!(
            !self.program.contains(['/', '\\']),
            "program must be a file name, not a path: '{}'",
            self.program
        );
        anyhow::ensure!(
            !self.default_subcommand.is_empty(),
            "default_subcommand cannot be empty"
        );
        anyhow::ensure!(
            !self.version_args.is_empty(),
            "version_args cannot be empty"
        );
        anyhow::ensure!(
            !self.build.program.is_empty(),
            "build.program cannot be empty"
        );

        let source_dir = self.build.source_dir(workdir);
        if source_dir.exists() && !source_dir.is_dir() {
            anyhow::bail!(
                "build.source_dir exists but is not a directory: {}",
                source_dir.display()
            );
        }

        Ok(())
    }
}

impl BuildConfig {
    /// Build arguments with placeholders substituted.
    pub fn expanded_args(&self, artifact: &Path, program: &str) -> Vec<String> {
        let artifact = artifact.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{artifact}", &artifact)
                    .replace("{program}", program)
            })
            .collect()
    }

    /// Directory the build runs in.
    pub fn source_dir(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.source_dir)
    }
}

/// Resolve which config file applies: the override wins, otherwise the working directory's file.
pub fn config_path(workdir: &Path, override_path: Option<OsString>) -> PathBuf {
    match override_path {
        Some(p) if !p.is_empty() => workdir.join(p),
        _ => workdir.join(CONFIG_FILE_NAME),
    }
}

/// Expand `~` prefix to the user's home directory.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Ok(stripped) = path.strip_prefix("~") {
        Ok(dirs::home_dir()
            .context("could not determine home directory")?
            .join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}
