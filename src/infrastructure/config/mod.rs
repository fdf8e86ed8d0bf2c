use std::path::{Path, PathBuf};

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::ads::ExportConfig;
use crate::domain::error::{AppError, Result};

/// One target market: where to write and how to localize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub name: String,
    pub output: PathBuf,

    #[serde(flatten)]
    pub export: ExportConfig,
}

/// Market file: a source sheet and the markets generated from it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketFile {
    /// Candidate input paths; the first existing one is used
    pub inputs: Vec<PathBuf>,
    pub markets: Vec<MarketConfig>,
}

impl MarketFile {
    pub fn resolve_input(&self) -> Option<&Path> {
        self.inputs
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.exists())
    }

    /// Make relative paths relative to `base`
    pub fn rebase(&mut self, base: &Path) {
        for input in &mut self.inputs {
            if input.is_relative() {
                *input = base.join(&*input);
            }
        }
        for market in &mut self.markets {
            if market.output.is_relative() {
                market.output = base.join(&market.output);
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.inputs.is_empty() {
            return Err("at least one input path is required".to_string());
        }
        if self.markets.is_empty() {
            return Err("at least one market is required".to_string());
        }
        for market in &self.markets {
            market
                .export
                .validate()
                .map_err(|e| format!("market '{}': {}", market.name, e))?;
        }
        Ok(())
    }
}

/// Loads market files from TOML
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, rebase relative paths onto the file's directory, and validate
    pub fn load(&self) -> Result<MarketFile> {
        if !self.path.exists() {
            return Err(AppError::MissingFile(self.path.display().to_string()));
        }

        let mut file = Self::extract(Self::figment().merge(Toml::file(&self.path)))?;

        if let Some(base) = self.path.parent() {
            file.rebase(base);
        }

        file.validate().map_err(AppError::ValidationError)?;
        Ok(file)
    }

    /// Parse a market file from a TOML string (paths left as written)
    pub fn load_str(toml: &str) -> Result<MarketFile> {
        let file = Self::extract(Self::figment().merge(Toml::string(toml)))?;

        file.validate().map_err(AppError::ValidationError)?;
        Ok(file)
    }

    /// Serialized defaults; TOML providers are merged over these
    fn figment() -> Figment {
        Figment::from(Serialized::defaults(MarketFile::default()))
    }

    fn extract(figment: Figment) -> Result<MarketFile> {
        figment
            .extract::<MarketFile>()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }
}
