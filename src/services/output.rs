use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::formatter::MarkdownContent;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Files written for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub json_path: PathBuf,
    /// `None` when the rendered Markdown was empty
    pub markdown_path: Option<PathBuf>,
}

/// Persists result trees and Markdown reports under one directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_dir(&self) -> Result<(), OutputError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| OutputError::Io {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Writes `<name>.json` as pretty-printed JSON
    pub fn write_json(&self, name: &str, tree: &Value) -> Result<PathBuf, OutputError> {
        self.ensure_dir()?;

        let path = self.output_dir.join(format!("{}.json", name));
        let content = serde_json::to_string_pretty(tree).map_err(|source| {
            OutputError::Serialize {
                name: name.to_string(),
                source,
            }
        })?;
        fs::write(&path, content).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Data saved to {}", path.display());
        Ok(path)
    }

    /// Writes `<name>.md`, or nothing when `markdown` is empty
    pub fn write_markdown(
        &self,
        name: &str,
        markdown: &MarkdownContent,
    ) -> Result<Option<PathBuf>, OutputError> {
        if markdown.0.trim().is_empty() {
            debug!("Empty markdown for {}, not written", name);
            return Ok(None);
        }
        self.ensure_dir()?;

        let path = self.output_dir.join(format!("{}.md", name));
        fs::write(&path, &markdown.0).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Markdown saved to {}", path.display());
        Ok(Some(path))
    }

    pub fn save(
        &self,
        name: &str,
        tree: &Value,
        markdown: &MarkdownContent,
    ) -> Result<SavedSnapshot, OutputError> {
        let json_path = self.write_json(name, tree)?;
        let markdown_path = self.write_markdown(name, markdown)?;
        Ok(SavedSnapshot {
            json_path,
            markdown_path,
        })
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
