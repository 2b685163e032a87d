use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::tokenizer::NuggetTokenizer;
use crate::utils::make_relative_path;

/// Reference path recorded when reference tracking is turned off.
pub const DISABLED_REFERENCES: &str = "Disabled references";

/// One site where a message occurs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceContext {
    pub source_path: String,
    pub entity_context: String,
    pub position: usize,
}

impl ReferenceContext {
    pub fn new(
        source_path: impl Into<String>,
        entity_context: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            entity_context: entity_context.into(),
            position,
        }
    }

    pub fn disabled(entity_context: impl Into<String>) -> Self {
        Self::new(DISABLED_REFERENCES, entity_context, 0)
    }
}

/// A single tokenizer match, ready to be merged into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Message id as written in the file (not yet normalized).
    pub msgid: String,
    pub comment: Option<String>,
    pub reference: ReferenceContext,
    /// Display name of the file the occurrence came from.
    pub file_name: String,
}

/// Reads a file and turns each nugget in it into an [`Occurrence`].
pub struct NuggetExtractor<'a> {
    tokenizer: &'a dyn NuggetTokenizer,
    project_dir: &'a Path,
    disable_references: bool,
}

impl<'a> NuggetExtractor<'a> {
    pub fn new(
        tokenizer: &'a dyn NuggetTokenizer,
        project_dir: &'a Path,
        disable_references: bool,
    ) -> Self {
        Self {
            tokenizer,
            project_dir,
            disable_references,
        }
    }

    /// Extract every occurrence in `path`.
    ///
    /// The result is all-or-nothing: if the tokenizer fails part way through,
    /// no occurrence from the file is returned.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<Occurrence>, ExtractError> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
            .map_err(ExtractError::Read)?;
        let text = content.strip_prefix('\u{feff}').unwrap_or(&content);

        self.extract_text(path, text).map_err(ExtractError::Tokenize)
    }

    /// Extract occurrences from already loaded text attributed to `path`.
    pub fn extract_text(&self, path: &Path, text: &str) -> Result<Vec<Occurrence>> {
        let reference_path = make_relative_path(self.project_dir, path);
        let file_name = file_name_hint(path);

        let mut occurrences = Vec::new();
        self.tokenizer.scan(text, &mut |m| {
            let reference = if self.disable_references {
                ReferenceContext::disabled(m.entity)
            } else {
                ReferenceContext::new(reference_path.as_str(), m.entity, m.position)
            };
            occurrences.push(Occurrence {
                msgid: m.nugget.msgid.clone(),
                comment: m.nugget.comment.clone(),
                reference,
                file_name: file_name.clone(),
            });
        })?;

        Ok(occurrences)
    }
}

/// Why a file contributed nothing to the catalog.
#[derive(Debug)]
pub enum ExtractError {
    Read(anyhow::Error),
    Tokenize(anyhow::Error),
}

/// Base name of `path` cut at its first dot.
///
/// `page.aspx.vb` and `page.aspx` both group under `page`.
pub fn file_name_hint(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}
