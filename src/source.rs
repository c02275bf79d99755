//! Shader source loading.
//!
//! Shader text is read from disk once at startup. There is no caching and no
//! reload path.

use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::abs::ShaderKind;

/// Failure to read a shader source file.
#[derive(Debug, Error)]
#[error("failed to read {kind} shader source from {}", .path.display())]
pub struct SourceError {
    kind: ShaderKind,
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// GLSL text for a single pipeline stage.
#[derive(Debug)]
pub struct ShaderSource {
    pub kind: ShaderKind,
    pub text: String,
}

impl ShaderSource {
    /// Reads the file at `path` and normalizes its line endings.
    pub fn load(kind: ShaderKind, path: &Path) -> Result<Self, SourceError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SourceError {
            kind,
            path: path.to_path_buf(),
            source,
        })?;
        let text = normalize_newlines(&raw);
        debug!("loaded {kind} shader from {}:\n{text}", path.display());
        Ok(Self { kind, text })
    }
}

/// Rejoins the lines of `raw` with single `\n` separators.
fn normalize_newlines(raw: &str) -> String {
    raw.lines().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_lines_rejoin_with_single_newlines() {
        let raw = "#version 330 core\r\nvoid main()\r\n{\r\n}\r\n";
        assert_eq!(normalize_newlines(raw), "#version 330 core\nvoid main()\n{\n}");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(normalize_newlines("a\nb\nc"), "a\nb\nc");
    }

    #[test]
    fn missing_file_reports_path_and_stage() {
        let err = ShaderSource::load(
            ShaderKind::Fragment,
            Path::new("no/such/directory/fragment.glsl"),
        )
        .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("no/such/directory/fragment.glsl"));
    }
}
