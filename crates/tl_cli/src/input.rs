use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Reads an uploaded document; only plain text and markdown are accepted.
pub fn read_file(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "Unsupported file type for {}: expected .txt or .md",
            path.display()
        );
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Text argument first, then file, then stdin.
pub fn resolve_text(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_file(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("Please enter some text first.");
    }
    Ok(text)
}
