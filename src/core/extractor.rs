// src/core/extractor.rs — Pull a hex color and imagery line out of model output

use regex::Regex;
use std::sync::OnceLock;

use super::types::ColorResult;
use crate::infra::errors::TinctureError;

const IMAGERY_LABEL: &str = "Imagery: ";

fn hex_pattern() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"#[0-9a-fA-F]{6}").expect("hex pattern is valid"))
}

/// Parse a completion into a [`ColorResult`].
///
/// The color is the first `#RRGGBB` token found anywhere in the output, not
/// necessarily on the last line the prompt asks for. Imagery is the first line
/// with its label stripped.
pub fn extract_color(output: &str) -> Result<ColorResult, TinctureError> {
    if output.trim().is_empty() {
        return Err(TinctureError::EmptyOutput);
    }

    let color = find_hex_color(output).ok_or_else(|| TinctureError::MissingColor {
        output: output.to_string(),
    })?;

    Ok(ColorResult {
        color: color.to_string(),
        imagery: extract_imagery(output),
        raw_output: output.to_string(),
    })
}

/// First `#` followed by six hex digits, case preserved.
pub fn find_hex_color(text: &str) -> Option<&str> {
    hex_pattern().find(text).map(|m| m.as_str())
}

fn extract_imagery(output: &str) -> Option<String> {
    let first_line = output.lines().next()?;
    let imagery = first_line.replacen(IMAGERY_LABEL, "", 1);
    let imagery = imagery.trim();
    (!imagery.is_empty()).then(|| imagery.to_string())
}
