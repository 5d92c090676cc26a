//! Parser for split files.
//!
//! Interaction files hold one record per line:
//! `userId::itemId[::score[::timestamp]]`
//!
//! An empty score field (`u1::i1::::978300760`) means "no explicit score".
//! Item list files hold one item id per line.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Read a file and split it into lines, mapping a missing file to
/// [`DataLoadError::FileNotFound`]
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse an interaction file
pub fn parse_interactions(path: &Path) -> Result<Vec<Interaction>> {
    let lines = read_lines(path)?;
    let file = file_label(path);
    let mut interactions = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }
        interactions.push(parse_interaction_line(line_trimmed, &file, idx + 1)?);
    }

    Ok(interactions)
}

/// Parse a single `userId::itemId[::score[::timestamp]]` line
pub fn parse_interaction_line(line: &str, file: &str, line_no: usize) -> Result<Interaction> {
    let parse_error = |reason: String| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason,
    };

    let mut parts = line.split("::");

    let user_id = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error("Missing userId".to_string()))?;

    let item_id = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error("Missing itemId".to_string()))?;

    let score = match parts.next() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<f32>()
                .map_err(|e| parse_error(format!("Invalid score: {}", e)))?,
        ),
    };

    let timestamp = match parts.next() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|e| parse_error(format!("Invalid timestamp: {}", e)))?,
        ),
    };

    if parts.next().is_some() {
        return Err(parse_error("Too many fields".to_string()));
    }

    Ok(Interaction {
        user_id: user_id.to_string(),
        item_id: item_id.to_string(),
        score,
        timestamp,
    })
}

/// Parse a file listing one item id per line (blank lines ignored)
pub fn parse_item_list(path: &Path) -> Result<Vec<ItemId>> {
    let lines = read_lines(path)?;
    Ok(lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect())
}
