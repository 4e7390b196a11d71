//! JSONL draw history loading.
//!
//! One draw per line, in the serde shape of [`Draw`]. Blank lines are
//! skipped; a malformed or invalid line aborts the load with its line
//! number, since a silently dropped draw would skew every signal.

use anyhow::{Context, Result};
use senamax_models::Draw;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Load and validate a JSONL history file.
pub fn load_draws(path: &Path) -> Result<Vec<Draw>> {
    let file = File::open(path)
        .with_context(|| format!("could not open history file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut draws = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read error at line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let draw: Draw = serde_json::from_str(&line)
            .with_context(|| format!("malformed draw at line {}", idx + 1))?;
        draw.validate()
            .with_context(|| format!("invalid draw {} at line {}", draw.id, idx + 1))?;
        draws.push(draw);
    }

    info!(count = draws.len(), path = %path.display(), "history loaded");
    Ok(draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_history() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":1,"date":"2026-01-03","numbers":[4,18,29,33,47,60]}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            r#"{{"id":2,"date":"2026-01-07","numbers":[1,2,3,4,5,6],"rolled_over":true,"popularity_index":1.4}}"#
        )
        .unwrap();

        let draws = load_draws(file.path()).unwrap();
        assert_eq!(draws.len(), 2);
        assert!(draws[1].rolled_over);
        assert_eq!(draws[1].popularity_index, 1.4);
    }

    #[test]
    fn test_invalid_draw_reports_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":1,"date":"2026-01-03","numbers":[4,18,29,33,47,60]}}"#).unwrap();
        writeln!(file, r#"{{"id":2,"date":"2026-01-07","numbers":[1,1,3,4,5,6]}}"#).unwrap();

        let err = load_draws(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(load_draws(Path::new("/nonexistent/draws.jsonl")).is_err());
    }
}
