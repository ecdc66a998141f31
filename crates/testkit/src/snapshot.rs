//! Golden JSON files for scan results.
//!
//! Values are serialized as canonical pretty JSON with object keys sorted, so field order in the
//! serialized types never shows up as a diff. Tests compare against the file on disk; rerun with
//! `DF_UPDATE_SNAPSHOTS=1` to rewrite it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "DF_UPDATE_SNAPSHOTS";

/// Path of snapshot `name` under `<manifest_dir>/tests/snapshots`.
pub fn snapshot_path(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("snapshots").join(name)
}

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// With `DF_UPDATE_SNAPSHOTS=1` the file is written instead.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if update_requested(std::env::var(UPDATE_SNAPSHOTS_ENV).ok().as_deref()) {
        write_snapshot(path, &actual)?;
        tracing::info!(path = %path.display(), "snapshot updated");
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if let Some((line, want, got)) = first_difference(&expected, &actual) {
        anyhow::bail!(
            "Snapshot mismatch at {}:{line}\n  expected: {want}\n    actual: {got}\n(run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }

    Ok(())
}

/// Serialize `value` the way snapshots are stored on disk.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut s = serde_json::to_string_pretty(&canonicalize_value(value))
        .context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn update_requested(flag: Option<&str>) -> bool {
    matches!(flag, Some("1" | "true" | "TRUE" | "yes" | "YES"))
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

/// First differing line (1-based) between two snapshot texts.
fn first_difference(expected: &str, actual: &str) -> Option<(usize, String, String)> {
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (want.next(), got.next()) {
            (None, None) => {
                return (expected.len() != actual.len()).then(|| {
                    (line, "<end of file>".to_owned(), "<end of file>".to_owned())
                })
            }
            (w, g) if w != g => {
                let show = |l: Option<&str>| l.unwrap_or("<end of file>").trim().to_owned();
                return Some((line, show(w), show(g)));
            }
            _ => line += 1,
        }
    }
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize_value(v)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}
