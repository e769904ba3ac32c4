// ============================================================
// Layer 6 — Output Directory
// ============================================================
// Where the `split` command leaves its artifacts:
//
//   charts/
//     original.png     ← histogram of the full table
//     training.png
//     validation.png
//     test.png
//     summary.json     ← config + partition sizes of the run
//
// Files are overwritten on every run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::{Path, PathBuf}};

pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Create the directory (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write `<name>.png`, with `name` lowercased.
    pub fn save_chart(&self, name: &str, png: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.png", name.to_lowercase()));
        fs::write(&path, png)
            .with_context(|| format!("Cannot write chart '{}'", path.display()))?;
        tracing::debug!("Saved chart: '{}' ({} bytes)", path.display(), png.len());
        Ok(path)
    }

    /// Write `summary.json` (pretty-printed).
    pub fn save_summary<T: Serialize>(&self, summary: &T) -> Result<PathBuf> {
        let path = self.dir.join("summary.json");
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write summary '{}'", path.display()))?;
        Ok(path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_nested_dir_and_writes_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::create(tmp.path().join("a/b")).unwrap();

        let chart = out.save_chart("Training", b"png").unwrap();
        assert_eq!(chart.file_name().unwrap(), "training.png");
        assert_eq!(fs::read(&chart).unwrap(), b"png");

        let summary = out.save_summary(&serde_json::json!({ "rows": 10 })).unwrap();
        let back: serde_json::Value = serde_json::from_str(&fs::read_to_string(summary).unwrap()).unwrap();
        assert_eq!(back["rows"], 10);
    }
}
