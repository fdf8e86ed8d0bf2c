// ============================================================
// IMPORT WRITER
// ============================================================
// Serialize output rows with the variant's header and delimiter

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::domain::ads::{AdsRow, OutputVariant};
use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV writer for import tables
pub struct ImportWriter {
    delimiter: u8,
    write_bom: bool,
}

impl Default for ImportWriter {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_bom: true,
        }
    }
}

impl ImportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_variant(variant: OutputVariant, write_bom: bool) -> Self {
        Self {
            delimiter: variant.delimiter(),
            write_bom,
        }
    }

    /// Write header plus rows to any sink
    pub fn write_to<W: Write>(&self, mut out: W, columns: &[&str], rows: &[AdsRow]) -> Result<()> {
        if self.write_bom {
            out.write_all(UTF8_BOM)?;
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(out);

        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(row.render(columns))?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Write to `path`, creating parent directories as needed.
    /// Rows go to a sibling `.partial` file that replaces `path` only once
    /// complete; on failure it is removed and `path` is left untouched.
    pub fn write_file(&self, path: &Path, columns: &[&str], rows: &[AdsRow]) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let tmp_path = partial_path(path);
        let written = self.write_partial(&tmp_path, columns, rows).and_then(|_| {
            fs::rename(&tmp_path, path).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to move {} into {}: {}",
                    tmp_path.display(),
                    path.display(),
                    e
                ))
            })
        });

        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    fn write_partial(&self, tmp_path: &Path, columns: &[&str], rows: &[AdsRow]) -> Result<()> {
        let file = File::create(tmp_path).map_err(|e| {
            AppError::IoError(format!("Failed to create {}: {}", tmp_path.display(), e))
        })?;

        let mut out = BufWriter::new(file);
        self.write_to(&mut out, columns, rows)?;
        out.get_ref().sync_all()?;
        Ok(())
    }

    /// Render to an in-memory string (BOM included when enabled)
    pub fn render_to_string(&self, columns: &[&str], rows: &[AdsRow]) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, columns, rows)?;
        String::from_utf8(buffer).map_err(|e| AppError::ParseError(e.to_string()))
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ads::{columns, OutputEntity};

    fn sample_rows() -> Vec<AdsRow> {
        vec![AdsRow::new(OutputEntity::Keyword)
            .set(columns::CAMPAIGN, "Search")
            .set(columns::KEYWORD, "sofa, cheap")]
    }

    #[test]
    fn test_render_with_bom_and_quoting() {
        let writer = ImportWriter::new();
        let text = writer
            .render_to_string(&[columns::CAMPAIGN, columns::KEYWORD], &sample_rows())
            .unwrap();

        assert!(text.starts_with('\u{feff}'));
        assert_eq!(
            text.trim_start_matches('\u{feff}'),
            "Campaign,Keyword\nSearch,\"sofa, cheap\"\n"
        );
    }

    #[test]
    fn test_semicolon_variant_without_bom() {
        let writer = ImportWriter::for_variant(OutputVariant::Basic, false);
        let text = writer
            .render_to_string(&[columns::CAMPAIGN, columns::MAX_CPC], &sample_rows())
            .unwrap();

        assert_eq!(text, "Campaign;Max CPC\nSearch;\n");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("ads.csv");

        ImportWriter::new()
            .write_file(&path, &[columns::CAMPAIGN], &sample_rows())
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("Campaign\nSearch\n"));
    }

    #[test]
    fn test_write_file_replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads.csv");
        fs::write(&path, "stale").unwrap();

        ImportWriter::for_variant(OutputVariant::Full, false)
            .write_file(&path, &[columns::CAMPAIGN], &sample_rows())
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Campaign\nSearch\n");
        assert!(!dir.path().join("ads.csv.partial").exists());
    }

    #[test]
    fn test_failed_write_leaves_no_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail
        let path = dir.path().join("ads.csv");
        fs::create_dir(&path).unwrap();

        let err = ImportWriter::new()
            .write_file(&path, &[columns::CAMPAIGN], &sample_rows())
            .unwrap_err();

        assert!(matches!(err, AppError::IoError(_)));
        assert!(path.is_dir());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
