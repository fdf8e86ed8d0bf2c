// ============================================================
// SHEET READER
// ============================================================
// Read spreadsheet exports with encoding probing and delimiter sniffing

use std::borrow::Cow;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{UTF_8, WINDOWS_1251};
use tracing::{debug, warn};

use crate::domain::ads::RawRow;
use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Candidate text encoding for source files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 with an optional leading BOM
    Utf8Sig,
    /// Legacy Cyrillic codepage used by older spreadsheet exports
    Windows1251,
    Utf8,
}

impl TextEncoding {
    /// Order in which encodings are tried
    pub const PROBE_ORDER: [TextEncoding; 3] = [
        TextEncoding::Utf8Sig,
        TextEncoding::Windows1251,
        TextEncoding::Utf8,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Windows1251 => "windows-1251",
            TextEncoding::Utf8 => "utf-8",
        }
    }

    /// Strict decode; `None` on any malformed or unmappable byte sequence
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let decoded = match self {
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Windows1251 => {
                WINDOWS_1251.decode_without_bom_handling_and_without_replacement(bytes)
            }
            TextEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
        };
        decoded.map(Cow::into_owned)
    }
}

/// Parsed rows plus the settings that produced them
#[derive(Debug, Clone)]
pub struct DecodedSheet {
    pub rows: Vec<RawRow>,
    pub encoding: TextEncoding,
    pub delimiter: u8,
}

/// Reader for delimited spreadsheet exports
pub struct SheetReader {
    /// Encodings tried in order
    encodings: Vec<TextEncoding>,

    /// Leading characters inspected for delimiter detection
    sample_chars: usize,
}

impl Default for SheetReader {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::PROBE_ORDER.to_vec(),
            sample_chars: 10_000,
        }
    }
}

impl SheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.encodings = encodings;
        self
    }

    pub fn with_sample_chars(mut self, sample_chars: usize) -> Self {
        self.sample_chars = sample_chars;
        self
    }

    /// Read and parse a file, probing encodings in priority order
    pub fn read_file(&self, path: &Path) -> Result<DecodedSheet> {
        if !path.exists() {
            return Err(AppError::MissingFile(path.display().to_string()));
        }

        let bytes = std::fs::read(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to read input file");
            AppError::UnreadableFile(path.display().to_string())
        })?;

        self.read_bytes(&bytes)
            .ok_or_else(|| AppError::UnreadableFile(path.display().to_string()))
    }

    /// First encoding/delimiter combination yielding a non-blank row
    pub fn read_bytes(&self, bytes: &[u8]) -> Option<DecodedSheet> {
        for &encoding in &self.encodings {
            let Some(content) = encoding.decode(bytes) else {
                debug!(encoding = encoding.label(), "decode failed");
                continue;
            };

            if content.trim().is_empty() {
                continue;
            }

            let delimiter = Self::detect_delimiter(self.sample(&content)).unwrap_or(b',');

            match Self::parse_content(&content, delimiter) {
                Ok(rows) if rows.iter().any(|r| !r.is_blank()) => {
                    debug!(
                        encoding = encoding.label(),
                        delimiter = %(delimiter as char),
                        rows = rows.len(),
                        "decoded sheet"
                    );
                    return Some(DecodedSheet {
                        rows,
                        encoding,
                        delimiter,
                    });
                }
                Ok(_) => continue,
                Err(e) => {
                    debug!(encoding = encoding.label(), error = %e, "parse failed");
                    continue;
                }
            }
        }

        None
    }

    fn sample<'a>(&self, content: &'a str) -> &'a str {
        match content.char_indices().nth(self.sample_chars) {
            Some((idx, _)) => &content[..idx],
            None => content,
        }
    }

    /// Parse delimited text into raw rows without header handling
    pub fn parse_content(content: &str, delimiter: u8) -> std::result::Result<Vec<RawRow>, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(RawRow::new(record.iter().map(str::to_string).collect()));
        }

        Ok(rows)
    }

    /// Detect comma vs semicolon from a leading sample.
    /// Returns `None` when neither candidate occurs outside quotes.
    pub fn detect_delimiter(sample: &str) -> Option<u8> {
        let candidates = [b',', b';'];
        let sample_lines: Vec<_> = sample.lines().take(10).collect();

        if sample_lines.is_empty() {
            return None;
        }

        let mut best: Option<u8> = None;
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| count_unquoted(line, delimiter))
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best = Some(delimiter);
            }
        }

        best
    }
}

/// Count delimiter bytes outside double-quoted sections
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;

    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(SheetReader::detect_delimiter("a,b,c\nd,e,f"), Some(b','));
        assert_eq!(SheetReader::detect_delimiter("a;b;c\nd;e;f"), Some(b';'));
        assert_eq!(SheetReader::detect_delimiter("abc\ndef"), None);
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let sample = "Campaign;Headline 1\n\"Sofas, chairs\";\"Buy, now\"\nA;B";
        assert_eq!(SheetReader::detect_delimiter(sample), Some(b';'));
    }

    #[test]
    fn test_detect_delimiter_not_fooled_by_cyrillic() {
        // 'Ь' is U+042C; its low byte equals ','
        let sample = "ЬЬЬ;ЬЬЬ;x\nЬЬ;Ь;y";
        assert_eq!(SheetReader::detect_delimiter(sample), Some(b';'));
    }

    #[test]
    fn test_parse_flexible_rows() {
        let rows = SheetReader::parse_content("a,b,c\nd\n", b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells, vec!["d"]);
        assert_eq!(rows[1].cell(2), "");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Campaign,Keyword\nA,b".as_bytes());

        let sheet = SheetReader::new().read_bytes(&bytes).unwrap();
        assert_eq!(sheet.encoding, TextEncoding::Utf8Sig);
        assert_eq!(sheet.rows[0].cell(0), "Campaign");
    }

    #[test]
    fn test_windows_1251_fallback() {
        let (encoded, _, _) = WINDOWS_1251.encode("Campaign;Фраза (с минус-словами)\nАлматы;диван");
        let sheet = SheetReader::new().read_bytes(&encoded).unwrap();

        assert_eq!(sheet.encoding, TextEncoding::Windows1251);
        assert_eq!(sheet.delimiter, b';');
        assert_eq!(sheet.rows[1].cell(0), "Алматы");
    }

    #[test]
    fn test_restricted_encodings_reject_legacy_bytes() {
        let (encoded, _, _) = WINDOWS_1251.encode("Campaign;Фраза\nАлматы;диван");
        let reader = SheetReader::new()
            .with_encodings(vec![TextEncoding::Utf8])
            .with_sample_chars(64);
        assert!(reader.read_bytes(&encoded).is_none());
    }

    #[test]
    fn test_blank_content_unreadable() {
        assert!(SheetReader::new().read_bytes(b"  \n\n").is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = SheetReader::new()
            .read_file(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingFile(_)));
    }

    #[test]
    fn test_read_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Campaign;Adgoup\nSearch;Sofas\n").unwrap();

        let sheet = SheetReader::new().read_file(file.path()).unwrap();
        assert_eq!(sheet.delimiter, b';');
        assert_eq!(sheet.rows.len(), 2);
    }
}
