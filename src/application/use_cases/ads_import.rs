// ============================================================
// ADS IMPORT USE CASE
// ============================================================
// Orchestrate sheet reading, header resolution, row expansion and writing

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::use_cases::row_expander::RowExpander;
use crate::domain::ads::{ConversionReport, Expansion, ExportConfig, RawRow};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::{HeaderResolver, ImportWriter, SheetReader};

/// Converts one source sheet into one import file
pub struct AdsImportUseCase {
    config: ExportConfig,
    reader: SheetReader,
    resolver: HeaderResolver,
}

impl AdsImportUseCase {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            reader: SheetReader::default(),
            resolver: HeaderResolver::default(),
        }
    }

    /// Convert `input` into `output`. Nothing is written unless the input
    /// decodes and a header row is found.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let start = Instant::now();

        self.config.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid export config: {}", e))
        })?;

        let sheet = self.reader.read_file(input)?;
        info!(
            input = %input.display(),
            encoding = sheet.encoding.label(),
            delimiter = %(sheet.delimiter as char),
            rows = sheet.rows.len(),
            "read source sheet"
        );

        let (header_row, expansion) = self
            .expand_rows(&sheet.rows)
            .map_err(|_| AppError::HeaderNotFound(input.display().to_string()))?;

        if expansion.stats.skipped_without_campaign > 0 {
            warn!(
                skipped = expansion.stats.skipped_without_campaign,
                "rows without a campaign name were skipped"
            );
        }

        let writer = ImportWriter::for_variant(self.config.variant, self.config.write_bom);
        writer.write_file(output, self.config.variant.columns(), &expansion.rows)?;

        let report = ConversionReport {
            input: input.display().to_string(),
            output: output.display().to_string(),
            variant: self.config.variant,
            encoding: sheet.encoding.label().to_string(),
            delimiter: sheet.delimiter as char,
            header_row,
            stats: expansion.stats,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            output = %output.display(),
            variant = %report.variant,
            emitted = report.stats.emitted(),
            "wrote import file"
        );

        Ok(report)
    }

    /// Resolve the header and expand every row after it.
    /// Returns the header index and the expansion.
    pub fn expand_rows(&self, rows: &[RawRow]) -> Result<(usize, Expansion)> {
        let header = self
            .resolver
            .resolve(rows)
            .ok_or_else(|| AppError::HeaderNotFound("input rows".to_string()))?;
        debug!(
            header_row = header.row_index,
            fields = ?header.mapping.mapped_fields(),
            "resolved header"
        );

        let mut expander = RowExpander::new(&self.config, &header.mapping);
        expander.extend(&rows[header.row_index + 1..]);

        Ok((header.row_index, expander.finish()))
    }

    /// Expand in-memory delimited text and render the import table
    pub fn convert_content(&self, content: &str) -> Result<String> {
        let delimiter = SheetReader::detect_delimiter(content).unwrap_or(b',');
        let rows = SheetReader::parse_content(content, delimiter)?;
        let (_, expansion) = self.expand_rows(&rows)?;

        ImportWriter::for_variant(self.config.variant, self.config.write_bom)
            .render_to_string(self.config.variant.columns(), &expansion.rows)
    }
}

impl Default for AdsImportUseCase {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}
