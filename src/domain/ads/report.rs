use serde::{Deserialize, Serialize};

use super::{AdsRow, OutputEntity, OutputVariant};

/// Counters collected while expanding source rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStats {
    /// Data rows after the header (blank ones included)
    pub source_rows: usize,
    pub skipped_blank: usize,
    pub skipped_without_campaign: usize,
    pub campaigns: usize,
    pub ad_groups: usize,
    pub keywords: usize,
    pub ads: usize,
    /// Flat rows of the basic variant
    pub flat_rows: usize,
}

impl ExpansionStats {
    pub fn record(&mut self, row: &AdsRow) {
        match row.entity {
            Some(OutputEntity::Campaign) => self.campaigns += 1,
            Some(OutputEntity::AdGroup) => self.ad_groups += 1,
            Some(OutputEntity::Keyword) => self.keywords += 1,
            Some(OutputEntity::Ad) => self.ads += 1,
            None => self.flat_rows += 1,
        }
    }

    pub fn emitted(&self) -> usize {
        self.campaigns + self.ad_groups + self.keywords + self.ads + self.flat_rows
    }
}

/// Rows produced for one output file
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub rows: Vec<AdsRow>,
    pub stats: ExpansionStats,
}

/// Result of converting one input file for one market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub input: String,
    pub output: String,
    pub variant: OutputVariant,

    /// Label of the encoding that decoded the input
    pub encoding: String,

    pub delimiter: char,

    /// 0-based index of the header row among parsed rows
    pub header_row: usize,

    pub stats: ExpansionStats,

    pub processing_time_ms: u64,
}

impl ConversionReport {
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} ({} rows: {} campaigns, {} ad groups, {} keywords, {} ads, {} flat)",
            self.input,
            self.output,
            self.stats.emitted(),
            self.stats.campaigns,
            self.stats.ad_groups,
            self.stats.keywords,
            self.stats.ads,
            self.stats.flat_rows
        )
    }
}
