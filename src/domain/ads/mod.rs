// ============================================================
// ADS DOMAIN LAYER
// ============================================================
// Core types and value objects for ad import generation
// No I/O, no async

mod ads_row;
mod export_config;
mod field_mapping;
mod normalize;
mod output_variant;
mod raw_row;
mod report;

pub use ads_row::{columns, AdsRow, OutputEntity};
pub use export_config::{
    apply_substitutions, CampaignSettings, ExportConfig, Substitution, DEFAULT_UTM_TEMPLATE,
};
pub use field_mapping::{FieldMapping, LogicalField, FIELD_ALIASES, HEADER_TRIGGERS};
pub use normalize::{normalize_final_url, normalize_keyword, normalize_max_cpc};
pub use output_variant::OutputVariant;
pub use raw_row::RawRow;
pub use report::{ConversionReport, Expansion, ExpansionStats};
