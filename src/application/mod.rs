pub mod use_cases;

pub use use_cases::ads_import::AdsImportUseCase;
pub use use_cases::row_expander::{RowExpander, SourceRecord};
