pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::run;
pub use application::AdsImportUseCase;
pub use domain::ads::{ConversionReport, ExportConfig, OutputVariant, Substitution};
pub use domain::error::{AppError, Result};
