pub mod ads_import;
pub mod row_expander;
