// ============================================================
// ADS ROW TYPES
// ============================================================
// Output records written to the import file

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column titles understood by the import tool
pub mod columns {
    pub const CAMPAIGN: &str = "Campaign";
    pub const CAMPAIGN_STATUS: &str = "Campaign Status";
    pub const CAMPAIGN_TYPE: &str = "Campaign Type";
    pub const BUDGET: &str = "Budget";
    pub const BUDGET_TYPE: &str = "Budget type";
    pub const NETWORKS: &str = "Networks";
    pub const LANGUAGES: &str = "Languages";
    pub const LOCATION: &str = "Location";
    pub const BID_STRATEGY_TYPE: &str = "Bid Strategy Type";
    pub const AD_GROUP: &str = "Ad group";
    pub const AD_GROUP_STATUS: &str = "Ad group status";
    pub const DEFAULT_MAX_CPC: &str = "Default max. CPC";
    pub const KEYWORD: &str = "Keyword";
    pub const CRITERION_TYPE: &str = "Criterion Type";
    pub const MAX_CPC: &str = "Max CPC";
    pub const AD_TYPE: &str = "Ad type";
    pub const HEADLINE_1: &str = "Headline 1";
    pub const HEADLINE_2: &str = "Headline 2";
    pub const HEADLINE_3: &str = "Headline 3";
    pub const DESCRIPTION_1: &str = "Description 1";
    pub const DESCRIPTION_2: &str = "Description 2";
    pub const FINAL_URL: &str = "Final URL";
}

/// Kind of entity an output row creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputEntity {
    Campaign,
    AdGroup,
    Keyword,
    Ad,
}

impl std::fmt::Display for OutputEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputEntity::Campaign => write!(f, "Campaign"),
            OutputEntity::AdGroup => write!(f, "Ad group"),
            OutputEntity::Keyword => write!(f, "Keyword"),
            OutputEntity::Ad => write!(f, "Ad"),
        }
    }
}

/// A single output record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdsRow {
    /// Entity created by this row; `None` for flat rows of the basic variant
    pub entity: Option<OutputEntity>,

    values: HashMap<&'static str, String>,
}

impl AdsRow {
    pub fn new(entity: OutputEntity) -> Self {
        Self {
            entity: Some(entity),
            values: HashMap::new(),
        }
    }

    /// Row of the basic single-table layout
    pub fn flat() -> Self {
        Self {
            entity: None,
            values: HashMap::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(column, value.into());
        self
    }

    /// Value for `column`, `""` when the row does not carry it
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Values in the given column order
    pub fn render<'a>(&'a self, columns: &[&str]) -> Vec<&'a str> {
        columns.iter().map(|c| self.get(c)).collect()
    }
}
