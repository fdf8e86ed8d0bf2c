// ============================================================
// OUTPUT VARIANT ENUM
// ============================================================
// Determines which entity rows are emitted and the column schema

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ads_row::{columns, OutputEntity};

const BASIC_COLUMNS: &[&str] = &[
    columns::CAMPAIGN,
    columns::AD_GROUP,
    columns::KEYWORD,
    columns::HEADLINE_1,
    columns::HEADLINE_2,
    columns::HEADLINE_3,
    columns::DESCRIPTION_1,
    columns::DESCRIPTION_2,
    columns::MAX_CPC,
    columns::FINAL_URL,
];

const SPLIT_COLUMNS: &[&str] = &[
    columns::CAMPAIGN,
    columns::AD_GROUP,
    columns::KEYWORD,
    columns::CRITERION_TYPE,
    columns::MAX_CPC,
    columns::AD_TYPE,
    columns::HEADLINE_1,
    columns::HEADLINE_2,
    columns::HEADLINE_3,
    columns::DESCRIPTION_1,
    columns::DESCRIPTION_2,
    columns::FINAL_URL,
];

const FULL_COLUMNS: &[&str] = &[
    columns::CAMPAIGN,
    columns::CAMPAIGN_STATUS,
    columns::CAMPAIGN_TYPE,
    columns::BUDGET,
    columns::BUDGET_TYPE,
    columns::NETWORKS,
    columns::LANGUAGES,
    columns::LOCATION,
    columns::BID_STRATEGY_TYPE,
    columns::AD_GROUP,
    columns::AD_GROUP_STATUS,
    columns::DEFAULT_MAX_CPC,
    columns::KEYWORD,
    columns::CRITERION_TYPE,
    columns::MAX_CPC,
    columns::AD_TYPE,
    columns::HEADLINE_1,
    columns::HEADLINE_2,
    columns::HEADLINE_3,
    columns::DESCRIPTION_1,
    columns::DESCRIPTION_2,
    columns::FINAL_URL,
];

/// Shape of the generated import file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputVariant {
    /// One flat row per source row, no dedup, semicolon-delimited
    Basic,

    /// Keyword rows plus one Ad row per ad group
    Split,

    /// Campaign and ad-group setup rows, then keyword and ad rows
    #[default]
    Full,
}

impl OutputVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputVariant::Basic => "basic",
            OutputVariant::Split => "split",
            OutputVariant::Full => "full",
        }
    }

    pub fn delimiter(&self) -> u8 {
        match self {
            OutputVariant::Basic => b';',
            OutputVariant::Split | OutputVariant::Full => b',',
        }
    }

    /// Fixed column header, in output order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            OutputVariant::Basic => BASIC_COLUMNS,
            OutputVariant::Split => SPLIT_COLUMNS,
            OutputVariant::Full => FULL_COLUMNS,
        }
    }

    /// Whether rows without a campaign name are dropped
    pub fn requires_campaign(&self) -> bool {
        !matches!(self, OutputVariant::Basic)
    }

    pub fn emits(&self, entity: OutputEntity) -> bool {
        match self {
            OutputVariant::Basic => false,
            OutputVariant::Split => matches!(entity, OutputEntity::Keyword | OutputEntity::Ad),
            OutputVariant::Full => true,
        }
    }
}

impl FromStr for OutputVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(OutputVariant::Basic),
            "split" => Ok(OutputVariant::Split),
            "full" => Ok(OutputVariant::Full),
            other => Err(format!(
                "unknown output variant '{}' (expected basic, split or full)",
                other
            )),
        }
    }
}

impl std::fmt::Display for OutputVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        assert_eq!("Full".parse::<OutputVariant>().unwrap(), OutputVariant::Full);
        assert_eq!(" basic ".parse::<OutputVariant>().unwrap(), OutputVariant::Basic);
        assert!("excel".parse::<OutputVariant>().is_err());
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(OutputVariant::Basic.delimiter(), b';');
        assert_eq!(OutputVariant::Full.delimiter(), b',');
    }

    #[test]
    fn test_split_emits_only_keywords_and_ads() {
        assert!(OutputVariant::Split.emits(OutputEntity::Keyword));
        assert!(OutputVariant::Split.emits(OutputEntity::Ad));
        assert!(!OutputVariant::Split.emits(OutputEntity::Campaign));
        assert!(!OutputVariant::Split.emits(OutputEntity::AdGroup));
    }

    #[test]
    fn test_full_schema_contains_setup_columns() {
        let cols = OutputVariant::Full.columns();
        assert_eq!(cols[0], "Campaign");
        assert!(cols.contains(&"Budget"));
        assert!(cols.contains(&"Default max. CPC"));
        assert_eq!(cols.last(), Some(&"Final URL"));
    }
}
