// ============================================================
// EXPORT CONFIGURATION
// ============================================================
// Per-market settings for generating an import file

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::normalize::normalize_max_cpc;
use super::OutputVariant;

/// Tracking template appended to final URLs without a query string
pub const DEFAULT_UTM_TEMPLATE: &str = "?utm_source=google&utm_medium=cpc&utm_campaign={campaignid}&utm_content={adgroupid}&utm_term={keyword}";

/// Literal text replacement, applied in list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl FromStr for Substitution {
    type Err = String;

    /// Parse `FROM=TO`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((from, to)) if !from.is_empty() => Ok(Substitution::new(from, to)),
            _ => Err(format!("invalid substitution '{}', expected FROM=TO", s)),
        }
    }
}

/// Apply substitutions one pair at a time; text produced by an earlier pair
/// is visible to later ones.
pub fn apply_substitutions(text: &str, substitutions: &[Substitution]) -> String {
    substitutions
        .iter()
        .fold(text.to_string(), |acc, sub| acc.replace(&sub.from, &sub.to))
}

/// Accept `10`, `0.4` or `"0,40"` for amount fields; kept as text for output
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(text) => text,
        Amount::Integer(n) => n.to_string(),
        Amount::Float(n) => n.to_string(),
    })
}

/// Values written on campaign setup rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignSettings {
    pub status: String,
    pub campaign_type: String,
    #[serde(deserialize_with = "amount_text")]
    pub budget: String,
    pub budget_type: String,
    pub networks: String,
    pub languages: String,

    /// Geo targeting; empty leaves targeting to the account default
    pub location: String,

    pub bid_strategy: String,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            status: "Enabled".to_string(),
            campaign_type: "Search".to_string(),
            budget: "10".to_string(),
            budget_type: "Daily".to_string(),
            networks: "Google search".to_string(),
            languages: "ru".to_string(),
            location: String::new(),
            bid_strategy: "Manual CPC".to_string(),
        }
    }
}

/// Configuration for one generated import file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Landing page used when a row has no usable final URL
    pub base_url: String,

    /// Ordered market localization replacements
    pub substitutions: Vec<Substitution>,

    pub variant: OutputVariant,

    /// Appended to final URLs that have no `?`
    pub utm_template: String,

    pub campaign: CampaignSettings,

    pub ad_group_status: String,

    /// Ad group bid when the introducing row has no Max CPC
    #[serde(deserialize_with = "amount_text")]
    pub default_max_cpc: String,

    pub keyword_match_type: String,

    pub ad_type: String,

    /// Prefix the output with a UTF-8 BOM so spreadsheet apps detect the encoding
    pub write_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://koktem.kz/".to_string(),
            substitutions: Vec::new(),
            variant: OutputVariant::default(),
            utm_template: DEFAULT_UTM_TEMPLATE.to_string(),
            campaign: CampaignSettings::default(),
            ad_group_status: "Enabled".to_string(),
            default_max_cpc: "0.5".to_string(),
            keyword_match_type: "Broad".to_string(),
            ad_type: "Responsive search ad".to_string(),
            write_bom: true,
        }
    }
}

impl ExportConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_variant(mut self, variant: OutputVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_substitution(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.substitutions.push(Substitution::new(from, to));
        self
    }

    pub fn substitute(&self, text: &str) -> String {
        apply_substitutions(text, &self.substitutions)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if !self.utm_template.is_empty() && !self.utm_template.starts_with('?') {
            return Err("utm_template must start with '?'".to_string());
        }
        if let Some(pos) = self.substitutions.iter().position(|s| s.from.is_empty()) {
            return Err(format!("substitution #{} has an empty 'from' pattern", pos + 1));
        }
        if normalize_max_cpc(&self.default_max_cpc).parse::<f64>().is_err() {
            return Err(format!(
                "default_max_cpc '{}' is not a number",
                self.default_max_cpc
            ));
        }
        Ok(())
    }
}
