// ============================================================
// FIELD MAPPING
// ============================================================
// Logical source fields and their resolved column positions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::RawRow;

/// Logical field read from the source sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalField {
    Campaign,
    AdGroup,
    Keyword,
    Headline1,
    Headline2,
    Headline3,
    Description1,
    Description2,
    MaxCpc,
    FinalUrl,
}

impl LogicalField {
    pub const ALL: [LogicalField; 10] = [
        LogicalField::Campaign,
        LogicalField::AdGroup,
        LogicalField::Keyword,
        LogicalField::Headline1,
        LogicalField::Headline2,
        LogicalField::Headline3,
        LogicalField::Description1,
        LogicalField::Description2,
        LogicalField::MaxCpc,
        LogicalField::FinalUrl,
    ];

    /// Column title used by the import tool for this field
    pub fn column_name(&self) -> &'static str {
        match self {
            LogicalField::Campaign => "Campaign",
            LogicalField::AdGroup => "Ad group",
            LogicalField::Keyword => "Keyword",
            LogicalField::Headline1 => "Headline 1",
            LogicalField::Headline2 => "Headline 2",
            LogicalField::Headline3 => "Headline 3",
            LogicalField::Description1 => "Description 1",
            LogicalField::Description2 => "Description 2",
            LogicalField::MaxCpc => "Max CPC",
            LogicalField::FinalUrl => "Final URL",
        }
    }
}

impl std::fmt::Display for LogicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Substrings that mark a row as the header row (matched against lowercased text)
pub const HEADER_TRIGGERS: [&str; 3] = ["campaign", "headline 1", "adgoup"];

/// Header aliases in match order. A later alias for the same field overwrites
/// an earlier match.
pub const FIELD_ALIASES: &[(&str, LogicalField)] = &[
    ("campaign", LogicalField::Campaign),
    ("adgoup", LogicalField::AdGroup),
    ("ad group", LogicalField::AdGroup),
    ("фраза (с минус-словами)", LogicalField::Keyword),
    ("keyword", LogicalField::Keyword),
    ("headline 1", LogicalField::Headline1),
    ("headline 2", LogicalField::Headline2),
    ("headline 3", LogicalField::Headline3),
    ("description 1", LogicalField::Description1),
    ("description 2", LogicalField::Description2),
    ("max cpc", LogicalField::MaxCpc),
    ("ссылка", LogicalField::FinalUrl),
    ("final url", LogicalField::FinalUrl),
];

/// Logical field → column index, built once per file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    indices: HashMap<LogicalField, usize>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the column for a field
    pub fn assign(&mut self, field: LogicalField, idx: usize) {
        self.indices.insert(field, idx);
    }

    pub fn with(mut self, field: LogicalField, idx: usize) -> Self {
        self.assign(field, idx);
        self
    }

    pub fn index_of(&self, field: LogicalField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn is_mapped(&self, field: LogicalField) -> bool {
        self.indices.contains_key(&field)
    }

    /// Cell value for `field`; unmapped fields and short rows give `""`
    pub fn value<'a>(&self, row: &'a RawRow, field: LogicalField) -> &'a str {
        match self.index_of(field) {
            Some(idx) => row.cell(idx),
            None => "",
        }
    }

    /// Mapped fields in declaration order
    pub fn mapped_fields(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .iter()
            .copied()
            .filter(|f| self.is_mapped(*f))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
