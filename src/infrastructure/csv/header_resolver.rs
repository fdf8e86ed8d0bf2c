// ============================================================
// HEADER RESOLVER
// ============================================================
// Locate the header row and map logical fields to columns

use crate::domain::ads::{FieldMapping, LogicalField, RawRow, FIELD_ALIASES, HEADER_TRIGGERS};

/// Header row position and the mapping derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    /// Index of the header among parsed rows
    pub row_index: usize,
    pub mapping: FieldMapping,
}

/// Keyword-containment header detection
pub struct HeaderResolver {
    triggers: Vec<String>,
    aliases: Vec<(String, LogicalField)>,
}

impl Default for HeaderResolver {
    fn default() -> Self {
        Self {
            triggers: HEADER_TRIGGERS.iter().map(|t| t.to_string()).collect(),
            aliases: FIELD_ALIASES
                .iter()
                .map(|(alias, field)| (alias.to_string(), *field))
                .collect(),
        }
    }
}

impl HeaderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extra alias; it is matched after the built-in ones
    pub fn with_alias(mut self, alias: &str, field: LogicalField) -> Self {
        self.aliases.push((alias.to_lowercase(), field));
        self
    }

    /// First row whose joined lowercase text contains a trigger
    pub fn find_header_row(&self, rows: &[RawRow]) -> Option<usize> {
        rows.iter().position(|row| {
            let text = row.joined_lowercase();
            self.triggers.iter().any(|t| text.contains(t.as_str()))
        })
    }

    /// Map fields from header cells in alias order; for each alias the
    /// left-most containing cell wins.
    pub fn build_mapping(&self, header: &RawRow) -> FieldMapping {
        let cells: Vec<String> = header.cells.iter().map(|c| c.to_lowercase()).collect();
        let mut mapping = FieldMapping::new();

        for (alias, field) in &self.aliases {
            if let Some(idx) = cells.iter().position(|c| c.contains(alias.as_str())) {
                mapping.assign(*field, idx);
            }
        }

        mapping
    }

    pub fn resolve(&self, rows: &[RawRow]) -> Option<ResolvedHeader> {
        let row_index = self.find_header_row(rows)?;
        let mapping = self.build_mapping(&rows[row_index]);
        Some(ResolvedHeader { row_index, mapping })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&[&str]]) -> Vec<RawRow> {
        lines.iter().map(|l| RawRow::from(l.to_vec())).collect()
    }

    #[test]
    fn test_header_found_after_preamble() {
        let sheet = rows(&[
            &["Шаблон Города АП", ""],
            &["", ""],
            &["Campaign", "Adgoup", "Фраза (с минус-словами)", "Headline 1", "Ссылка"],
            &["Search", "Sofas", "buy sofa", "Sofas here", ""],
        ]);

        let header = HeaderResolver::new().resolve(&sheet).unwrap();
        assert_eq!(header.row_index, 2);
        assert_eq!(header.mapping.index_of(LogicalField::Campaign), Some(0));
        assert_eq!(header.mapping.index_of(LogicalField::AdGroup), Some(1));
        assert_eq!(header.mapping.index_of(LogicalField::Keyword), Some(2));
        assert_eq!(header.mapping.index_of(LogicalField::Headline1), Some(3));
        assert_eq!(header.mapping.index_of(LogicalField::FinalUrl), Some(4));
        assert_eq!(header.mapping.index_of(LogicalField::MaxCpc), None);
    }

    #[test]
    fn test_first_matching_cell_wins() {
        let header = RawRow::from(vec!["Campaign", "Campaign Status", "Max CPC", "MAX CPC (old)"]);
        let mapping = HeaderResolver::new().build_mapping(&header);
        assert_eq!(mapping.index_of(LogicalField::Campaign), Some(0));
        assert_eq!(mapping.index_of(LogicalField::MaxCpc), Some(2));
    }

    #[test]
    fn test_later_alias_overwrites() {
        // "adgoup" matches column 1, then "ad group" matches column 2
        let header = RawRow::from(vec!["Campaign", "Adgoup", "Ad group name"]);
        let mapping = HeaderResolver::new().build_mapping(&header);
        assert_eq!(mapping.index_of(LogicalField::AdGroup), Some(2));
    }

    #[test]
    fn test_case_insensitive() {
        let header = RawRow::from(vec!["CAMPAIGN", "HEADLINE 2", "ССЫЛКА"]);
        let mapping = HeaderResolver::new().build_mapping(&header);
        assert_eq!(mapping.index_of(LogicalField::Campaign), Some(0));
        assert_eq!(mapping.index_of(LogicalField::Headline2), Some(1));
        assert_eq!(mapping.index_of(LogicalField::FinalUrl), Some(2));
    }

    #[test]
    fn test_custom_alias() {
        let header = RawRow::from(vec!["Campaign", "Landing"]);
        let mapping = HeaderResolver::new()
            .with_alias("Landing", LogicalField::FinalUrl)
            .build_mapping(&header);
        assert_eq!(mapping.index_of(LogicalField::FinalUrl), Some(1));
    }

    #[test]
    fn test_no_header() {
        let sheet = rows(&[&["name", "price"], &["sofa", "100"]]);
        assert!(HeaderResolver::new().resolve(&sheet).is_none());
    }
}
