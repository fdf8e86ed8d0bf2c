// ============================================================
// ROW EXPANDER
// ============================================================
// Turn source rows into deduplicated campaign / ad group / keyword / ad rows

use std::collections::HashSet;

use crate::domain::ads::{
    columns, normalize_final_url, normalize_keyword, normalize_max_cpc, AdsRow, Expansion,
    ExportConfig, FieldMapping, LogicalField, OutputEntity, OutputVariant, RawRow,
};

/// Field values of one source row after substitution and normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    pub campaign: String,
    pub ad_group: String,
    pub keyword: String,
    pub headlines: [String; 3],
    pub descriptions: [String; 2],
    pub max_cpc: String,
    pub final_url: String,
}

/// Stateful expander scoped to one output file
pub struct RowExpander<'a> {
    config: &'a ExportConfig,
    mapping: &'a FieldMapping,
    seen_campaigns: HashSet<String>,
    seen_ad_groups: HashSet<(String, String)>,
    seen_ads: HashSet<(String, String)>,
    expansion: Expansion,
}

impl<'a> RowExpander<'a> {
    pub fn new(config: &'a ExportConfig, mapping: &'a FieldMapping) -> Self {
        Self {
            config,
            mapping,
            seen_campaigns: HashSet::new(),
            seen_ad_groups: HashSet::new(),
            seen_ads: HashSet::new(),
            expansion: Expansion::default(),
        }
    }

    /// Extract, substitute and normalize every mapped field of a row
    pub fn extract(&self, row: &RawRow) -> SourceRecord {
        let field = |f: LogicalField| self.config.substitute(self.mapping.value(row, f).trim());

        SourceRecord {
            campaign: field(LogicalField::Campaign),
            ad_group: field(LogicalField::AdGroup),
            keyword: normalize_keyword(&field(LogicalField::Keyword)),
            headlines: [
                field(LogicalField::Headline1),
                field(LogicalField::Headline2),
                field(LogicalField::Headline3),
            ],
            descriptions: [
                field(LogicalField::Description1),
                field(LogicalField::Description2),
            ],
            max_cpc: normalize_max_cpc(&field(LogicalField::MaxCpc)),
            final_url: normalize_final_url(
                &field(LogicalField::FinalUrl),
                &self.config.base_url,
                &self.config.utm_template,
            ),
        }
    }

    /// Expand one data row into zero or more output rows
    pub fn push_row(&mut self, row: &RawRow) {
        self.expansion.stats.source_rows += 1;

        if row.is_blank() {
            self.expansion.stats.skipped_blank += 1;
            return;
        }

        let record = self.extract(row);
        let variant = self.config.variant;

        if variant.requires_campaign() && record.campaign.is_empty() {
            self.expansion.stats.skipped_without_campaign += 1;
            return;
        }

        if variant == OutputVariant::Basic {
            let flat = self.flat_row(&record);
            self.emit(flat);
            return;
        }

        if variant.emits(OutputEntity::Campaign) && self.seen_campaigns.insert(record.campaign.clone()) {
            let campaign = self.campaign_row(&record);
            self.emit(campaign);
        }

        let group_key = (record.campaign.clone(), record.ad_group.clone());

        if variant.emits(OutputEntity::AdGroup) && self.seen_ad_groups.insert(group_key.clone()) {
            let ad_group = self.ad_group_row(&record);
            self.emit(ad_group);
        }

        if variant.emits(OutputEntity::Keyword) && !record.keyword.is_empty() {
            let keyword = self.keyword_row(&record);
            self.emit(keyword);
        }

        // The first row of an ad group owns its ad, with or without copy
        if variant.emits(OutputEntity::Ad) && self.seen_ads.insert(group_key) {
            let ad = self.ad_row(&record);
            self.emit(ad);
        }
    }

    pub fn extend<'r, I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = &'r RawRow>,
    {
        for row in rows {
            self.push_row(row);
        }
    }

    pub fn finish(self) -> Expansion {
        self.expansion
    }

    fn emit(&mut self, row: AdsRow) {
        self.expansion.stats.record(&row);
        self.expansion.rows.push(row);
    }

    fn flat_row(&self, record: &SourceRecord) -> AdsRow {
        AdsRow::flat()
            .set(columns::CAMPAIGN, record.campaign.as_str())
            .set(columns::AD_GROUP, record.ad_group.as_str())
            .set(columns::KEYWORD, record.keyword.as_str())
            .set(columns::HEADLINE_1, record.headlines[0].as_str())
            .set(columns::HEADLINE_2, record.headlines[1].as_str())
            .set(columns::HEADLINE_3, record.headlines[2].as_str())
            .set(columns::DESCRIPTION_1, record.descriptions[0].as_str())
            .set(columns::DESCRIPTION_2, record.descriptions[1].as_str())
            .set(columns::MAX_CPC, record.max_cpc.as_str())
            .set(columns::FINAL_URL, record.final_url.as_str())
    }

    fn campaign_row(&self, record: &SourceRecord) -> AdsRow {
        let settings = &self.config.campaign;
        AdsRow::new(OutputEntity::Campaign)
            .set(columns::CAMPAIGN, record.campaign.as_str())
            .set(columns::CAMPAIGN_STATUS, settings.status.as_str())
            .set(columns::CAMPAIGN_TYPE, settings.campaign_type.as_str())
            .set(columns::BUDGET, settings.budget.as_str())
            .set(columns::BUDGET_TYPE, settings.budget_type.as_str())
            .set(columns::NETWORKS, settings.networks.as_str())
            .set(columns::LANGUAGES, settings.languages.as_str())
            .set(columns::LOCATION, settings.location.as_str())
            .set(columns::BID_STRATEGY_TYPE, settings.bid_strategy.as_str())
    }

    fn ad_group_row(&self, record: &SourceRecord) -> AdsRow {
        let bid = if record.max_cpc.is_empty() {
            normalize_max_cpc(&self.config.default_max_cpc)
        } else {
            record.max_cpc.clone()
        };

        AdsRow::new(OutputEntity::AdGroup)
            .set(columns::CAMPAIGN, record.campaign.as_str())
            .set(columns::AD_GROUP, record.ad_group.as_str())
            .set(columns::AD_GROUP_STATUS, self.config.ad_group_status.as_str())
            .set(columns::DEFAULT_MAX_CPC, bid)
    }

    fn keyword_row(&self, record: &SourceRecord) -> AdsRow {
        AdsRow::new(OutputEntity::Keyword)
            .set(columns::CAMPAIGN, record.campaign.as_str())
            .set(columns::AD_GROUP, record.ad_group.as_str())
            .set(columns::KEYWORD, record.keyword.as_str())
            .set(columns::CRITERION_TYPE, self.config.keyword_match_type.as_str())
            .set(columns::MAX_CPC, record.max_cpc.as_str())
    }

    fn ad_row(&self, record: &SourceRecord) -> AdsRow {
        AdsRow::new(OutputEntity::Ad)
            .set(columns::CAMPAIGN, record.campaign.as_str())
            .set(columns::AD_GROUP, record.ad_group.as_str())
            .set(columns::AD_TYPE, self.config.ad_type.as_str())
            .set(columns::HEADLINE_1, record.headlines[0].as_str())
            .set(columns::HEADLINE_2, record.headlines[1].as_str())
            .set(columns::HEADLINE_3, record.headlines[2].as_str())
            .set(columns::DESCRIPTION_1, record.descriptions[0].as_str())
            .set(columns::DESCRIPTION_2, record.descriptions[1].as_str())
            .set(columns::FINAL_URL, record.final_url.as_str())
    }
}
