use std::fs;

use adsheet_lib::{AdsImportUseCase, AppError, ExportConfig, OutputVariant};
use encoding_rs::WINDOWS_1251;

const UTM: &str = "?utm_source=google&utm_medium=cpc&utm_campaign={campaignid}&utm_content={adgroupid}&utm_term={keyword}";

const SHEET: &str = "\
Campaign;Adgoup;Фраза (с минус-словами);Headline 1;Headline 2;Description 1;MAX CPC;Ссылка
Алматы Поиск;Диваны;\"диван Алматы\";Диваны в Алматы;Доставка;Большой выбор;1,50;nan
Алматы Поиск;Диваны;купить диван;Другой текст;;;;
Алматы Поиск;Кресла;кресло;Кресла;;;;shop.kz/chairs
";

fn read_output(path: &std::path::Path) -> Vec<Vec<String>> {
    let text = fs::read_to_string(path).unwrap();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn windows_1251_sheet_converts_for_two_markets() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.csv");
    let (encoded, _, _) = WINDOWS_1251.encode(SHEET);
    fs::write(&input, &encoded).unwrap();

    let almaty_out = dir.path().join("google_ads_almaty.csv");
    let almaty = AdsImportUseCase::new(
        ExportConfig::default().with_base_url("https://kz.example.com/"),
    )
    .convert_file(&input, &almaty_out)
    .unwrap();
    assert_eq!(almaty.encoding, "windows-1251");
    assert_eq!(almaty.delimiter, ';');

    let tashkent_out = dir.path().join("google_ads_tashkent.csv");
    let tashkent = AdsImportUseCase::new(
        ExportConfig::default()
            .with_base_url("https://uz.example.com/")
            .with_substitution("Алматы", "Ташкент"),
    )
    .convert_file(&input, &tashkent_out)
    .unwrap();
    assert_eq!(tashkent.stats.campaigns, 1);
    assert_eq!(tashkent.stats.ad_groups, 2);
    assert_eq!(tashkent.stats.keywords, 3);
    assert_eq!(tashkent.stats.ads, 2);

    let rows = read_output(&tashkent_out);
    let header = &rows[0];
    let col = |name: &str| header.iter().position(|h| h == name).unwrap();

    for row in &rows[1..] {
        assert_eq!(row[col("Campaign")], "Ташкент Поиск");
    }

    let ads: Vec<&Vec<String>> = rows[1..]
        .iter()
        .filter(|r| r[col("Ad type")] == "Responsive search ad")
        .collect();
    assert_eq!(ads.len(), 2);
    assert_eq!(ads[0][col("Headline 1")], "Диваны в Ташкент");
    assert_eq!(
        ads[0][col("Final URL")],
        format!("https://uz.example.com/{}", UTM)
    );
    assert_eq!(
        ads[1][col("Final URL")],
        format!("https://shop.kz/chairs{}", UTM)
    );

    let keyword = rows[1..]
        .iter()
        .find(|r| r[col("Keyword")] == "диван Ташкент")
        .unwrap();
    assert_eq!(keyword[col("Max CPC")], "1.50");

    let almaty_rows = read_output(&almaty_out);
    assert_eq!(almaty_rows[1][col("Campaign")], "Алматы Поиск");
}

#[test]
fn basic_variant_writes_one_row_per_source_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.csv");
    let output = dir.path().join("basic.csv");
    fs::write(&input, SHEET).unwrap();

    let report = AdsImportUseCase::new(ExportConfig::default().with_variant(OutputVariant::Basic))
        .convert_file(&input, &output)
        .unwrap();

    assert_eq!(report.stats.flat_rows, 3);
    let text = fs::read_to_string(&output).unwrap();
    let first = text.trim_start_matches('\u{feff}').lines().next().unwrap();
    assert!(first.starts_with("Campaign;Ad group;Keyword;"));
}

#[test]
fn sheet_without_header_produces_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.csv");
    let output = dir.path().join("out.csv");
    fs::write(&input, "name;price\nsofa;100\n").unwrap();

    let err = AdsImportUseCase::default()
        .convert_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, AppError::HeaderNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn empty_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    fs::write(&input, "\n \n").unwrap();

    let err = AdsImportUseCase::default()
        .convert_file(&input, &dir.path().join("out.csv"))
        .unwrap_err();

    assert!(matches!(err, AppError::UnreadableFile(_)));
}
