//! Field-level cleanup rules for source values.

/// Trim and strip one layer of surrounding double quotes.
pub fn normalize_keyword(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

/// Trim and use a period as the decimal separator.
pub fn normalize_max_cpc(raw: &str) -> String {
    raw.trim().replace(',', ".")
}

fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// Resolve the landing page for a row and attach tracking parameters.
///
/// Missing values use `base_url`. Values without an `http` prefix get
/// `https://` when they look like a domain, otherwise `base_url`. The UTM
/// template is appended only when the result has no query string yet.
pub fn normalize_final_url(raw: &str, base_url: &str, utm_template: &str) -> String {
    let mut url = if is_missing(raw) {
        base_url.to_string()
    } else {
        raw.trim().to_string()
    };

    if !url.starts_with("http") {
        url = if url.contains('.') {
            format!("https://{}", url)
        } else {
            base_url.to_string()
        };
    }

    if !url.contains('?') {
        url.push_str(utm_template);
    }

    url
}
