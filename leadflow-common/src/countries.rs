//! Country code to display name lookup

/// Display name for a two-letter country code.
///
/// Covers the markets the enrichment pipeline currently targets. Callers
/// fall back to the raw code for anything unmapped.
pub fn country_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "US" => "United States",
        "IN" => "India",
        "GB" => "United Kingdom",
        "JP" => "Japan",
        "CN" => "China",
        "DE" => "Germany",
        "FR" => "France",
        "IT" => "Italy",
        "ES" => "Spain",
        "BR" => "Brazil",
        "RU" => "Russia",
        "KR" => "South Korea",
        "AU" => "Australia",
        "CA" => "Canada",
        "MX" => "Mexico",
        "NL" => "Netherlands",
        "SE" => "Sweden",
        "PL" => "Poland",
        "TR" => "Turkey",
        "SA" => "Saudi Arabia",
        _ => return None,
    };
    Some(name)
}
