//! Article file naming.
//!
//! Article files may carry an optional numeric prefix (`NNN-`) that is only
//! there to keep the content directory sorted on disk. The prefix is not
//! part of the article's route id:
//!
//! - `010-bessel-correction.md` → id `bessel-correction`
//! - `snakebytes-enum.md` → id `snakebytes-enum`
//!
//! Dashes in the id are turned into spaces for a fallback display title.

/// Result of parsing an article file stem like `010-bessel-correction`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `10` from `010-bessel-correction`)
    pub number: Option<u32>,
    /// Route id: the stem without its number prefix. Empty if number-only.
    pub id: String,
    /// Fallback title: id with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an article file stem.
///
/// - `"010-bessel-correction"` → number=Some(10), id="bessel-correction"
/// - `"001"` → number=Some(1), id=""
/// - `"snakebytes-self"` → number=None, id="snakebytes-self"
pub fn parse_article_name(stem: &str) -> ParsedName {
    let (number, id) = match stem.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<u32>() {
            Ok(num) => (Some(num), rest),
            Err(_) => (None, stem),
        },
        None => match stem.parse::<u32>() {
            Ok(num) => (Some(num), ""),
            Err(_) => (None, stem),
        },
    };

    ParsedName {
        number,
        id: id.to_string(),
        display_title: id.replace('-', " "),
    }
}
