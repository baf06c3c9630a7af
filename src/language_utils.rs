//! Language utilities for caption language tags
//!
//! Caption documents declare their language with a BCP-47 style tag such as
//! `en-US`. Only the primary subtag is checked against ISO 639; region and
//! script subtags are passed through untouched.

use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const PART2B_TO_PART2T: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Primary language subtag of a tag, lowercased (`en-US` -> `en`)
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Check the syntax of a language tag: alphanumeric subtags joined by `-`
pub fn validate_language_tag(tag: &str) -> Result<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(anyhow!("Language tag must not be empty"));
    }

    let well_formed = tag
        .split('-')
        .all(|subtag| !subtag.is_empty() && subtag.len() <= 8 && subtag.chars().all(|c| c.is_ascii_alphanumeric()));
    if !well_formed {
        return Err(anyhow!("Invalid language tag: {}", tag));
    }

    Ok(())
}

/// Resolve the primary subtag of a tag to an ISO 639 language
pub fn resolve_language(tag: &str) -> Result<Language> {
    let code = primary_subtag(tag);

    let language = match code.len() {
        2 => Language::from_639_1(&code),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(part2b, _)| *part2b == code)
                .map_or(code.as_str(), |(_, part2t)| part2t);
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Unknown language code: {}", tag))
}

/// Whether the primary subtag names a known ISO 639 language
pub fn is_known_language(tag: &str) -> bool {
    resolve_language(tag).is_ok()
}

/// Get the English language name for a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    Ok(resolve_language(tag)?.to_name().to_string())
}

/// SAMI class name for a tag, e.g. `en-US` -> `ENUSCC`
pub fn sami_class_name(tag: &str) -> String {
    let mut class: String = tag
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if class.is_empty() {
        class.push_str("UNKNOWN");
    }
    class.push_str("CC");
    class
}
