//! Character whitelist and allow-list validation.
//!
//! User text is normalized (comma decimal separators become dots, surrounding
//! whitespace is trimmed) and then checked against a fixed character set before
//! anything tries to parse it. Identifier tokens are extracted and compared with
//! the declared variables of the formula.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::error::ErrorKind;

fn allowed_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9+\-*/().\sA-Za-z_]+$").expect("character whitelist regex must compile")
    })
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier regex must compile")
    })
}

/// Apply decimal-comma normalization and trim surrounding whitespace.
pub fn normalize_expression(expression: &str) -> String {
    expression.replace(',', ".").trim().to_string()
}

/// Returns true if `name` is a whole identifier token (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extract identifier tokens in order of appearance (duplicates included).
///
/// A digit run followed by letters yields the letters as an identifier, so
/// `2e5` references `e5`.
pub fn extract_identifiers(expression: &str) -> Vec<&str> {
    identifier_re()
        .find_iter(expression)
        .map(|m| m.as_str())
        .collect()
}

/// Validate an expression against the allow-list of declared variable ids.
///
/// Returns the cleaned expression, which contains only numerals, `+ - * /`,
/// parentheses, dots, whitespace and identifiers from `allowed`.
pub fn validate<S: AsRef<str>>(expression: &str, allowed: &[S]) -> Result<String, ErrorKind> {
    let cleaned = normalize_expression(expression);
    if cleaned.is_empty() {
        return Err(ErrorKind::EmptyExpression);
    }

    if !allowed_chars_re().is_match(&cleaned) {
        return Err(ErrorKind::IllegalCharacter);
    }

    let allowed: HashSet<&str> = allowed.iter().map(|s| s.as_ref()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unknown: Vec<String> = Vec::new();
    for ident in extract_identifiers(&cleaned) {
        if !allowed.contains(ident) && seen.insert(ident) {
            unknown.push(ident.to_string());
        }
    }
    if !unknown.is_empty() {
        return Err(ErrorKind::UnknownVariable(unknown));
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UI: [&str; 2] = ["U", "I"];

    #[test]
    fn test_validate_returns_cleaned_expression() {
        assert_eq!(validate("  U * I  ", &UI), Ok("U * I".to_string()));
        assert_eq!(validate("U * 1,5", &UI), Ok("U * 1.5".to_string()));
        assert_eq!(validate("\t(U+I)/2\n", &UI), Ok("(U+I)/2".to_string()));
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate("", &UI), Err(ErrorKind::EmptyExpression));
        assert_eq!(validate("   ", &UI), Err(ErrorKind::EmptyExpression));
        assert_eq!(validate("\n\t", &UI), Err(ErrorKind::EmptyExpression));
    }

    #[test]
    fn test_validate_illegal_characters() {
        for expr in [
            "U * I; alert(1)",
            "U = 3",
            "{U}",
            "`U`",
            "U ** I'",
            "U % I",
            "U^2",
            "\"U\"",
            "U[0]",
            "U * I²",
        ] {
            assert_eq!(validate(expr, &UI), Err(ErrorKind::IllegalCharacter), "{expr}");
        }
    }

    #[test]
    fn test_illegal_character_wins_over_unknown_identifiers() {
        assert_eq!(validate("K; X", &UI), Err(ErrorKind::IllegalCharacter));
    }

    #[test]
    fn test_validate_unknown_variables_in_first_appearance_order() {
        assert_eq!(
            validate("U * K", &UI),
            Err(ErrorKind::UnknownVariable(vec!["K".to_string()]))
        );
        assert_eq!(
            validate("R + U * K + R + alert", &UI),
            Err(ErrorKind::UnknownVariable(vec![
                "R".to_string(),
                "K".to_string(),
                "alert".to_string()
            ]))
        );
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        assert_eq!(
            validate("u * I", &UI),
            Err(ErrorKind::UnknownVariable(vec!["u".to_string()]))
        );
    }

    #[test]
    fn test_exponent_suffix_is_an_identifier() {
        assert_eq!(
            validate("2e5", &UI),
            Err(ErrorKind::UnknownVariable(vec!["e5".to_string()]))
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("U"));
        assert!(is_identifier("_tmp"));
        assert!(is_identifier("R_2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2R"));
        assert!(!is_identifier("R-2"));
        assert!(!is_identifier("Ω"));
    }

    #[test]
    fn test_extract_identifiers_keeps_duplicates() {
        assert_eq!(extract_identifiers("U * U + 3I"), vec!["U", "U", "I"]);
        assert!(extract_identifiers("1 + 2.5").is_empty());
    }
}
