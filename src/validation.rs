//! Character classes and configuration validation.

use crate::error::ConfigError;

/// Character allowed in the host part of a function macro.
#[inline]
pub fn is_host_char(c: char) -> bool {
    !matches!(c, ':' | '{' | '}')
}

/// Character allowed in the unbracketed part of an item key.
#[inline]
pub fn is_item_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Character allowed in a trigger function name.
#[inline]
pub fn is_function_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Character allowed in user and LLD macro names.
#[inline]
pub fn is_macro_name_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '_')
}

/// Check if string is a valid function name.
#[inline]
pub fn is_valid_function_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_function_name_char)
}

/// Validate a candidate list and drop repeated entries, keeping the first.
pub fn dedup_candidates(candidates: Vec<String>) -> Result<Vec<String>, ConfigError> {
    if candidates.is_empty() {
        return Err(ConfigError::EmptyCandidateSet);
    }

    let mut unique: Vec<String> = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.into_iter().enumerate() {
        if candidate.is_empty() {
            return Err(ConfigError::EmptyCandidate { index });
        }
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }

    Ok(unique)
}

/// Reject macro names that still carry their braces.
pub fn check_macro_names(names: &[String]) -> Result<(), ConfigError> {
    match names.iter().find(|name| name.contains(['{', '}'])) {
        Some(name) => Err(ConfigError::BracedMacroName { name: name.clone() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_function_names() {
        assert!(is_valid_function_name("last"));
        assert!(is_valid_function_name("str_len"));
        assert!(is_valid_function_name("band2"));
    }

    #[test]
    fn test_invalid_function_names() {
        assert!(!is_valid_function_name(""));
        assert!(!is_valid_function_name("no-data"));
        assert!(!is_valid_function_name("a.b"));
        assert!(!is_valid_function_name("a b"));
    }

    #[test]
    fn test_host_chars() {
        assert!("Zabbix server".chars().all(is_host_char));
        assert!(!is_host_char(':'));
        assert!(!is_host_char('}'));
        assert!(!is_host_char('{'));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let unique = dedup_candidates(vec!["or".into(), "and".into(), "or".into()]).unwrap();
        assert_eq!(unique, vec!["or".to_string(), "and".to_string()]);
    }

    #[test]
    fn test_dedup_rejects_empty() {
        assert_eq!(dedup_candidates(vec![]), Err(ConfigError::EmptyCandidateSet));
        assert_eq!(
            dedup_candidates(vec!["a".into(), String::new()]),
            Err(ConfigError::EmptyCandidate { index: 1 })
        );
    }

    #[test]
    fn test_braced_macro_name_rejected() {
        let names = vec!["HOST.HOST".to_string(), "{HOST.IP}".to_string()];
        assert_eq!(
            check_macro_names(&names),
            Err(ConfigError::BracedMacroName {
                name: "{HOST.IP}".into()
            })
        );
    }
}
