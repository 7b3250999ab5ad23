//! Placeholder substitution engine for welcome messages

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::types::{RecordLookup, ReservedValues};

/// Replacement for placeholders that resolve to nothing.
///
/// A non-breaking space keeps the surrounding line from collapsing once the
/// HTML body is downgraded to plain text.
pub const MISSING_VALUE: &str = "\u{a0}";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([^}]+)\}").unwrap();
}

/// Substitute `{identifier}` placeholders in an HTML body.
///
/// Reserved identifiers win over record fields. Record fields that are absent
/// or empty resolve to [`MISSING_VALUE`]. Replacement text is never re-scanned.
pub fn render<R>(template: &str, reserved: &ReservedValues, record: &R) -> String
where
    R: RecordLookup + ?Sized,
{
    let mut resolved: HashMap<&str, String> = HashMap::new();
    let mut unresolved: Vec<&str> = Vec::new();

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(token), Some(identifier)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if resolved.contains_key(token.as_str()) {
            continue;
        }

        let value = match resolve(identifier.as_str(), reserved, record) {
            Some(value) => value.to_string(),
            None => {
                unresolved.push(identifier.as_str());
                MISSING_VALUE.to_string()
            }
        };
        resolved.insert(token.as_str(), value);
    }

    if resolved.is_empty() {
        return template.to_string();
    }

    if !unresolved.is_empty() {
        tracing::debug!(fields = ?unresolved, "Placeholders without a value");
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            resolved
                .get(&caps[0])
                .cloned()
                .unwrap_or_else(|| MISSING_VALUE.to_string())
        })
        .into_owned()
}

/// Distinct placeholder identifiers in order of first appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        if let Some(identifier) = caps.get(1) {
            if !seen.contains(&identifier.as_str()) {
                seen.push(identifier.as_str());
            }
        }
    }
    seen
}

fn resolve<'a, R>(identifier: &str, reserved: &'a ReservedValues, record: &'a R) -> Option<&'a str>
where
    R: RecordLookup + ?Sized,
{
    if let Some(value) = reserved.get(identifier) {
        return Some(value);
    }

    record.field(identifier).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::UserRecord;

    fn reserved() -> ReservedValues {
        ReservedValues::new("Xk7#mPq2", "https://cms.test/admin/", "team@cms.test")
    }

    #[test]
    fn test_render_without_placeholders() {
        let record = UserRecord::new();
        let html = "<p>Welcome aboard!</p>";

        assert_eq!(render(html, &reserved(), &record), html);
    }

    #[test]
    fn test_render_reserved_values() {
        let record = UserRecord::new();
        let html = "Login at {adminUrl} with {pass}. Questions: {fromEmail}";

        assert_eq!(
            render(html, &reserved(), &record),
            "Login at https://cms.test/admin/ with Xk7#mPq2. Questions: team@cms.test"
        );
    }

    #[test]
    fn test_reserved_wins_over_record() {
        let record: UserRecord = [("pass", "from-record"), ("fromEmail", "spoof@evil.test")]
            .into_iter()
            .collect();

        assert_eq!(render("{pass}", &reserved(), &record), "Xk7#mPq2");
        assert_eq!(render("{fromEmail}", &reserved(), &record), "team@cms.test");
    }

    #[test]
    fn test_missing_field_becomes_nbsp() {
        let record = UserRecord::new();

        assert_eq!(render("{ghost}", &reserved(), &record), "\u{a0}");
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let record: UserRecord = [("title", "")].into_iter().collect();

        assert_eq!(render("Dear {title}", &reserved(), &record), "Dear \u{a0}");
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let record: UserRecord = [("name", "Alice")].into_iter().collect();

        assert_eq!(
            render("{name} and {name}", &reserved(), &record),
            "Alice and Alice"
        );
    }

    #[test]
    fn test_replacement_not_rescanned() {
        let record: UserRecord = [("first_name", "{last_name}"), ("last_name", "Smith")]
            .into_iter()
            .collect();

        assert_eq!(
            render("{first_name} {last_name}", &reserved(), &record),
            "{last_name} Smith"
        );
    }

    #[test]
    fn test_empty_braces_left_alone() {
        let record = UserRecord::new();

        assert_eq!(render("a {} b", &reserved(), &record), "a {} b");
    }

    #[test]
    fn test_unbalanced_brace_left_alone() {
        let record: UserRecord = [("name", "Alice")].into_iter().collect();

        assert_eq!(render("{name} {oops", &reserved(), &record), "Alice {oops");
    }

    #[test]
    fn test_render_is_deterministic() {
        let record: UserRecord = [("name", "Alice")].into_iter().collect();
        let html = "<p>{name}</p><p>{pass}</p><p>{ghost}</p>";

        assert_eq!(
            render(html, &reserved(), &record),
            render(html, &reserved(), &record)
        );
    }

    #[test]
    fn test_render_with_hashmap_record() {
        let mut record = HashMap::new();
        record.insert("first_name".to_string(), "Bob".to_string());

        assert_eq!(render("Hi {first_name}", &reserved(), &record), "Hi Bob");
    }

    #[test]
    fn test_placeholders_in_order() {
        let found = placeholders("{b} {a} {b} {pass} {}");
        assert_eq!(found, vec!["b", "a", "pass"]);
    }
}
