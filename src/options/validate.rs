use std::collections::HashSet;

use super::{Allowed, OptionSpec};

pub const DEFAULT_SEPARATOR: &str = ",";

/// Splits a raw value into its sub-values.
///
/// A trailing separator is implied, so `a,b` and `a,b,` both give `[a, b]`. Empty inner
/// segments are kept as they are; validation decides what to do with them.
#[must_use]
pub fn split<'v>(raw: &'v str, separator: &str) -> Vec<&'v str> {
    if raw.is_empty() {
        return Vec::new();
    }

    let separator = if separator.is_empty() {
        DEFAULT_SEPARATOR
    } else {
        separator
    };

    raw.split_terminator(separator).collect()
}

/// Resolves a single value against the allow-list of `spec`.
#[must_use]
pub fn validate_one(value: &str, spec: &OptionSpec) -> String {
    match spec.allowed() {
        Allowed::Any => value.to_owned(),
        Allowed::OneOf(_) if spec.allows(value) => value.to_owned(),
        Allowed::OneOf(_) => spec.defaults()[0].clone(),
    }
}

/// Resolves a list of values against the allow-list of `spec`.
///
/// With a wildcard allow-list the input comes back as is. Otherwise unknown values are
/// dropped and duplicates collapsed, keeping the first occurrence of each value. When nothing
/// survives, or nothing was given, the defaults are returned.
#[must_use]
pub fn validate_many<S: AsRef<str>>(values: &[S], spec: &OptionSpec) -> Vec<String> {
    if values.is_empty() {
        return spec.defaults().to_vec();
    }

    if let Allowed::Any = spec.allowed() {
        return values.iter().map(|v| v.as_ref().to_owned()).collect();
    }

    let mut seen = HashSet::with_capacity(values.len());
    let kept = values
        .iter()
        .map(|v| v.as_ref())
        .filter(|v| spec.allows(v) && seen.insert(*v))
        .map(str::to_owned)
        .collect::<Vec<_>>();

    if kept.is_empty() {
        spec.defaults().to_vec()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::options::ANY;

    fn languages() -> OptionSpec {
        OptionSpec::new("-lng", ["go"], ["go", "java", "cpp"])
    }

    fn names() -> OptionSpec {
        OptionSpec::new("-nme", ["new-project"], [ANY])
    }

    fn as_set(values: &[String]) -> BTreeSet<&str> {
        values.iter().map(String::as_str).collect()
    }

    #[test]
    fn split_empty_is_empty() {
        assert!(split("", ",").is_empty());
        assert!(split("", "").is_empty());
    }

    #[test]
    fn split_implies_trailing_separator() {
        assert_eq!(split("a,b", ","), ["a", "b"]);
        assert_eq!(split("a,b,", ","), ["a", "b"]);
        assert_eq!(split("a", ","), ["a"]);
    }

    #[test]
    fn split_keeps_empty_segments() {
        assert_eq!(split("a,,b", ","), ["a", "", "b"]);
        assert_eq!(split(",", ","), [""]);
        assert_eq!(split(",a", ","), ["", "a"]);
    }

    #[test]
    fn split_defaults_to_comma() {
        assert_eq!(split("a,b", ""), ["a", "b"]);
    }

    #[test]
    fn split_on_multi_char_separator() {
        assert_eq!(split("a::b::c", "::"), ["a", "b", "c"]);
        assert_eq!(split("a:b", "::"), ["a:b"]);
    }

    #[test]
    fn validate_one_accepts_members() {
        assert_eq!(validate_one("java", &languages()), "java");
    }

    #[test]
    fn validate_one_falls_back_to_first_default() {
        assert_eq!(validate_one("cobol", &languages()), "go");
        assert_eq!(validate_one("", &languages()), "go");
    }

    #[test]
    fn validate_one_wildcard_accepts_anything() {
        assert_eq!(validate_one("my project", &names()), "my project");
    }

    #[test]
    fn validate_many_filters_and_collapses() {
        let resolved = validate_many(&["go", "go", "java", "cobol"], &languages());
        assert_eq!(as_set(&resolved), BTreeSet::from(["go", "java"]));
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn validate_many_keeps_first_occurrence_order() {
        let resolved = validate_many(&["java", "go", "java"], &languages());
        assert_eq!(resolved, ["java", "go"]);
    }

    #[test]
    fn validate_many_falls_back_to_defaults() {
        let spec = OptionSpec::new("-dcs", ["all", "readme"], ["all", "license", "readme"]);
        assert_eq!(validate_many(&["cobol", ""], &spec), ["all", "readme"]);
    }

    #[test]
    fn validate_many_empty_input_gives_defaults() {
        let empty: [&str; 0] = [];
        assert_eq!(validate_many(&empty, &languages()), ["go"]);
        assert_eq!(validate_many(&empty, &names()), ["new-project"]);
    }

    #[test]
    fn validate_many_wildcard_is_untouched() {
        let values = ["b", "a", "b", ""];
        assert_eq!(validate_many(&values, &names()), values);
    }

    #[test]
    fn validate_many_is_idempotent() {
        let values = ["cpp", "go", "cpp", "rust", "java"];
        let once = validate_many(&values, &languages());
        let twice = validate_many(&once, &languages());
        assert_eq!(as_set(&once), as_set(&twice));
        assert_eq!(as_set(&validate_many(&values, &languages())), as_set(&once));
    }
}
