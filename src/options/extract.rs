use thiserror::Error;

use super::Syntax;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ExtractError {
    #[error("insufficient argument length")]
    TooShort,
    #[error("missing required prefix")]
    MissingPrefix,
    #[error("separator in incorrect position")]
    MisplacedSeparator,
}

/// A token split into its option name (prefix included) and the raw value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Extracted<'t> {
    pub name: &'t str,
    pub value: &'t str,
}

/// Splits `token` into name and raw value.
///
/// The name is `syntax.name_size` bytes after the prefix and must be followed directly by the
/// separator. Everything after the first separator is returned untouched, so `-dcs=a=b`
/// yields the value `a=b`.
///
/// # Errors
///
/// Returns an [`ExtractError`] describing the first rule the token breaks.
pub fn extract<'t>(token: &'t str, syntax: &Syntax) -> Result<Extracted<'t>, ExtractError> {
    let expected = syntax.prefix.len() + syntax.name_size;

    if token.len() < expected {
        return Err(ExtractError::TooShort);
    }

    if !token.starts_with(syntax.prefix.as_str()) {
        return Err(ExtractError::MissingPrefix);
    }

    match token.find(syntax.separator.as_str()) {
        Some(index) if index == expected => Ok(Extracted {
            name: &token[..index],
            value: &token[index + syntax.separator.len()..],
        }),
        _ => Err(ExtractError::MisplacedSeparator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax() -> Syntax {
        Syntax::default()
    }

    #[test]
    fn extracts_name_and_value() {
        let extracted = extract("-nme=demo", &syntax()).unwrap();
        assert_eq!(extracted.name, "-nme");
        assert_eq!(extracted.value, "demo");
    }

    #[test]
    fn keeps_embedded_separators_in_value() {
        let extracted = extract("-rte=a=b,c", &syntax()).unwrap();
        assert_eq!(extracted.name, "-rte");
        assert_eq!(extracted.value, "a=b,c");
    }

    #[test]
    fn empty_value_is_allowed() {
        let extracted = extract("-nme=", &syntax()).unwrap();
        assert_eq!(extracted.value, "");
    }

    #[test]
    fn rejects_short_tokens() {
        assert_eq!(extract("-nm", &syntax()), Err(ExtractError::TooShort));
        assert_eq!(extract("", &syntax()), Err(ExtractError::TooShort));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(extract("nmex=demo", &syntax()), Err(ExtractError::MissingPrefix));
        assert_eq!(extract("+nme=demo", &syntax()), Err(ExtractError::MissingPrefix));
    }

    #[test]
    fn rejects_misplaced_separator() {
        assert_eq!(extract("-nm=demo", &syntax()), Err(ExtractError::MisplacedSeparator));
        assert_eq!(extract("-name=demo", &syntax()), Err(ExtractError::MisplacedSeparator));
        assert_eq!(extract("-nme", &syntax()), Err(ExtractError::MisplacedSeparator));
        assert_eq!(extract("--nme", &syntax()), Err(ExtractError::MisplacedSeparator));
    }

    #[test]
    fn honours_custom_syntax() {
        let syntax = Syntax {
            prefix: "--".into(),
            separator: ":".into(),
            name_size: 4,
        };

        let extracted = extract("--name:x", &syntax).unwrap();
        assert_eq!(extracted.name, "--name");
        assert_eq!(extracted.value, "x");
        assert_eq!(extract("--nam:x", &syntax), Err(ExtractError::MisplacedSeparator));
        assert_eq!(extract("-name:xy", &syntax), Err(ExtractError::MissingPrefix));
    }
}
