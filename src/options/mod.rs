mod extract;
mod validate;

use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
};

pub use extract::{extract, ExtractError, Extracted};
pub use validate::{split, validate_many, validate_one, DEFAULT_SEPARATOR};

/// Allow-list entry that accepts any value.
pub const ANY: &str = "any";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allowed {
    Any,
    OneOf(BTreeSet<String>),
}

impl<S: Into<String>> FromIterator<S> for Allowed {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let values = iter.into_iter().map(Into::into).collect::<BTreeSet<_>>();

        if values.contains(ANY) {
            Allowed::Any
        } else {
            Allowed::OneOf(values)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    /// The raw value is split on the spec separator and validated as a list.
    #[default]
    Multi,
    /// The raw value is validated as a whole.
    Single,
}

/// Definition of one command line option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    name: String,
    defaults: Vec<String>,
    allowed: Allowed,
    separator: String,
    arity: Arity,
}

impl OptionSpec {
    /// # Panics
    ///
    /// Panics if `defaults` is empty.
    pub fn new<D, A>(name: impl Into<String>, defaults: D, allowed: A) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let defaults = defaults.into_iter().map(Into::into).collect::<Vec<_>>();
        assert!(!defaults.is_empty(), "an option needs at least one default");

        OptionSpec {
            name: name.into(),
            defaults,
            allowed: allowed.into_iter().collect(),
            separator: String::new(),
            arity: Arity::default(),
        }
    }

    /// Splits multi-values on `separator` instead of [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn separated_by(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn single(mut self) -> Self {
        self.arity = Arity::Single;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    #[must_use]
    pub fn allowed(&self) -> &Allowed {
        &self.allowed
    }

    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        match &self.allowed {
            Allowed::Any => true,
            Allowed::OneOf(values) => values.contains(value),
        }
    }

    /// Resolves the raw value of a token addressed to this option.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Vec<String> {
        match self.arity {
            Arity::Single => vec![validate_one(raw, self)],
            Arity::Multi => validate_many(&split(raw, &self.separator), self),
        }
    }
}

/// Shape of an option token: `<prefix><name><separator><value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    pub prefix: String,
    pub separator: String,
    /// Length of the name in bytes, prefix excluded.
    pub name_size: usize,
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax {
            prefix: "-".into(),
            separator: "=".into(),
            name_size: 3,
        }
    }
}

/// Final values of every option, keyed by option name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved(HashMap<String, Vec<String>>);

impl Resolved {
    /// Values of `name`, or an empty slice for an option that was never declared.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// First value of `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.values(name).iter().any(|v| v == value)
    }
}

/// A token that did not change any option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    Malformed { token: String, reason: ExtractError },
    Unknown { token: String, name: String },
}

impl Display for Ignored {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ignored::Malformed { token, reason } => {
                write!(f, "ignoring invalid argument format '{token}': {reason}")
            }
            Ignored::Unknown { token, name } => {
                write!(f, "ignoring unknown argument '{name}' in '{token}'")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Processed {
    pub resolved: Resolved,
    pub ignored: Vec<Ignored>,
}

/// Resolves `tokens` against `specs`.
///
/// Every option starts at its defaults. Tokens are applied in order and a later token for the
/// same option replaces an earlier one. Malformed tokens and unknown names never fail the run,
/// they are reported back in [`Processed::ignored`].
pub fn process<T: AsRef<str>>(tokens: &[T], specs: &[OptionSpec], syntax: &Syntax) -> Processed {
    let mut resolved = specs
        .iter()
        .map(|spec| (spec.name.clone(), spec.defaults.clone()))
        .collect::<HashMap<_, _>>();
    let mut ignored = Vec::new();

    for token in tokens.iter().map(|t| t.as_ref()) {
        let Extracted { name, value } = match extract(token, syntax) {
            Ok(extracted) => extracted,
            Err(reason) => {
                crate::trace!("'{token}' is not an option: {reason}");
                ignored.push(Ignored::Malformed {
                    token: token.to_owned(),
                    reason,
                });
                continue;
            }
        };

        let Some(spec) = specs.iter().find(|spec| spec.name == name) else {
            ignored.push(Ignored::Unknown {
                token: token.to_owned(),
                name: name.to_owned(),
            });
            continue;
        };

        let values = spec.resolve(value);
        crate::trace!("{name} resolved to {values:?}");
        resolved.insert(spec.name.clone(), values);
    }

    Processed {
        resolved: Resolved(resolved),
        ignored,
    }
}
