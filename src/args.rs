use clap::{Arg, CommandFactory};
pub use clap::Parser;
use std::path::PathBuf;

use crate::options::{OptionSpec, Syntax, ANY};

pub const NAME: &str = "-nme";
pub const ROUTE: &str = "-rte";
pub const LANGUAGE: &str = "-lng";
pub const LICENSE: &str = "-lic";
pub const DOCUMENTS: &str = "-dcs";

/// Selects every document.
pub const ALL_DOCUMENTS: &str = "all";

pub const LANGUAGES: [&str; 9] = ["py", "c", "java", "go", "cpp", "lua", "js", "r", "txt"];
pub const LICENSES: [&str; 2] = ["mit", "apache"];
pub const DOCUMENT_KINDS: [&str; 3] = ["license", "ignore", "readme"];

/// The options `psetup` understands, in the `-xxx=value` form.
#[must_use]
pub fn cli_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::new(NAME, ["new-project"], [ANY]),
        OptionSpec::new(ROUTE, ["./"], [ANY]),
        OptionSpec::new(LANGUAGE, ["go"], LANGUAGES),
        OptionSpec::new(LICENSE, ["mit"], LICENSES),
        OptionSpec::new(
            DOCUMENTS,
            [ALL_DOCUMENTS],
            std::iter::once(ALL_DOCUMENTS).chain(DOCUMENT_KINDS),
        ),
    ]
}

#[must_use]
pub fn cli_syntax() -> Syntax {
    Syntax::default()
}

const OPTIONS_HELP: &str = "\
Project options, each written as -xxx=value:
  -nme=<name>       project name [default: new-project]
  -rte=<path>       where the project folder is created [default: ./]
  -lng=<ext>        extension of src/main: py, c, java, go, cpp, lua, js, r, txt [default: go]
  -lic=<license>    mit, apache [default: mit]
  -dcs=<docs,...>   all, license, ignore, readme [default: all]

Unknown or malformed options are ignored and invalid values fall back to their default.";

#[derive(Parser, Debug)]
#[clap(version, about, after_help = OPTIONS_HELP)]
pub struct Args {
    /// Read templates from this directory instead of the bundled ones
    #[clap(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Print what would be created without touching the filesystem
    #[clap(long)]
    pub dry_run: bool,

    /// Do not print the final error message
    #[clap(long, short)]
    pub quiet: bool,

    /// Project options, see below
    #[clap(allow_hyphen_values = true, trailing_var_arg = true, value_name = "OPTION")]
    pub options: Vec<String>,
}

impl Args {
    #[must_use]
    pub fn no_errors(&self) -> bool {
        self.quiet
    }

    /// First option token that names one of the program's own flags.
    ///
    /// Everything after the first project option is collected as an option, so a flag written
    /// there never reaches clap.
    #[must_use]
    pub fn misplaced_flag(&self) -> Option<&str> {
        let command = Self::command();
        let shorts = command
            .get_arguments()
            .filter_map(Arg::get_short)
            .chain(['h', 'V'])
            .collect::<Vec<_>>();

        self.options.iter().map(String::as_str).find(|token| {
            if token.starts_with("--") {
                return true;
            }

            let mut chars = token.chars();
            chars.next() == Some('-')
                && chars.next().is_some_and(|c| shorts.contains(&c))
                && chars.next().is_none()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Allowed;

    #[test]
    fn command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn option_tokens_are_collected() {
        let args = Args::try_parse_from(["psetup", "-nme=demo", "-lng=py", "-dcs=readme,license"])
            .unwrap();

        assert_eq!(args.options, ["-nme=demo", "-lng=py", "-dcs=readme,license"]);
        assert!(!args.dry_run);
        assert!(!args.no_errors());
    }

    #[test]
    fn flags_come_before_options() {
        let args =
            Args::try_parse_from(["psetup", "--dry-run", "--templates", "tpl", "-rte=/tmp"]).unwrap();

        assert!(args.dry_run);
        assert_eq!(args.templates, Some(PathBuf::from("tpl")));
        assert_eq!(args.options, ["-rte=/tmp"]);
    }

    #[test]
    fn flags_after_options_are_caught() {
        let args = Args::try_parse_from(["psetup", "-rte=/tmp", "--dry-run"]).unwrap();
        assert!(!args.dry_run);
        assert_eq!(args.misplaced_flag(), Some("--dry-run"));

        let args = Args::try_parse_from(["psetup", "-nme=x", "-q", "--templates=tpl"]).unwrap();
        assert_eq!(args.misplaced_flag(), Some("-q"));
    }

    #[test]
    fn malformed_options_are_not_flags() {
        let args = Args::try_parse_from(["psetup", "-rte=/tmp", "-x", "-name=demo", "-"]).unwrap();
        assert_eq!(args.misplaced_flag(), None);
    }

    #[test]
    fn option_names_fit_the_syntax() {
        let syntax = cli_syntax();

        for spec in cli_options() {
            assert!(spec.name().starts_with(&syntax.prefix));
            assert_eq!(spec.name().len(), syntax.prefix.len() + syntax.name_size);
        }
    }

    #[test]
    fn documents_accept_all() {
        let documents = cli_options()
            .into_iter()
            .find(|s| s.name() == DOCUMENTS)
            .unwrap();

        assert!(documents.allows(ALL_DOCUMENTS));
        assert!(DOCUMENT_KINDS.iter().all(|d| documents.allows(d)));
        assert!(matches!(documents.allowed(), Allowed::OneOf(_)));
    }
}
