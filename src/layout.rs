use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{
    args::{ALL_DOCUMENTS, DOCUMENTS, LANGUAGE, LICENSE, NAME, ROUTE},
    items::{Item, Source},
    options::Resolved,
};

/// Directories and files of a new project.
///
/// Every file lives in one of `directories` or in `root`, so creating `directories` first and
/// `files` after is always safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub directories: Vec<Item>,
    pub files: Vec<Item>,
}

impl Layout {
    /// Builds the project tree described by the resolved options.
    ///
    /// An empty project name (`-nme=,`) puts the tree straight into the route, existing files
    /// there are overwritten. A warning is printed when that happens.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a single-choice option has no value, which only happens when
    /// `resolved` was not produced from [`crate::args::cli_options`].
    pub fn from_resolved(resolved: &Resolved) -> Result<Self> {
        let single = |name: &str| {
            resolved
                .first(name)
                .with_context(|| format!("Option {name} has no value"))
        };

        let route = single(ROUTE)?;
        let name = single(NAME)?;
        if name.is_empty() {
            crate::warn!("empty project name, creating the project directly in {route}");
        }

        let root = Path::new(route).join(name);
        let assets = root.join("assets");
        let src = root.join("src");

        let directories = vec![
            Item::directory("src", &root).build()?,
            Item::directory("tests", &root).build()?,
            Item::directory("assets", &root).build()?,
            Item::directory("data", &assets).build()?,
            Item::directory("images", &assets).build()?,
        ];

        let mut files = vec![Item::file("main", &src)
            .extension(single(LANGUAGE)?)
            .build()?];

        let license = format!("license/{}.txt", single(LICENSE)?);
        let documents = [
            (
                "license",
                Item::file("LICENSE", &root)
                    .source(Source::Template(license))
                    .build()?,
            ),
            (
                "ignore",
                Item::file(".gitignore", &root)
                    .source(Source::Template("ignore.txt".into()))
                    .build()?,
            ),
            (
                "readme",
                Item::file("README", &root)
                    .extension("md")
                    .source(Source::Template("readme.txt".into()))
                    .build()?,
            ),
        ];

        let all = resolved.contains(DOCUMENTS, ALL_DOCUMENTS);
        files.extend(
            documents
                .into_iter()
                .filter(|(kind, _)| all || resolved.contains(DOCUMENTS, kind))
                .map(|(_, item)| item),
        );

        Ok(Layout {
            root,
            directories,
            files,
        })
    }
}
