use anyhow::{bail, ensure, Result};
use clap::Parser;
use std::process::ExitCode;
use psetup::{
    args::{cli_options, cli_syntax, Args},
    error, ferror, info,
    items::{DryRun, Filesystem, Generator},
    layout::Layout,
    options::process,
    store::{Bundled, ContentStore, DirStore},
    trace, warn,
};

fn app(args: &Args) -> Result<()> {
    if let Some(flag) = args.misplaced_flag() {
        bail!("'{flag}' must come before the project options");
    }

    let processed = process(&args.options, &cli_options(), &cli_syntax());

    for ignored in &processed.ignored {
        warn!(ignored);
    }

    let layout = Layout::from_resolved(&processed.resolved)?;
    trace!("Project root: {}", layout.root.display());

    match args.templates {
        Some(ref dir) => {
            ensure!(
                dir.is_dir(),
                "Template directory {} does not exist",
                dir.display()
            );
            trace!("Reading templates from {}", dir.display());
            run(DirStore::new(dir), &layout, args.dry_run)
        }
        None => run(Bundled, &layout, args.dry_run),
    }
}

fn run<S: ContentStore>(store: S, layout: &Layout, dry_run: bool) -> Result<()> {
    if dry_run {
        let mut generator = Generator::with_filesystem(store, DryRun::default());
        generate(&mut generator, layout)?;

        for operation in &generator.filesystem().operations {
            println!("{operation}");
        }

        return Ok(());
    }

    let mut generator = Generator::new(store);
    let missing = generate(&mut generator, layout)?;

    if missing == 0 {
        info!("Project structure created at {}", layout.root.display());
    } else {
        warn!(
            "Project structure created at {} with {missing} missing file(s)",
            layout.root.display()
        );
    }

    Ok(())
}

/// Creates the directories, then the files. A failed directory stops the run, failed files
/// are reported and counted.
fn generate<S: ContentStore, F: Filesystem>(
    generator: &mut Generator<S, F>,
    layout: &Layout,
) -> Result<usize> {
    let report = generator.create_items(&layout.directories);

    if !report.is_success() {
        let causes = report
            .failures()
            .iter()
            .map(|failure| ferror!("{failure}"))
            .collect::<Vec<_>>();
        bail!("Could not create all directories\n{}", causes.join("\n"));
    }

    let failures = generator.create_items(&layout.files).into_failures();

    for failure in &failures {
        warn!(failure);
    }

    Ok(failures.len())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.no_errors() {
                error!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}
