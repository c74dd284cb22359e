use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};

use galmorph::{
    paths, scoring, worklist, ClassificationSession, CommandViewer, OptionCatalog, ResultStore,
    SessionOutcome, StdinPrompter, SystemViewer,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Classify the cutout list, resuming from the saved results
    Classify {
        /// Cutout manifest, one path per line
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Append-only result log
        #[arg(long)]
        results: Option<PathBuf>,
        /// Morphology option table, one label per line
        #[arg(long, requires = "flag_table")]
        morph_table: Option<PathBuf>,
        /// Flag option table, one label per line
        #[arg(long, requires = "morph_table")]
        flag_table: Option<PathBuf>,
        /// Viewer command to launch per cutout instead of the platform default
        #[arg(long)]
        viewer: Option<String>,
    },
    /// Run the practice round against known answers and report a score
    Train {
        /// Training cutout manifest, one path per line
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Truth table of item-id / morphology pairs
        #[arg(long)]
        truth: Option<PathBuf>,
        /// Morphology option table, one label per line
        #[arg(long, requires = "flag_table")]
        morph_table: Option<PathBuf>,
        /// Flag option table, one label per line
        #[arg(long, requires = "morph_table")]
        flag_table: Option<PathBuf>,
        /// Viewer command to launch per cutout instead of the platform default
        #[arg(long)]
        viewer: Option<String>,
        /// Emit the score report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.mode {
        Mode::Classify {
            manifest,
            results,
            morph_table,
            flag_table,
            viewer,
        } => run_classify(manifest, results, morph_table, flag_table, viewer),
        Mode::Train {
            manifest,
            truth,
            morph_table,
            flag_table,
            viewer,
            json,
        } => run_train(manifest, truth, morph_table, flag_table, viewer, json),
    }
}

fn load_catalog(
    morph_table: Option<PathBuf>,
    flag_table: Option<PathBuf>,
) -> anyhow::Result<OptionCatalog> {
    match (morph_table, flag_table) {
        (Some(morph), Some(flags)) => Ok(OptionCatalog::load(&morph, &flags)?),
        _ => Ok(OptionCatalog::builtin()),
    }
}

fn build_session(
    catalog: OptionCatalog,
    viewer: Option<String>,
) -> anyhow::Result<ClassificationSession> {
    let builder = ClassificationSession::builder()
        .with_catalog(catalog)
        .with_prompter(StdinPrompter);
    let session = match viewer {
        Some(program) => builder.with_displayer(CommandViewer::new(program)).build()?,
        None => builder.with_displayer(SystemViewer).build()?,
    };
    Ok(session)
}

fn run_classify(
    manifest: Option<PathBuf>,
    results: Option<PathBuf>,
    morph_table: Option<PathBuf>,
    flag_table: Option<PathBuf>,
    viewer: Option<String>,
) -> anyhow::Result<()> {
    let dir = paths::data_dir();
    let manifest = manifest.unwrap_or_else(|| dir.join(paths::MANIFEST_FILE));
    let store = ResultStore::new(results.unwrap_or_else(|| dir.join(paths::RESULTS_FILE)));

    let catalog = load_catalog(morph_table, flag_table)?;
    let items = worklist::load_manifest(&manifest)?;
    let done = store.load_done_ids().context("reading result log")?;
    let duplicates = store.lint_duplicates().context("linting result log")?;
    if !duplicates.is_empty() {
        warn!(
            "result log has duplicate entries for: {}",
            duplicates.join(", ")
        );
    }

    let mut pending = worklist::pending_items(&items, &done);
    worklist::shuffle(&mut pending);
    info!(
        "{} cutouts listed, {} already classified",
        items.len(),
        done.len()
    );
    println!("Beginning classification of {} galaxies.", pending.len());

    let mut session = build_session(catalog, viewer)?;
    match session.run(&pending, &store)? {
        SessionOutcome::Completed { classified } => {
            println!("All done. Classified {classified} cutouts this session.");
        }
        SessionOutcome::Aborted { classified } => {
            println!("Stopped after {classified} cutouts. Progress is saved.");
        }
    }
    Ok(())
}

fn run_train(
    manifest: Option<PathBuf>,
    truth: Option<PathBuf>,
    morph_table: Option<PathBuf>,
    flag_table: Option<PathBuf>,
    viewer: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let dir = paths::data_dir();
    let manifest = manifest.unwrap_or_else(|| dir.join(paths::TRAINING_MANIFEST_FILE));
    let truth_path = truth.unwrap_or_else(|| dir.join(paths::TRUTH_FILE));

    let catalog = load_catalog(morph_table, flag_table)?;
    let truth = scoring::load_truth_table(&truth_path)?;
    // Training keeps manifest order so every annotator sees the same sequence.
    let items = worklist::load_manifest(&manifest)?;
    info!("training round over {} cutouts", items.len());

    let mut session = build_session(catalog, viewer)?;
    let answers = session.run_training(&items)?;

    match scoring::score(&answers, &truth) {
        None => println!("Nothing to score: no cutouts were classified."),
        Some(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Graded {} cutouts.", report.graded);
                println!("Exact-match score: {:.1}%", report.full);
                println!("Broad-category score: {:.1}%", report.rough);
            }
        }
    }
    Ok(())
}
