//! An interactive tool for classifying galaxy image cutouts by morphology.
//!
//! Progress is persisted after every cutout, so a session can be interrupted at
//! any point and resumed later: the result log is the source of truth for what
//! is already done, and a rerun simply filters it out of the work list.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use galmorph::{worklist, ClassificationSession, ResultStore, StdinPrompter, SystemViewer};
//!
//! let items = worklist::load_manifest("cutoutlist.dat".as_ref())?;
//! let store = ResultStore::new("results.dat");
//! let pending = worklist::pending_items(&items, &store.load_done_ids()?);
//!
//! let mut session = ClassificationSession::builder()
//!     .with_prompter(StdinPrompter)
//!     .with_displayer(SystemViewer)
//!     .build()?;
//! session.run(&pending, &store)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing Sessions
//!
//! The input and display collaborators are injected at construction, so a
//! session can be scripted instead of driven from a terminal:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use galmorph::{ClassificationSession, NullDisplayer, ScriptedPrompter};
//!
//! let mut session = ClassificationSession::builder()
//!     .with_prompter(ScriptedPrompter::new(["5", "n"]))
//!     .with_displayer(NullDisplayer)
//!     .build()?;
//! let answers = session.run_training(&["cutouts/a.fits".to_string()])?;
//! assert_eq!(answers[0].1, "Sa");
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod options;
pub mod paths;
pub mod scoring;
pub mod session;
pub mod store;
pub mod worklist;

pub use display::{CommandViewer, Displayer, NullDisplayer, SystemViewer};
pub use options::OptionCatalog;
pub use scoring::{load_truth_table, score, ScoreReport};
pub use session::{
    ClassificationSession, Prompter, ScriptedPrompter, SessionBuilder, SessionError,
    SessionOutcome, StdinPrompter,
};
pub use store::{ResultStore, StoreError};

pub fn init_logger() {
    env_logger::init();
}
