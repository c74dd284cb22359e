//! The interactive classification session: one cutout at a time, display,
//! morphology, flags, persist, until the list is exhausted or the user quits.

mod builder;
mod error;
mod prompt;

pub use builder::SessionBuilder;
pub use error::SessionError;
pub use prompt::{Prompter, ScriptedPrompter, StdinPrompter};

use log::info;

use crate::display::Displayer;
use crate::options::OptionCatalog;
use crate::store::ResultStore;
use prompt::{parse_action, MenuAction};

/// How a finished run ended. Both variants are clean outcomes; quitting
/// mid-stream is a user choice, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every pending cutout was classified
    Completed { classified: usize },
    /// The user quit; already-persisted records stand
    Aborted { classified: usize },
}

enum ItemOutcome {
    Labeled { morphology: String, flags: String },
    Aborted,
}

/// Drives the per-cutout state machine over its injected collaborators.
///
/// Construction goes through [`SessionBuilder`]; the prompter and displayer are
/// required so a session is never implicitly wired to process-global I/O.
pub struct ClassificationSession {
    catalog: OptionCatalog,
    prompter: Box<dyn Prompter>,
    displayer: Box<dyn Displayer>,
}

impl ClassificationSession {
    /// Creates a new SessionBuilder for fluent construction
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub(crate) fn new(
        catalog: OptionCatalog,
        prompter: Box<dyn Prompter>,
        displayer: Box<dyn Displayer>,
    ) -> Self {
        Self {
            catalog,
            prompter,
            displayer,
        }
    }

    /// Runs the classification loop over `pending`, appending one record per
    /// completed cutout before the next one is shown.
    ///
    /// A record is persisted the moment its flags are confirmed, so killing the
    /// process between cutouts loses nothing. Quitting discards only the cutout
    /// in progress.
    pub fn run(
        &mut self,
        pending: &[String],
        store: &ResultStore,
    ) -> Result<SessionOutcome, SessionError> {
        let mut classified = 0;
        for item_id in pending {
            self.show_item(item_id)?;
            match self.classify_item()? {
                ItemOutcome::Labeled { morphology, flags } => {
                    store.append(item_id, &morphology, &flags)?;
                    classified += 1;
                    info!("saved {item_id}: {morphology} [{flags}]");
                }
                ItemOutcome::Aborted => {
                    info!("session aborted by user after {classified} cutouts");
                    return Ok(SessionOutcome::Aborted { classified });
                }
            }
        }
        Ok(SessionOutcome::Completed { classified })
    }

    /// Runs a training round: morphology only, nothing persisted. Returns the
    /// (item_id, morphology) answers collected before completion or quit,
    /// ready for grading.
    pub fn run_training(&mut self, items: &[String]) -> Result<Vec<(String, String)>, SessionError> {
        let mut answers = Vec::new();
        for item_id in items {
            self.show_item(item_id)?;
            match self.select_morphology()? {
                Some(morphology) => answers.push((item_id.clone(), morphology)),
                None => {
                    info!("training round stopped after {} cutouts", answers.len());
                    break;
                }
            }
        }
        Ok(answers)
    }

    fn show_item(&self, item_id: &str) -> Result<(), SessionError> {
        println!("===========================================================");
        println!("Displaying cutout {item_id}");
        self.displayer.display(item_id)
    }

    fn classify_item(&mut self) -> Result<ItemOutcome, SessionError> {
        let Some(morphology) = self.select_morphology()? else {
            return Ok(ItemOutcome::Aborted);
        };
        let Some(flags) = self.select_flags()? else {
            return Ok(ItemOutcome::Aborted);
        };
        Ok(ItemOutcome::Labeled { morphology, flags })
    }

    /// Morphology prompt. At least one pick is required; picking two
    /// neighbouring classes records an edge case joined with `|`.
    fn select_morphology(&mut self) -> Result<Option<String>, SessionError> {
        println!("Morphologies (pick two neighbouring classes for edge cases, e.g. Sa|Sb):");
        let options = self.catalog.morphologies().to_vec();
        let picked = match self.select_indices(&options, false)? {
            Some(picked) => picked,
            None => return Ok(None),
        };
        let labels: Vec<&str> = picked.iter().map(|&i| options[i].as_str()).collect();
        Ok(Some(labels.join("|")))
    }

    /// Flag prompt. Confirming with nothing picked is valid and yields the
    /// empty flag string; picked flags concatenate as their codes ("23").
    fn select_flags(&mut self) -> Result<Option<String>, SessionError> {
        println!("Flags (confirm with none selected if nothing applies):");
        let options = self.catalog.flags().to_vec();
        let picked = match self.select_indices(&options, true)? {
            Some(picked) => picked,
            None => return Ok(None),
        };
        let codes: Vec<String> = picked.iter().map(|&i| OptionCatalog::flag_code(i)).collect();
        Ok(Some(codes.concat()))
    }

    /// The shared multi-select accumulator behind both prompts.
    ///
    /// Returns the picked indices in entry order, or `None` on quit. Selections
    /// accumulate until confirmed; `r` clears them, unknown input re-prompts
    /// without losing them, and an empty confirm is rejected unless
    /// `allow_empty` is set.
    fn select_indices(
        &mut self,
        options: &[String],
        allow_empty: bool,
    ) -> Result<Option<Vec<usize>>, SessionError> {
        for (i, label) in options.iter().enumerate() {
            println!("{:>3}) {}", i + 1, label);
        }
        println!("number = select, r = reset, n = next, q = quit");

        let mut picked: Vec<usize> = Vec::new();
        loop {
            let line = self.prompter.read_line("> ")?;
            match parse_action(&line) {
                MenuAction::Quit => return Ok(None),
                MenuAction::Reset => {
                    picked.clear();
                    println!("Selection cleared.");
                }
                MenuAction::Confirm => {
                    if picked.is_empty() && !allow_empty {
                        println!("Pick at least one option before continuing.");
                        continue;
                    }
                    return Ok(Some(picked));
                }
                MenuAction::Select(n) => {
                    if n == 0 || n > options.len() {
                        println!("No option {n}.");
                        continue;
                    }
                    let index = n - 1;
                    if picked.contains(&index) {
                        println!("{} is already selected.", options[index]);
                    } else {
                        println!("Selected {}.", options[index]);
                        picked.push(index);
                    }
                }
                MenuAction::Unknown => {
                    println!("Enter an option number, 'r' to reset, 'n' to continue, or 'q' to quit.");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::NullDisplayer;
    use crate::store::ResultStore;
    use std::fs;

    fn scripted_session<I, S>(responses: I) -> ClassificationSession
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassificationSession::builder()
            .with_prompter(ScriptedPrompter::new(responses))
            .with_displayer(NullDisplayer)
            .build()
            .expect("session should build")
    }

    fn items(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classifies_and_persists_each_item() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        // Per item: pick, confirm morphology, confirm empty flags.
        let mut session = scripted_session(["5", "n", "n", "10", "n", "2", "3", "n"]);

        let outcome = session.run(&items(&["a.fits", "b.fits"]), &store)?;
        assert_eq!(outcome, SessionOutcome::Completed { classified: 2 });

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sa \nb.fits Irr 23\n");
        Ok(())
    }

    #[test]
    fn edge_case_selections_join_with_pipe() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["5", "6", "n", "n"]);

        session.run(&items(&["a.fits"]), &store)?;
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sa|Sb \n");
        Ok(())
    }

    #[test]
    fn empty_morphology_confirm_is_rejected() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        // First confirm is rejected, then Sa goes through.
        let mut session = scripted_session(["n", "5", "n", "n"]);

        let outcome = session.run(&items(&["a.fits"]), &store)?;
        assert_eq!(outcome, SessionOutcome::Completed { classified: 1 });
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sa \n");
        Ok(())
    }

    #[test]
    fn reset_clears_accumulated_selection() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["5", "r", "6", "n", "n"]);

        session.run(&items(&["a.fits"]), &store)?;
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sb \n");
        Ok(())
    }

    #[test]
    fn repeated_selection_is_ignored() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["5", "5", "n", "n"]);

        session.run(&items(&["a.fits"]), &store)?;
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sa \n");
        Ok(())
    }

    #[test]
    fn unknown_input_reprompts_without_losing_state() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["5", "bogus", "99", "n", "n"]);

        session.run(&items(&["a.fits"]), &store)?;
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sa \n");
        Ok(())
    }

    #[test]
    fn quit_at_morphology_discards_item_and_stops() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["q"]);

        let outcome = session.run(&items(&["a.fits", "b.fits"]), &store)?;
        assert_eq!(outcome, SessionOutcome::Aborted { classified: 0 });
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn quit_at_flags_discards_in_progress_item() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["5", "n", "q"]);

        let outcome = session.run(&items(&["a.fits", "b.fits"]), &store)?;
        assert_eq!(outcome, SessionOutcome::Aborted { classified: 0 });
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn quit_mid_stream_keeps_earlier_records() -> Result<(), SessionError> {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results.dat"));
        let mut session = scripted_session(["5", "n", "n", "q"]);

        let outcome = session.run(&items(&["a.fits", "b.fits"]), &store)?;
        assert_eq!(outcome, SessionOutcome::Aborted { classified: 1 });
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "a.fits Sa \n");
        Ok(())
    }

    #[test]
    fn training_collects_morphologies_without_persisting() -> Result<(), SessionError> {
        let mut session = scripted_session(["5", "n", "3", "n"]);

        let answers = session.run_training(&items(&["a.fits", "b.fits"]))?;
        assert_eq!(
            answers,
            [
                ("a.fits".to_string(), "Sa".to_string()),
                ("b.fits".to_string(), "Elliptical".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn training_quit_returns_partial_answers() -> Result<(), SessionError> {
        let mut session = scripted_session(["5", "n", "q"]);

        let answers = session.run_training(&items(&["a.fits", "b.fits", "c.fits"]))?;
        assert_eq!(answers, [("a.fits".to_string(), "Sa".to_string())]);
        Ok(())
    }
}
