use std::process::Command;

use log::warn;

use crate::session::SessionError;

/// External image-viewer integration. Implementations open the cutout for the
/// annotator; failure must surface as an error, never be swallowed.
pub trait Displayer {
    fn display(&self, item_id: &str) -> Result<(), SessionError>;
}

/// Opens the cutout with the platform's default handler for its file type.
#[derive(Debug, Default)]
pub struct SystemViewer;

impl Displayer for SystemViewer {
    fn display(&self, item_id: &str) -> Result<(), SessionError> {
        open::that(item_id)
            .map_err(|e| SessionError::Display(format!("failed to open {item_id}: {e}")))
    }
}

/// Launches a configured viewer command (e.g. `ds9`) with the cutout path as
/// its argument. The viewer is left running; only a failed launch is an error.
#[derive(Debug)]
pub struct CommandViewer {
    program: String,
}

impl CommandViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Displayer for CommandViewer {
    fn display(&self, item_id: &str) -> Result<(), SessionError> {
        Command::new(&self.program).arg(item_id).spawn().map_err(|e| {
            SessionError::Display(format!(
                "failed to launch viewer '{}' for {item_id}: {e}",
                self.program
            ))
        })?;
        Ok(())
    }
}

/// Displayer for headless runs: warns instead of opening anything.
#[derive(Debug, Default)]
pub struct NullDisplayer;

impl Displayer for NullDisplayer {
    fn display(&self, item_id: &str) -> Result<(), SessionError> {
        warn!("no viewer configured, not displaying {item_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_viewer_launch_is_a_display_error() {
        let viewer = CommandViewer::new("galmorph-no-such-viewer-binary");
        let result = viewer.display("cutouts/a.fits");
        assert!(matches!(result, Err(SessionError::Display(_))));
    }

    #[test]
    fn null_displayer_always_succeeds() {
        assert!(NullDisplayer.display("cutouts/a.fits").is_ok());
    }
}
