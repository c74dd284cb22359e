use super::error::SessionError;
use super::prompt::Prompter;
use super::ClassificationSession;
use crate::display::Displayer;
use crate::options::OptionCatalog;

/// A builder for constructing a ClassificationSession with a fluent interface.
///
/// The prompter and displayer are required collaborators; the option catalog
/// defaults to the builtin morphology and flag sets when none is supplied.
#[derive(Default)]
pub struct SessionBuilder {
    catalog: Option<OptionCatalog>,
    prompter: Option<Box<dyn Prompter>>,
    displayer: Option<Box<dyn Displayer>>,
}

impl SessionBuilder {
    /// Creates a new empty SessionBuilder instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the option catalog the session presents
    ///
    /// # Example
    /// ```
    /// use galmorph::{OptionCatalog, SessionBuilder};
    ///
    /// let builder = SessionBuilder::new()
    ///     .with_catalog(OptionCatalog::builtin());
    /// ```
    pub fn with_catalog(mut self, catalog: OptionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the interactive-input source
    ///
    /// # Example
    /// ```
    /// use galmorph::{ScriptedPrompter, SessionBuilder};
    ///
    /// let builder = SessionBuilder::new()
    ///     .with_prompter(ScriptedPrompter::new(["5", "n", "n"]));
    /// ```
    pub fn with_prompter(mut self, prompter: impl Prompter + 'static) -> Self {
        self.prompter = Some(Box::new(prompter));
        self
    }

    /// Sets the cutout displayer
    ///
    /// # Example
    /// ```
    /// use galmorph::{SessionBuilder, SystemViewer};
    ///
    /// let builder = SessionBuilder::new()
    ///     .with_displayer(SystemViewer);
    /// ```
    pub fn with_displayer(mut self, displayer: impl Displayer + 'static) -> Self {
        self.displayer = Some(Box::new(displayer));
        self
    }

    /// Builds and returns the final ClassificationSession instance
    ///
    /// # Returns
    /// * `Result<ClassificationSession, SessionError>` - The constructed session
    ///   if successful, or a build error if the prompter or displayer is missing
    pub fn build(self) -> Result<ClassificationSession, SessionError> {
        let prompter = self
            .prompter
            .ok_or_else(|| SessionError::Build("no prompter configured".to_string()))?;
        let displayer = self
            .displayer
            .ok_or_else(|| SessionError::Build("no displayer configured".to_string()))?;
        let catalog = self.catalog.unwrap_or_else(OptionCatalog::builtin);
        Ok(ClassificationSession::new(catalog, prompter, displayer))
    }
}
