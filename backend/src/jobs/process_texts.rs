use super::JobReporter;
use crate::importer::{ImportError, TextImporter};

/// Progress reported once the importer has returned. It is a fixed
/// milestone, not a measure of how much was imported.
pub const HALFWAY_PROGRESS: u32 = 50;

/// Runs a text import and relays its outcome to the runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTextsJob;

impl ProcessTextsJob {
    /// Calls `import`, reports [`HALFWAY_PROGRESS`], then reports the
    /// importer's last error if it recorded a failure.
    ///
    /// An error returned by `import` is passed straight back to the runner;
    /// in that case nothing is reported.
    pub fn handle<I, R>(&self, importer: &mut I, reporter: &mut R) -> Result<(), ImportError>
    where
        I: TextImporter + ?Sized,
        R: JobReporter + ?Sized,
    {
        importer.import()?;

        reporter.progress(HALFWAY_PROGRESS);

        if importer.has_failed() {
            reporter.failed(importer.last_error());
        }

        Ok(())
    }
}
