//! Background jobs and the callbacks they use to talk to their runner.

mod process_texts;

pub use process_texts::ProcessTextsJob;

/// Side channel from a running job back to whatever executes it.
pub trait JobReporter {
    /// Annotates the running job with a completion percentage (0-100).
    fn progress(&mut self, percent: u32);

    /// Marks the job as failed with a human readable reason.
    fn failed(&mut self, reason: &str);
}
