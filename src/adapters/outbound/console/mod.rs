/// Console adapters for terminal feedback
mod progress_reporter;

pub use progress_reporter::{StderrProgressReporter, Verbosity};
