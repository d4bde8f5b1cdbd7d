//! Application UI. For now, this is logging plus a progress bar for token
//! extraction.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Application UI state.
#[derive(Clone)]
pub struct Ui {
    /// Our progress bars. These hide themselves when stderr is not a terminal.
    multi_progress: MultiProgress,
}

impl Ui {
    /// Create a new UI. This sets up logging, which is controlled by the
    /// `RUST_LOG` environment variable.
    pub fn init() -> Ui {
        env_logger::Builder::from_default_env()
            .format_timestamp(None)
            .init();
        Ui {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Create a new progress bar with default settings.
    pub fn new_progress_bar(&self, len: u64) -> ProgressBar {
        let pb = ProgressBar::new(len).with_style(default_progress_style());
        self.multi_progress.add(pb)
    }
}

pub(crate) fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("  {msg:30} {pos:>4}/{len:4} {elapsed_precise} {wide_bar:.cyan/blue}")
        .expect("bad progress bar template")
}
