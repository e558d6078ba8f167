use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const WORD_TEMPLATE: &str = "{spinner} {msg} [{bar:40}] {pos}/{len} words ({eta})";

/// Progress bar for the word pass; hidden when stdout is not a terminal
///
/// The length is set by the converter once the word count is known.
pub fn word_progress() -> ProgressBar {
    if !console::Term::stdout().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0).with_message("Writing");
    if let Ok(style) = ProgressStyle::with_template(WORD_TEMPLATE) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        } else {
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
