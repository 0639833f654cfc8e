// ─── Status spinner ───
// Cosmetic only. The indicatif redraw thread reads the published message
// string and nothing else; it never touches pipeline state.

use std::time::Duration;

use indicatif::ProgressBar;

pub struct StatusSpinner {
    bar: ProgressBar,
}

impl StatusSpinner {
    /// Start ticking with an initial status line.
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message.into());
        Self { bar }
    }

    /// Publish the current stage's status line.
    pub fn set_status(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    /// Print a per-stage success marker above the spinner.
    pub fn mark_done(&self, message: impl AsRef<str>) {
        self.bar.println(format!("✔ {}", message.as_ref()));
    }

    /// Print a warning marker; the spinner keeps running.
    pub fn mark_warning(&self, message: impl AsRef<str>) {
        self.bar.println(format!("⚠ {}", message.as_ref()));
    }

    /// Hide the spinner while `f` runs, e.g. around a terminal prompt.
    pub fn suspend<T>(&self, f: impl FnOnce() -> T) -> T {
        self.bar.suspend(f)
    }

    /// Stop the ticker and clear the status line.
    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

// The ticker must never outlive the pipeline, whichever way it exits.
impl Drop for StatusSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}
