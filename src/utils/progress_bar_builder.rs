use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const STEPS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg} {pos}/{len}";

pub(crate) struct ProgressBarBuilder {
    message: String,
    steps: Option<u64>,
    enable_tick: bool,
    hidden: bool,
}

impl ProgressBarBuilder {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            steps: None,
            enable_tick: false,
            hidden: false,
        }
    }

    /// Counts `len` discrete steps (e.g. one per reference strain) instead of spinning.
    pub(crate) fn with_steps(mut self, len: u64) -> Self {
        self.steps = Some(len);
        self
    }

    pub(crate) fn with_tick(mut self) -> Self {
        self.enable_tick = true;
        self
    }

    /// Draws nothing, for machine-readable output modes.
    pub(crate) fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let (pb, template) = match self.steps {
            Some(len) => (ProgressBar::new(len), STEPS_TEMPLATE),
            None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
        };

        pb.set_style(ProgressStyle::default_spinner().template(template)?);
        pb.set_message(self.message);
        if self.hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }

        if self.enable_tick {
            pb.enable_steady_tick(Duration::from_millis(200));
        }

        Ok(pb)
    }
}
