use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tricolor_core::pipeline::{PipelineStage, ProgressReporter};

/// Drives an indicatif bar: position counts finished plates, the message
/// shows the most recent plate and stage.
pub struct StageReporter {
    pb: ProgressBar,
}

impl StageReporter {
    pub fn new(plates: usize) -> Result<Self> {
        let pb = ProgressBar::new(plates as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:40} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self { pb })
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}

impl ProgressReporter for StageReporter {
    fn begin_stage(&self, name: &str, stage: PipelineStage) {
        self.pb.set_message(format!("{}: {}", name, stage));
    }

    fn advance(&self, plates_done: usize) {
        self.pb.set_position(plates_done as u64);
    }

    fn finish_plate(&self, name: &str) {
        self.pb.println(format!("  finished {}", name));
    }
}
