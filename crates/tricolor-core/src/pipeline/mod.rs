pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{process_batch, process_channels, process_plate, write_outputs};
pub use types::{
    NoOpReporter, PipelineStage, PlateOutput, PlateReport, PlateSummary, ProgressReporter,
};
