use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;
use tricolor_core::pipeline::process_batch;

use crate::progress::StageReporter;
use crate::summary::{print_batch_summary, print_pipeline_summary};

use super::align::PipelineOptions;

#[derive(Args)]
pub struct BatchArgs {
    /// Input plate images
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Worker threads for processing plates in parallel (default: all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub options: PipelineOptions,
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let config = args.options.to_config()?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    print_pipeline_summary(&config, args.files.len());

    let reporter = StageReporter::new(args.files.len())?;
    let reports = process_batch(&args.files, &config, &reporter);
    reporter.finish();

    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    info!(total = reports.len(), failed, "Batch finished");
    print_batch_summary(&reports);

    if failed > 0 {
        bail!("{} of {} plate(s) failed", failed, reports.len());
    }
    Ok(())
}
