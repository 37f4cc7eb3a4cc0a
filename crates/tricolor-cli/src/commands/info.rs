use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tricolor_core::align::search::interior_padding;
use tricolor_core::consts::COLOR_CHANNEL_COUNT;
use tricolor_core::io::image_io::load_plate;

#[derive(Args)]
pub struct InfoArgs {
    /// Input plate image
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let plate = load_plate(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let channel_height = plate.channel_height();
    let remainder = plate.height() - channel_height * COLOR_CHANNEL_COUNT;
    let (pad_h, pad_w) = interior_padding(channel_height, plate.width());

    println!("File:        {}", args.file.display());
    println!("Plate:       {}x{}", plate.width(), plate.height());
    println!("Bit depth:   {}", plate.original_bit_depth);
    println!("Channels:    3 x {}x{}", plate.width(), channel_height);
    if remainder > 0 {
        println!("Discarded:   {} row(s) at the bottom", remainder);
    }
    println!("Search pad:  {} rows, {} columns", pad_h, pad_w);

    Ok(())
}
