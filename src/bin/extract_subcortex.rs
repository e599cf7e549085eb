//! Cut a subcortical atlas out of a whole-brain labeled volume.
//!
//! Keeps an explicit index range, the indices listed in a lookup CSV, or only
//! even indices (the right hemisphere in atlases that interleave hemispheres),
//! zeroing every other voxel. Filters combine: range and lookup restrict the
//! label set, and --even-only is applied on top.

use clap::Parser;

use std::path::PathBuf;
use std::process;

use atlasmesh::volume::{
    keep_even_labels, keep_label_range, keep_labels_in, max_label, read_label_volume,
    write_label_volume,
};
use atlasmesh::{read_lut, Result};

#[derive(Parser, Debug)]
#[command(
    name = "extract_subcortex",
    about = "Filter a labeled volume down to a subcortical atlas or hemisphere."
)]
struct Args {
    /// Input labeled volume (.nii or .nii.gz).
    #[arg(long)]
    input_volume: PathBuf,

    /// Output path for the filtered volume.
    #[arg(long)]
    output_volume: PathBuf,

    /// Lowest region index to keep.
    #[arg(long)]
    index_min: Option<u32>,

    /// Highest region index to keep.
    #[arg(long)]
    index_max: Option<u32>,

    /// Lookup CSV (index,region) listing the indices to keep.
    #[arg(long)]
    lut: Option<PathBuf>,

    /// Keep only even indices (the right hemisphere in interleaved atlases).
    #[arg(long)]
    even_only: bool,
}

fn run(args: &Args) -> Result<()> {
    let (header, mut data) = read_label_volume(&args.input_volume)?;

    if let Some(lut_path) = &args.lut {
        let lut = read_lut(lut_path)?;
        data = keep_labels_in(&data, lut.indices());
    }
    if args.index_min.is_some() || args.index_max.is_some() {
        let lo = args.index_min.unwrap_or(1);
        let hi = match args.index_max {
            Some(hi) => hi,
            None => max_label(&data),
        };
        data = keep_label_range(&data, lo, hi);
    }
    if args.even_only {
        data = keep_even_labels(&data);
    }

    write_label_volume(&args.output_volume, &header, &data)?;
    println!("Saved filtered volume: {}", args.output_volume.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
