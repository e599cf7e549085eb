//! Convert a labeled NIfTI segmentation into one colored atlas mesh: run
//! niimath once per region index, then combine the per-region meshes.

use clap::Parser;

use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "atlas2mesh",
    about = "Convert a labeled segmentation volume into a single colored atlas mesh."
)]
struct Args {
    /// Input volumetric segmentation to convert.
    #[arg(long)]
    input_volume: PathBuf,

    /// Output directory for the meshes (default: the input volume's directory).
    #[arg(long)]
    output_path: Option<PathBuf>,

    /// Name for the combined output file.
    #[arg(long, default_value = "combined_atlas.mz3")]
    out_file: String,

    /// Minimum region index to convert.
    #[arg(long)]
    index_min: Option<u32>,

    /// Maximum region index to convert (default: the highest label in the volume).
    #[arg(long)]
    index_max: Option<u32>,

    /// Path to the color file (one 'R G B' line per region index).
    #[arg(long, default_value = "colors.txt")]
    colors: PathBuf,

    /// Delete the individual mz3 files after combining.
    #[arg(long)]
    delete_mz3: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let out_dir = match args.output_path {
        Some(dir) => dir,
        None => args
            .input_volume
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    if let Err(err) = atlasmesh::atlas_to_combined_mesh(
        &args.input_volume,
        &out_dir,
        &args.out_file,
        &args.colors,
        args.index_min,
        args.index_max,
        args.delete_mz3,
    ) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
