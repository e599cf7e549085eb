//! Combine `<prefix>_<index>.mz3` meshes into a single colored atlas mesh.

use clap::Parser;

use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "combinemz3",
    about = "Combine *_n.mz3 meshes into a single colored atlas."
)]
struct Args {
    /// Directory containing the input mz3 files.
    #[arg(long, default_value = ".")]
    input_path: PathBuf,

    /// Name for the combined output file, written into the input directory.
    #[arg(long, default_value = "combined_atlas.mz3")]
    out_file: String,

    /// Path to the color file (one 'R G B' line per region index).
    #[arg(long, default_value = "colors.txt")]
    colors: PathBuf,

    /// Delete the input mz3 files after combining.
    #[arg(long)]
    delete_inputs: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let out_path = args.input_path.join(&args.out_file);
    if let Err(err) =
        atlasmesh::combine_to_file(&args.input_path, &args.colors, &out_path, args.delete_inputs)
    {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
