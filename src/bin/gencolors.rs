//! Generate a region color text file by sampling a colormap ramp.

use clap::Parser;

use std::path::PathBuf;
use std::process;

use atlasmesh::{sample_colormap, write_color_file, Result};

#[derive(Parser, Debug)]
#[command(name = "gencolors", about = "Generate a colormap text file.")]
struct Args {
    /// Number of colors to sample from the colormap.
    #[arg(long, default_value_t = 8)]
    num_colors: u32,

    /// Name of the colormap to use (plasma or viridis).
    #[arg(long, default_value = "plasma")]
    cmap_name: String,

    /// Output filename for the color text file.
    #[arg(long, default_value = "plasma_8colors.txt")]
    output_file: PathBuf,
}

fn run(args: &Args) -> Result<()> {
    let colors = sample_colormap(&args.cmap_name, args.num_colors)?;
    write_color_file(&args.output_file, &colors)?;
    println!(
        "Wrote {} '{}' colors to {}",
        colors.len(),
        args.cmap_name,
        args.output_file.display()
    );
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
