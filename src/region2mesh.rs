//! Driving the external `niimath` tool to turn a labeled volume into meshes.
//!
//! niimath does the heavy lifting per region: binary-threshold the volume to a
//! single label, smooth, extract an isosurface, decimate, write an MZ3 file.
//! This module only iterates over the region indices, names the outputs and
//! hands the result to the combiner. Indices the tool fails on are logged and
//! skipped; the run itself continues. All invocations are sequential.

use log::{info, warn};

use std::fs;
use std::io::{Error as IOError, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::combine::combine_to_file;
use crate::error::{AtlasMeshError, Result};
use crate::util::{find_in_path, volume_stem};
use crate::volume::{max_label, read_label_volume};

/// Name of the external surface-extraction executable.
pub const MESH_TOOL: &str = "niimath";

/// Gaussian smoothing in mm applied to the binarized label before extraction.
const MESH_SMOOTH_MM: &str = "1.2";
/// Isosurface level on the smoothed binary volume.
const MESH_ISO_LEVEL: &str = "0.5";
/// Decimation ratio: keep half of the extracted triangles.
const MESH_REDUCTION: &str = "0.5";

/// Run niimath once to extract the surface of a single label as
/// `<stem>_<index>.mz3` in `out_dir`.
///
/// Returns the path of the written mesh, or `None` when the tool exited
/// non-zero for this index.
pub fn extract_region_mesh(volume: &Path, index: u32, out_dir: &Path) -> Result<Option<PathBuf>> {
    let out_base = out_dir.join(format!("{}_{}", volume_stem(volume), index));
    let index_arg = index.to_string();

    let output = Command::new(MESH_TOOL)
        .arg(volume)
        .args(&["-thr", index_arg.as_str(), "-uthr", index_arg.as_str()])
        .arg("-bin")
        .args(&["-s", MESH_SMOOTH_MM])
        .arg("-mesh")
        .args(&["-i", MESH_ISO_LEVEL])
        .args(&["-r", MESH_REDUCTION])
        .args(&["-q", "b"])
        .arg(&out_base)
        .output()?;

    if output.status.success() {
        let mesh_path = out_base.with_extension("mz3");
        info!("Saved mesh: {}", mesh_path.display());
        Ok(Some(mesh_path))
    } else {
        warn!(
            "{} failed for index {}: {}",
            MESH_TOOL,
            index,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        Ok(None)
    }
}

/// Extract one mesh per label of the input volume, sequentially.
///
/// The index range defaults to 1 through the maximum voxel label found in the
/// volume; explicit bounds skip loading the volume entirely. Meshes are
/// renamed to a dense `<stem>_1.mz3 .. <stem>_N.mz3` numbering as they are
/// produced, so indices skipped after a tool failure leave no gaps for the
/// combiner. Returns the paths of the produced meshes.
pub fn volume_to_region_meshes(
    volume: &Path,
    out_dir: &Path,
    index_min: Option<u32>,
    index_max: Option<u32>,
) -> Result<Vec<PathBuf>> {
    if find_in_path(MESH_TOOL).is_none() {
        return Err(AtlasMeshError::MeshToolNotFound);
    }
    if !volume.is_file() {
        return Err(AtlasMeshError::Io(IOError::new(
            ErrorKind::NotFound,
            format!("File not found: {}", volume.display()),
        )));
    }

    let min_index = index_min.unwrap_or(1);
    let max_index = match index_max {
        Some(max) => max,
        None => {
            let (_, data) = read_label_volume(volume)?;
            max_label(&data)
        }
    };

    info!("Processing indices from {} to {}.", min_index, max_index);

    let stem = volume_stem(volume);
    let mut meshes: Vec<PathBuf> = Vec::new();
    for index in min_index..=max_index {
        if let Some(path) = extract_region_mesh(volume, index, out_dir)? {
            let region = meshes.len() as u32 + 1;
            let dense = out_dir.join(format!("{}_{}.mz3", stem, region));
            if dense != path {
                fs::rename(&path, &dense)?;
            }
            meshes.push(dense);
        }
    }

    Ok(meshes)
}

/// Full driver: one mesh per region, then one combined colored atlas mesh.
///
/// `out_file` is the name of the combined mesh, written into `out_dir`. With
/// `delete_inputs`, the per-region meshes are removed once the combined mesh
/// has been written.
pub fn atlas_to_combined_mesh(
    volume: &Path,
    out_dir: &Path,
    out_file: &str,
    color_file: &Path,
    index_min: Option<u32>,
    index_max: Option<u32>,
    delete_inputs: bool,
) -> Result<()> {
    let meshes = volume_to_region_meshes(volume, out_dir, index_min, index_max)?;
    info!("Extracted {} region meshes, combining...", meshes.len());
    combine_to_file(out_dir, color_file, &out_dir.join(out_file), delete_inputs)
}
