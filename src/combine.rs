//! Combining per-region MZ3 meshes into a single colored atlas mesh.
//!
//! The input is a directory of single-region meshes named
//! `<prefix>_<index>.mz3`, one per segmentation index, as produced by the
//! region-to-mesh driver. The output is one mesh holding all regions, with a
//! uniform color per region and a per-vertex scalar storing the region index,
//! so the combined mesh doubles as a per-vertex parcellation.

use log::info;
use regex::Regex;

use std::fs;
use std::path::{Path, PathBuf};

use crate::color_table::ColorTable;
use crate::error::{AtlasMeshError, Result};
use crate::mz3::{read_mz3, write_mz3};

/// Filename contract for single-region meshes: `<prefix>_<index>.mz3`.
/// The non-greedy prefix group makes the prefix everything before the last
/// `_<digits>` suffix, so `Tian_S1_3.mz3` has prefix `Tian_S1` and index 3.
pub const REGION_MESH_PATTERN: &str = r"^(.+?)_(\d+)\.mz3$";

/// The single-region mesh files found in one directory, all sharing one prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMeshSet {
    pub prefix: String,
    /// (region index, path) pairs, sorted by index ascending.
    pub files: Vec<(u32, PathBuf)>,
}

impl RegionMeshSet {
    /// The highest region index among the discovered files.
    pub fn max_index(&self) -> u32 {
        self.files.iter().map(|(idx, _)| *idx).max().unwrap_or(0)
    }
}

/// Scan a directory for `<prefix>_<index>.mz3` files.
///
/// Fails with [`AtlasMeshError::NoMeshInputs`] when nothing matches the naming
/// contract, and with [`AtlasMeshError::AmbiguousMeshPrefix`] when the matches
/// do not all share one prefix. The latter guards against accidentally
/// combining unrelated mesh sets dropped into the same directory.
pub fn discover_region_meshes<P: AsRef<Path>>(dir: P) -> Result<RegionMeshSet> {
    let pattern = Regex::new(REGION_MESH_PATTERN).unwrap();

    let mut matched: Vec<(u32, String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(caps) = pattern.captures(&name) {
            let index: u32 = match caps[2].parse() {
                Ok(index) => index,
                Err(_) => continue,
            };
            matched.push((index, caps[1].to_string(), entry.path()));
        }
    }

    if matched.is_empty() {
        return Err(AtlasMeshError::NoMeshInputs);
    }

    let mut prefixes: Vec<String> = matched.iter().map(|(_, p, _)| p.clone()).collect();
    prefixes.sort();
    prefixes.dedup();
    if prefixes.len() != 1 {
        return Err(AtlasMeshError::AmbiguousMeshPrefix(prefixes.join(", ")));
    }
    let prefix = prefixes.remove(0);

    matched.sort_by_key(|(index, _, _)| *index);

    Ok(RegionMeshSet {
        prefix,
        files: matched
            .into_iter()
            .map(|(index, _, path)| (index, path))
            .collect(),
    })
}

/// A multi-region mesh assembled from single-region inputs.
///
/// All vectors are flat: 3 vertex indices per face, 3 coordinates per vertex,
/// 4 color values per vertex, 1 scalar per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedMesh {
    pub faces: Vec<i32>,
    pub vertices: Vec<f32>,
    pub rgba: Vec<u8>,
    pub scalars: Vec<f32>,
}

impl CombinedMesh {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len() / 3
    }
}

/// Merge the discovered region meshes into one colored mesh.
///
/// Files are appended in ascending index order. The face indices of each
/// appended region are offset by the vertex count of all regions appended
/// before it, every vertex of a region gets that region's color from the
/// table, and the per-vertex scalar is set to the region index.
pub fn combine_meshes(set: &RegionMeshSet, colors: &ColorTable) -> Result<CombinedMesh> {
    // Checked before any file is decoded, so an unusable color table cannot
    // produce partial output.
    let max_index = set.max_index();
    if max_index as usize > colors.len() {
        return Err(AtlasMeshError::ColorTableTooSmall(colors.len(), max_index));
    }

    let mut combined = CombinedMesh {
        faces: Vec::new(),
        vertices: Vec::new(),
        rgba: Vec::new(),
        scalars: Vec::new(),
    };
    let mut vert_offset: i32 = 0;

    for (index, path) in &set.files {
        let color = colors
            .get(*index)
            .ok_or(AtlasMeshError::MissingColor(*index))?;
        let mesh = read_mz3(path.as_path())?;
        let num_vertices = mesh.num_vertices();

        combined.faces.extend(mesh.faces.iter().map(|v| v + vert_offset));
        combined.vertices.extend_from_slice(&mesh.vertices);
        for _ in 0..num_vertices {
            combined.rgba.extend_from_slice(&color);
        }
        combined
            .scalars
            .extend(std::iter::repeat(*index as f32).take(num_vertices));

        vert_offset += num_vertices as i32;
    }

    Ok(combined)
}

/// Combine all region meshes in a directory and write the result to `out_path`.
///
/// With `delete_inputs`, the single-region files are removed, but only after
/// the combined mesh has been written out successfully.
pub fn combine_to_file(
    input_dir: &Path,
    color_file: &Path,
    out_path: &Path,
    delete_inputs: bool,
) -> Result<()> {
    let set = discover_region_meshes(input_dir)?;
    info!(
        "Combining {} '{}_*' meshes from {}",
        set.files.len(),
        set.prefix,
        input_dir.display()
    );

    let colors = ColorTable::from_file(color_file)?;
    let combined = combine_meshes(&set, &colors)?;
    write_mz3(
        out_path,
        &combined.faces,
        &combined.vertices,
        &combined.rgba,
        &combined.scalars,
    )?;
    info!("Combined mesh saved as: {}", out_path.display());

    if delete_inputs {
        for (_, path) in &set.files {
            fs::remove_file(path)?;
        }
        info!("Deleted {} input mesh files.", set.files.len());
    }

    Ok(())
}
