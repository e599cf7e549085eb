//! Data preparation for subcortical brain atlases.
//!
//! The focus of this package is on turning labeled segmentation volumes into
//! colored surface meshes in the MZ3 format: it reads and writes MZ3 mesh files,
//! combines per-region meshes into one colored atlas mesh, drives the external
//! `niimath` tool to extract one mesh per region of a labeled volume, and
//! filters labeled NIfTI volumes down to a subcortical atlas or hemisphere.

pub mod color_table;
pub mod combine;
pub mod error;
pub mod lut;
pub mod mz3;
pub mod region2mesh;
pub mod util;
pub mod volume;

pub use color_table::{sample_colormap, write_color_file, ColorTable};
pub use combine::{combine_meshes, combine_to_file, discover_region_meshes, CombinedMesh, RegionMeshSet};
pub use error::{AtlasMeshError, Result};
pub use lut::{read_lut, RegionLut};
pub use mz3::{read_mz3, write_mz3, Mz3Header, Mz3Mesh};
pub use region2mesh::{atlas_to_combined_mesh, volume_to_region_meshes};
pub use volume::{keep_even_labels, keep_label_range, keep_labels_in, max_label, read_label_volume, write_label_volume};
