//! Labeled-volume filtering for subcortical atlas extraction.
//!
//! A labeled volume stores one integer region index per voxel (0 = background).
//! The functions here zero out voxels outside a chosen set of labels, which is
//! how a subcortical atlas, or one of its hemispheres, is cut out of a
//! whole-brain segmentation before meshing. Label values are kept as-is, never
//! re-mapped. Volume I/O and header handling are delegated to the nifti crate.

use ndarray::ArrayD;
use ndarray_stats::QuantileExt;
use nifti::writer::WriterOptions;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};

use std::path::Path;

use crate::error::Result;

/// Read a labeled NIfTI volume into an f32 array, together with its header.
pub fn read_label_volume<P: AsRef<Path>>(path: P) -> Result<(NiftiHeader, ArrayD<f32>)> {
    let obj = ReaderOptions::new().read_file(path)?;
    let header = obj.header().clone();
    let data = obj.into_volume().into_ndarray::<f32>()?;
    Ok((header, data))
}

/// Write a labeled volume, re-using the header of the volume it was derived
/// from so that the affine and voxel geometry carry over.
pub fn write_label_volume<P: AsRef<Path>>(
    path: P,
    header: &NiftiHeader,
    data: &ArrayD<f32>,
) -> Result<()> {
    WriterOptions::new(path)
        .reference_header(header)
        .write_nifti(data)?;
    Ok(())
}

/// The highest region index present in a labeled volume.
///
/// # Panics
///
/// If the volume holds no voxels.
pub fn max_label(data: &ArrayD<f32>) -> u32 {
    *data.max_skipnan() as u32
}

/// Keep only the labels within `lo..=hi`; all other voxels become background.
pub fn keep_label_range(data: &ArrayD<f32>, lo: u32, hi: u32) -> ArrayD<f32> {
    let lo = lo as f32;
    let hi = hi as f32;
    data.mapv(|v| if v >= lo && v <= hi { v } else { 0.0 })
}

/// Keep only the labels listed in `labels`, e.g. the indices of a region
/// lookup table; all other voxels become background.
pub fn keep_labels_in(data: &ArrayD<f32>, labels: &[u32]) -> ArrayD<f32> {
    data.mapv(|v| {
        if labels.iter().any(|&l| l as f32 == v) {
            v
        } else {
            0.0
        }
    })
}

/// Keep only even labels. Atlases such as AICHA and Brainnetome interleave the
/// hemispheres, with even indices on the right, so this acts as a hemisphere filter.
pub fn keep_even_labels(data: &ArrayD<f32>) -> ArrayD<f32> {
    data.mapv(|v| if (v as i64) % 2 == 0 { v } else { 0.0 })
}
