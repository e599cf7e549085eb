//! Region color tables for combined atlas meshes.
//!
//! A color table is a plain text file with one line per region holding three
//! whitespace-separated integers (R G B). The 1-based line number is the
//! region index. Lines that do not hold exactly three integers are skipped,
//! but still count towards the line numbering, so a malformed line leaves a
//! hole at its index.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{AtlasMeshError, Result};

/// Maps 1-based region indices to RGBA display colors (alpha fixed at 255).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: BTreeMap<u32, [u8; 4]>,
}

impl ColorTable {
    /// Read a color table from a line-oriented 'R G B' text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ColorTable> {
        let file = BufReader::new(File::open(path)?);

        let mut entries: BTreeMap<u32, [u8; 4]> = BTreeMap::new();
        for (line_idx, line) in file.lines().enumerate() {
            let line = line?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 3 {
                continue;
            }
            let rgb: Vec<u8> = parts.iter().filter_map(|p| p.parse::<u8>().ok()).collect();
            if rgb.len() != 3 {
                continue;
            }
            entries.insert(line_idx as u32 + 1, [rgb[0], rgb[1], rgb[2], 255]);
        }

        Ok(ColorTable { entries })
    }

    /// Get the RGBA color for a region index, if one is defined.
    pub fn get(&self, index: u32) -> Option<[u8; 4]> {
        self.entries.get(&index).copied()
    }

    /// The number of defined colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// RGB anchor points of the supported color ramps, evenly spaced over 0..1.
/// Piecewise-linear approximations of the matplotlib colormaps of the same name.
const PLASMA_ANCHORS: [[u8; 3]; 5] = [
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];

const VIRIDIS_ANCHORS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// Sample evenly spaced colors from a named color ramp.
///
/// Supported names are "plasma" and "viridis". The first sample sits at the
/// start of the ramp and the last at the end, matching how a region count is
/// spread over a perceptually uniform colormap.
pub fn sample_colormap(name: &str, num_colors: u32) -> Result<Vec<[u8; 3]>> {
    let anchors: &[[u8; 3]] = match name {
        "plasma" => &PLASMA_ANCHORS,
        "viridis" => &VIRIDIS_ANCHORS,
        _ => return Err(AtlasMeshError::UnknownColormap(name.to_string())),
    };

    let mut colors: Vec<[u8; 3]> = Vec::with_capacity(num_colors as usize);
    for i in 0..num_colors {
        let t = if num_colors > 1 {
            i as f32 / (num_colors - 1) as f32
        } else {
            0.0
        };
        colors.push(ramp_at(anchors, t));
    }
    Ok(colors)
}

/// Linearly interpolate the ramp at position `t` in 0..1.
fn ramp_at(anchors: &[[u8; 3]], t: f32) -> [u8; 3] {
    let span = (anchors.len() - 1) as f32;
    let pos = t.max(0.0).min(1.0) * span;
    let lo = pos.floor() as usize;
    let hi = if lo + 1 < anchors.len() { lo + 1 } else { lo };
    let frac = pos - lo as f32;

    let mut rgb = [0u8; 3];
    for c in 0..3 {
        let v = anchors[lo][c] as f32 + (anchors[hi][c] as f32 - anchors[lo][c] as f32) * frac;
        rgb[c] = v.round() as u8;
    }
    rgb
}

/// Write colors as an 'R G B' text file, one region per line.
pub fn write_color_file<P: AsRef<Path>>(path: P, colors: &[[u8; 3]]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for rgb in colors {
        writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn a_color_file_is_read_with_line_numbers_as_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "255 0 0").unwrap();
        writeln!(file, "# a comment, skipped but counted").unwrap();
        writeln!(file, "0 0 255").unwrap();
        drop(file);

        let table = ColorTable::from_file(&path).unwrap();
        assert_eq!(2, table.len());
        assert_eq!(Some([255, 0, 0, 255]), table.get(1));
        assert_eq!(None, table.get(2));
        assert_eq!(Some([0, 0, 255, 255]), table.get(3));
    }

    #[test]
    fn sampled_ramps_hit_the_anchor_endpoints() {
        let colors = sample_colormap("plasma", 8).unwrap();
        assert_eq!(8, colors.len());
        assert_eq!([13, 8, 135], colors[0]);
        assert_eq!([240, 249, 33], colors[7]);

        let colors = sample_colormap("viridis", 2).unwrap();
        assert_eq!([68, 1, 84], colors[0]);
        assert_eq!([253, 231, 37], colors[1]);
    }

    #[test]
    fn a_single_sample_sits_at_the_ramp_start() {
        let colors = sample_colormap("viridis", 1).unwrap();
        assert_eq!(vec![[68, 1, 84]], colors);
    }

    #[test]
    fn an_unknown_colormap_name_is_rejected() {
        assert!(sample_colormap("magma", 4).is_err());
    }

    #[test]
    fn written_color_files_round_trip_through_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.txt");

        let colors = sample_colormap("plasma", 5).unwrap();
        write_color_file(&path, &colors).unwrap();

        let table = ColorTable::from_file(&path).unwrap();
        assert_eq!(5, table.len());
        assert_eq!(Some([13, 8, 135, 255]), table.get(1));
    }
}
