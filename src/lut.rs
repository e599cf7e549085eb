//! Functions for reading region lookup tables.
//!
//! A lookup table is a headerless two-column CSV mapping a segmentation index
//! to an anatomical region name, e.g. `10,Left-Thalamus`. It lists the subset
//! of labels of a whole-brain segmentation that belongs to the subcortex.

use csv::ReaderBuilder;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionLut {
    pub index: Vec<u32>,
    pub name: Vec<String>,
}

impl RegionLut {
    /// The segmentation indices listed in the table, in file order.
    pub fn indices(&self) -> &[u32] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Read a region lookup table from a headerless CSV file.
/// Rows whose first column is not an integer are skipped, which tolerates an
/// optional header row.
pub fn read_lut<P: AsRef<Path>>(path: P) -> Result<RegionLut> {
    let file = BufReader::new(File::open(path)?);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(file);

    let mut index: Vec<u32> = Vec::new();
    let mut name: Vec<String> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let idx: u32 = match record.get(0).and_then(|s| s.parse().ok()) {
            Some(idx) => idx,
            None => continue,
        };
        index.push(idx);
        name.push(record.get(1).unwrap_or("").to_string());
    }

    Ok(RegionLut { index, name })
}
