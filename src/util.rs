//! Utility functions used in all other atlasmesh modules.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The two-byte magic marker at the start of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check whether the file starts with the gzip magic bytes.
///
/// MZ3 files may be gzip-compressed as a whole, and their name carries no hint
/// of it, so compression is detected by sniffing the first two bytes.
pub fn has_gzip_magic<P>(path: P) -> Result<bool>
where
    P: AsRef<Path>,
{
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let num_read = file.read(&mut magic)?;
    Ok(num_read == 2 && magic == GZIP_MAGIC)
}

/// Strip the volume extensions from a file name: "atlas.nii.gz", "atlas.nii"
/// and "atlas.mgz" all yield "atlas".
pub fn volume_stem<P>(path: P) -> String
where
    P: AsRef<Path>,
{
    let name = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut stem = name.as_str();
    if let Some(s) = stem.strip_suffix(".gz") {
        stem = s;
    }
    for ext in &[".nii", ".mgz", ".mgh"] {
        if let Some(s) = stem.strip_suffix(ext) {
            stem = s;
            break;
        }
    }
    stem.to_string()
}

/// Search the directories in the PATH environment variable for an executable.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
