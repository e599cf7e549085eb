//! Functions for reading and writing triangular meshes in binary MZ3 files.
//!
//! MZ3 is the mesh container written by Surfice and niimath: a fixed 16-byte
//! little-endian header followed by payload sections for faces, vertices,
//! per-vertex RGBA colors and per-vertex scalars, each present only if its bit
//! is set in the header's attribute mask. A file may be gzip-compressed as a
//! whole, which is detected from the file content rather than the name.

use byteordered::ByteOrdered;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{AtlasMeshError, Result};
use crate::util::has_gzip_magic;

/// The MZ3 magic number, the little-endian u16 reading of the bytes 'MZ'.
pub const MZ3_MAGIC: u16 = 23117;

/// Attribute bit: the face section is present.
pub const MZ3_ATTR_FACES: u16 = 1;
/// Attribute bit: the vertex section is present.
pub const MZ3_ATTR_VERTICES: u16 = 2;
/// Attribute bit: a per-vertex RGBA color section is present.
pub const MZ3_ATTR_COLORS: u16 = 4;
/// Attribute bit: a per-vertex scalar section is present.
pub const MZ3_ATTR_SCALARS: u16 = 8;

/// Models the fixed-size header of an MZ3 file.
#[derive(Debug, Clone, PartialEq)]
pub struct Mz3Header {
    pub magic: u16,
    pub attr: u16,
    pub num_faces: u32,
    pub num_vertices: u32,
    /// Length in bytes of a header extension to skip unread before the payload.
    pub num_skip: u32,
}

impl Default for Mz3Header {
    fn default() -> Mz3Header {
        Mz3Header {
            magic: MZ3_MAGIC,
            attr: 0,
            num_faces: 0,
            num_vertices: 0,
            num_skip: 0,
        }
    }
}

impl Mz3Header {
    /// Read an MZ3 header from the given byte stream.
    /// It is assumed that the input is currently at the start of the header,
    /// after any gzip decompression.
    pub fn from_reader<S>(input: &mut S) -> Result<Mz3Header>
    where
        S: Read,
    {
        let mut input = ByteOrdered::le(input);

        let mut hdr = Mz3Header::default();
        hdr.magic = input.read_u16()?;
        hdr.attr = input.read_u16()?;
        hdr.num_faces = input.read_u32()?;
        hdr.num_vertices = input.read_u32()?;
        hdr.num_skip = input.read_u32()?;

        if hdr.magic != MZ3_MAGIC {
            Err(AtlasMeshError::InvalidMz3Format)
        } else {
            Ok(hdr)
        }
    }

    pub fn has_faces(&self) -> bool {
        self.attr & MZ3_ATTR_FACES != 0
    }

    pub fn has_vertices(&self) -> bool {
        self.attr & MZ3_ATTR_VERTICES != 0
    }

    pub fn has_colors(&self) -> bool {
        self.attr & MZ3_ATTR_COLORS != 0
    }

    pub fn has_scalars(&self) -> bool {
        self.attr & MZ3_ATTR_SCALARS != 0
    }
}

/// A triangular mesh decoded from an MZ3 file.
///
/// The `faces` vector stores 3 vertex indices per triangle, the `vertices`
/// vector 3 coordinates per vertex, both flat. Color and scalar sections of the
/// input are parsed past but not kept: single-region meshes as produced by
/// niimath never carry them, and a combined atlas mesh is a terminal artifact
/// that is not read back by this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Mz3Mesh {
    pub header: Mz3Header,
    pub faces: Vec<i32>,
    pub vertices: Vec<f32>,
}

/// Read a triangular mesh from an MZ3 file, decompressing transparently if needed.
pub fn read_mz3<P: AsRef<Path> + Copy>(path: P) -> Result<Mz3Mesh> {
    Mz3Mesh::from_file(path)
}

impl Mz3Mesh {
    /// Read an Mz3Mesh instance from a file.
    /// If the file starts with the gzip magic bytes, the whole content is
    /// decompressed before parsing. Otherwise the raw bytes are parsed directly.
    pub fn from_file<P: AsRef<Path> + Copy>(path: P) -> Result<Mz3Mesh> {
        let gz = has_gzip_magic(path)?;
        let file = BufReader::new(File::open(path)?);
        if gz {
            Mz3Mesh::from_reader(GzDecoder::new(file))
        } else {
            Mz3Mesh::from_reader(file)
        }
    }

    /// Read an Mz3Mesh from the given byte stream, starting at the header.
    pub fn from_reader<S>(mut input: S) -> Result<Mz3Mesh>
    where
        S: Read,
    {
        let hdr = Mz3Header::from_reader(&mut input)?;

        let mut input = ByteOrdered::le(input);

        // The header extension is read byte-wise because a gzip stream cannot seek.
        for _ in 0..hdr.num_skip {
            input.read_u8()?;
        }

        let mut faces: Vec<i32> = Vec::with_capacity(hdr.num_faces as usize * 3);
        if hdr.has_faces() {
            for _ in 0..hdr.num_faces as usize * 3 {
                faces.push(input.read_i32()?);
            }
        }

        let mut vertices: Vec<f32> = Vec::with_capacity(hdr.num_vertices as usize * 3);
        if hdr.has_vertices() {
            for _ in 0..hdr.num_vertices as usize * 3 {
                vertices.push(input.read_f32()?);
            }
        }

        // Color and scalar sections are consumed but discarded, see the struct docs.
        if hdr.has_colors() {
            for _ in 0..hdr.num_vertices {
                let _ = input.read_u32()?;
            }
        }
        if hdr.has_scalars() {
            for _ in 0..hdr.num_vertices {
                let _ = input.read_f32()?;
            }
        }

        Ok(Mz3Mesh {
            header: hdr,
            faces,
            vertices,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len() / 3
    }
}

/// Write a colored mesh to a gzip-compressed MZ3 file.
///
/// All four attribute bits are always set on write, so `rgba` must hold 4
/// values per vertex and `scalars` one value per vertex. The header extension
/// length is always written as zero, and the output is always compressed,
/// regardless of how the input meshes were stored.
pub fn write_mz3<P: AsRef<Path>>(
    path: P,
    faces: &[i32],
    vertices: &[f32],
    rgba: &[u8],
    scalars: &[f32],
) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let gz = GzEncoder::new(file, Compression::default());
    let mut out = ByteOrdered::le(gz);

    let attr = MZ3_ATTR_FACES | MZ3_ATTR_VERTICES | MZ3_ATTR_COLORS | MZ3_ATTR_SCALARS;
    out.write_u16(MZ3_MAGIC)?;
    out.write_u16(attr)?;
    out.write_u32((faces.len() / 3) as u32)?;
    out.write_u32((vertices.len() / 3) as u32)?;
    out.write_u32(0)?; // no header extension on write

    for v in faces {
        out.write_i32(*v)?;
    }
    for v in vertices {
        out.write_f32(*v)?;
    }
    for v in rgba {
        out.write_u8(*v)?;
    }
    for v in scalars {
        out.write_f32(*v)?;
    }

    let mut file = out.into_inner().finish()?;
    file.flush()?;
    Ok(())
}
