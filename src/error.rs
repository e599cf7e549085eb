//! Error handling for the atlasmesh crate.

use nifti::NiftiError;
use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum AtlasMeshError {
        /// Invalid MZ3 file: wrong magic number.
        InvalidMz3Format {
            display("Invalid MZ3 file")
        }

        /// The input directory holds no mesh files following the '<prefix>_<index>.mz3' naming contract.
        NoMeshInputs {
            display("No valid *_n.mz3 files found")
        }

        /// The discovered mesh files carry more than one filename prefix.
        AmbiguousMeshPrefix(prefixes: String) {
            display("Multiple filename prefixes found: {}. All files must share a common prefix like 'Tian_1.mz3', 'Tian_2.mz3'", prefixes)
        }

        /// A region index has no entry in the color table.
        MissingColor(index: u32) {
            display("No color defined for region index {}", index)
        }

        /// The highest region index exceeds the number of colors defined in the color table.
        ColorTableTooSmall(num_defined: usize, max_index: u32) {
            display("The color table defines {} colors, but a mesh with index {} was found. Please add more colors", num_defined, max_index)
        }

        /// Unrecognized colormap name.
        UnknownColormap(name: String) {
            display("Unknown colormap '{}'", name)
        }

        /// The external surface-extraction tool is not installed.
        MeshToolNotFound {
            display("'niimath' not found in PATH. Please install it or add it to your PATH")
        }

        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
        }

        /// Error raised by the NIfTI volume backend.
        Nifti(err: NiftiError) {
            from()
            source(err)
        }

        /// Error raised while parsing a CSV lookup table.
        Csv(err: csv::Error) {
            from()
            source(err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, AtlasMeshError>;
