//! Content hashing and EXIF capture metadata.

mod exif;
mod hash;

pub use self::exif::{read_exif, to_decimal_degrees};
pub use self::hash::sha256_file;
