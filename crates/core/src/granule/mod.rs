//! Remote granule metadata reading.
//!
//! Each velocity granule embeds its geographic centerpoint in the file
//! header. The [`CenterPointReader`] trait exposes just the two scalar
//! fields the transfer pipeline needs; the production backend fetches the
//! head of the file over HTTP and walks the netCDF header without touching
//! variable data.

mod netcdf;
mod reader;
mod types;

pub use netcdf::extract_center_point;
pub use reader::{HttpGranuleReader, DEFAULT_HEADER_READ_BYTES};
pub use types::{CenterPoint, CenterPointReader, GranuleError};
