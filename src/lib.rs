pub mod api;
pub mod batch;
pub mod common;
pub mod crc32;
pub mod crc32_tables;
pub mod decompress;
pub mod gzip;

pub use api::Decompressor;
pub use crc32::update_crc32;
pub use decompress::{inflate, Error};
pub use gzip::decompress_gzip;
