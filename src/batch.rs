use crate::decompress::bitstream::BitReader;
use crate::decompress::inflate;
use crate::gzip::decompress_gzip;
use rayon::prelude::*;

/// Decompresses independent members in parallel. Each input is a complete
/// stream of its own; failed members come back as `None`.
pub struct BatchDecompressor;

impl BatchDecompressor {
    pub fn new() -> Self {
        Self
    }

    pub fn decompress_deflate_batch(&self, inputs: &[&[u8]]) -> Vec<Option<Vec<u8>>> {
        inputs
            .par_iter()
            .map(|&input| {
                let mut bits = BitReader::new(input);
                inflate(&mut bits).ok()
            })
            .collect()
    }

    pub fn decompress_gzip_batch(&self, inputs: &[&[u8]]) -> Vec<Option<Vec<u8>>> {
        inputs
            .par_iter()
            .map(|&input| decompress_gzip(input).ok())
            .collect()
    }
}
