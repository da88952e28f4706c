use crate::decompress::bitstream::BitReader;
use crate::decompress::inflate;
use crate::gzip;
use std::io;

/// Safety-checked entry point. The core imposes no output ceiling of its own,
/// so this wrapper carries the caps that keep a hostile stream from expanding
/// without bound.
pub struct Decompressor {
    max_output_size: usize,
    limit_ratio: usize,
}

impl Decompressor {
    pub fn new() -> Self {
        Self {
            max_output_size: usize::MAX,
            limit_ratio: 2000,
        }
    }

    pub fn set_max_output_size(&mut self, limit: usize) {
        self.max_output_size = limit;
    }

    /// Bounds the claimed expansion ratio checked against a gzip member's
    /// ISIZE field before any decoding happens. The format tops out near
    /// 1032:1, so the default of 2000:1 only rejects forged trailers.
    pub fn set_limit_ratio(&mut self, ratio: usize) {
        self.limit_ratio = ratio;
    }

    pub fn decompress_deflate(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut bits = BitReader::new(data);
        let output = inflate(&mut bits).map_err(invalid_data)?;
        self.check_output_size(output)
    }

    pub fn decompress_gzip(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let claimed = gzip::peek_isize(data).map_err(invalid_data)? as usize;
        let limit = data
            .len()
            .saturating_mul(self.limit_ratio)
            .saturating_add(4096);
        if claimed > limit {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "claimed size {} exceeds safety limit for input size {}",
                    claimed,
                    data.len()
                ),
            ));
        }
        if claimed > self.max_output_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "claimed size {} exceeds maximum output size {}",
                    claimed, self.max_output_size
                ),
            ));
        }

        let output = gzip::decompress_gzip(data).map_err(invalid_data)?;
        self.check_output_size(output)
    }

    fn check_output_size(&self, output: Vec<u8>) -> io::Result<Vec<u8>> {
        if output.len() > self.max_output_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "output size {} exceeds maximum output size {}",
                    output.len(),
                    self.max_output_size
                ),
            ));
        }
        Ok(output)
    }
}

fn invalid_data(err: crate::decompress::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
