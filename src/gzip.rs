use crate::common::*;
use crate::crc32::update_crc32;
use crate::decompress::bitstream::BitReader;
use crate::decompress::{inflate, Error};

/// Decompresses a single gzip member and verifies the trailer checksum and
/// length against the decoded output.
pub fn decompress_gzip(input: &[u8]) -> Result<Vec<u8>, Error> {
    if input.len() < GZIP_MIN_OVERHEAD {
        return Err(Error::InvalidStream);
    }
    if input[0] != GZIP_ID1 || input[1] != GZIP_ID2 || input[2] != GZIP_CM_DEFLATE {
        return Err(Error::InvalidStream);
    }

    let flg = input[3];
    if flg & GZIP_FRESERVED != 0 {
        return Err(Error::InvalidStream);
    }
    // MTIME, XFL and OS carry nothing the decoder needs.
    let mut idx = GZIP_MIN_HEADER_SIZE;

    if flg & GZIP_FEXTRA != 0 {
        if idx + 2 > input.len() {
            return Err(Error::InvalidStream);
        }
        let xlen = usize::from(u16::from_le_bytes([input[idx], input[idx + 1]]));
        idx += 2 + xlen;
    }

    if flg & GZIP_FNAME != 0 {
        idx = skip_nul_terminated(input, idx)?;
    }

    if flg & GZIP_FCOMMENT != 0 {
        idx = skip_nul_terminated(input, idx)?;
    }

    if flg & GZIP_FHCRC != 0 {
        idx += 2;
    }

    if idx + GZIP_FOOTER_SIZE > input.len() {
        return Err(Error::InvalidStream);
    }
    let payload = &input[idx..input.len() - GZIP_FOOTER_SIZE];
    let trailer = &input[input.len() - GZIP_FOOTER_SIZE..];

    let mut bits = BitReader::new(payload);
    let output = inflate(&mut bits)?;

    let expected_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    if update_crc32(0, &output) != expected_crc {
        return Err(Error::InvalidStream);
    }

    let expected_isize = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);
    if output.len() as u32 != expected_isize {
        return Err(Error::InvalidStream);
    }

    Ok(output)
}

/// Reads the trailer's ISIZE field (uncompressed length modulo 2^32) without
/// decoding, for callers that want to size-check up front.
pub fn peek_isize(input: &[u8]) -> Result<u32, Error> {
    if input.len() < GZIP_MIN_OVERHEAD {
        return Err(Error::InvalidStream);
    }
    let trailer = &input[input.len() - 4..];
    Ok(u32::from_le_bytes([
        trailer[0], trailer[1], trailer[2], trailer[3],
    ]))
}

fn skip_nul_terminated(input: &[u8], mut idx: usize) -> Result<usize, Error> {
    while idx < input.len() && input[idx] != 0 {
        idx += 1;
    }
    if idx >= input.len() {
        return Err(Error::InvalidStream);
    }
    Ok(idx + 1)
}
