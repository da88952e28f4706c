pub mod bitstream;
pub mod huffman;
pub mod outbuf;
mod tables;

use std::fmt;

use crate::common::*;
use self::bitstream::BitReader;
use self::huffman::{codes_from_lengths, fixed_decoders, HuffmanDecoder};
use self::outbuf::OutputBuffer;
use self::tables::*;

pub use self::tables::{LITLEN_TABLEBITS, OFFSET_TABLEBITS, PRECODE_TABLEBITS};

/// The single failure mode of the decoder. Any malformed header, truncated
/// input, undefined Huffman path or out-of-range back-reference aborts the
/// whole decode; no partial output is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidStream,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidStream => f.write_str("invalid stream"),
        }
    }
}

impl std::error::Error for Error {}

/// Decompresses one complete DEFLATE stream starting at the reader's current
/// position and returns the materialized output.
pub fn inflate(bits: &mut BitReader<'_>) -> Result<Vec<u8>, Error> {
    let mut inflater = Inflater {
        bits,
        out: OutputBuffer::new(),
    };
    inflater.run()?;
    Ok(inflater.out.into_bytes())
}

struct Inflater<'a, 'b> {
    bits: &'b mut BitReader<'a>,
    out: OutputBuffer,
}

impl Inflater<'_, '_> {
    fn run(&mut self) -> Result<(), Error> {
        loop {
            let is_final = self.bits.get_bit()? != 0;
            match self.bits.get_bits(2)? {
                DEFLATE_BLOCKTYPE_UNCOMPRESSED => self.uncompressed_block()?,
                DEFLATE_BLOCKTYPE_STATIC_HUFFMAN => {
                    let (litlen, offset) = fixed_decoders();
                    self.huffman_block(litlen, offset)?;
                }
                DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => {
                    let (litlen, offset) = self.read_dynamic_header()?;
                    self.huffman_block(&litlen, &offset)?;
                }
                _ => return Err(Error::InvalidStream),
            }
            if is_final {
                return Ok(());
            }
        }
    }

    fn uncompressed_block(&mut self) -> Result<(), Error> {
        self.bits.discard_partial_byte();
        let len = self.bits.get_bits(16)? as u16;
        let nlen = self.bits.get_bits(16)? as u16;
        if nlen != !len {
            return Err(Error::InvalidStream);
        }
        let raw = self.bits.take_slice(usize::from(len))?;
        self.out.put_slice(raw);
        Ok(())
    }

    fn read_dynamic_header(&mut self) -> Result<(HuffmanDecoder, HuffmanDecoder), Error> {
        let num_litlen_syms = 257 + self.bits.get_bits(5)? as usize;
        let num_offset_syms = 1 + self.bits.get_bits(5)? as usize;
        let num_precode_syms = 4 + self.bits.get_bits(4)? as usize;

        let mut precode_lens = [0u8; DEFLATE_NUM_PRECODE_SYMS];
        for i in 0..num_precode_syms {
            precode_lens[PRECODE_LENS_PERMUTATION[i]] = self.bits.get_bits(3)? as u8;
        }
        let precode =
            HuffmanDecoder::from_codes(&codes_from_lengths(&precode_lens), PRECODE_TABLEBITS)?;

        let total_syms = num_litlen_syms + num_offset_syms;
        let mut lens = [0u8; DEFLATE_NUM_LITLEN_SYMS + DEFLATE_NUM_OFFSET_SYMS];
        let mut i = 0;
        while i < total_syms {
            match precode.decode(self.bits)? {
                presym @ 0..=15 => {
                    lens[i] = presym as u8;
                    i += 1;
                }
                16 => {
                    if i == 0 {
                        return Err(Error::InvalidStream);
                    }
                    let count = 3 + self.bits.get_bits(2)? as usize;
                    if count > total_syms - i {
                        return Err(Error::InvalidStream);
                    }
                    let previous = lens[i - 1];
                    for _ in 0..count {
                        lens[i] = previous;
                        i += 1;
                    }
                }
                17 => {
                    let count = 3 + self.bits.get_bits(3)? as usize;
                    if count > total_syms - i {
                        return Err(Error::InvalidStream);
                    }
                    i += count;
                }
                18 => {
                    let count = 11 + self.bits.get_bits(7)? as usize;
                    if count > total_syms - i {
                        return Err(Error::InvalidStream);
                    }
                    i += count;
                }
                _ => return Err(Error::InvalidStream),
            }
        }

        let litlen = HuffmanDecoder::from_codes(
            &codes_from_lengths(&lens[..num_litlen_syms]),
            LITLEN_TABLEBITS,
        )?;
        let offset = HuffmanDecoder::from_codes(
            &codes_from_lengths(&lens[num_litlen_syms..total_syms]),
            OFFSET_TABLEBITS,
        )?;
        Ok((litlen, offset))
    }

    fn huffman_block(
        &mut self,
        litlen: &HuffmanDecoder,
        offset: &HuffmanDecoder,
    ) -> Result<(), Error> {
        loop {
            self.out.reserve_for_match();
            let sym = litlen.decode(self.bits)?;
            if sym < DEFLATE_END_OF_BLOCK {
                self.out.put(sym as u8);
                continue;
            }
            if sym == DEFLATE_END_OF_BLOCK {
                return Ok(());
            }
            if sym > DEFLATE_LAST_LEN_SYM {
                return Err(Error::InvalidStream);
            }

            let len_idx = usize::from(sym - DEFLATE_FIRST_LEN_SYM);
            let mut length = usize::from(LENGTH_BASE[len_idx]);
            let extra = LENGTH_EXTRA_BITS[len_idx];
            if extra > 0 {
                length += self.bits.get_bits(u32::from(extra))? as usize;
            }

            let offset_sym = usize::from(offset.decode(self.bits)?);
            if offset_sym >= OFFSET_BASE.len() {
                return Err(Error::InvalidStream);
            }
            let mut match_offset = usize::from(OFFSET_BASE[offset_sym]);
            let extra = OFFSET_EXTRA_BITS[offset_sym];
            if extra > 0 {
                match_offset += self.bits.get_bits(u32::from(extra))? as usize;
            }

            if match_offset > self.out.len() {
                return Err(Error::InvalidStream);
            }
            self.out.copy_match(match_offset, length);
        }
    }
}
