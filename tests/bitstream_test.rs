use gunzip::decompress::bitstream::BitReader;
use gunzip::Error;

const DATA: [u8; 2] = [0x5A, 0xA5]; // 01011010 10100101

#[test]
fn test_sixteen_bits_at_once() {
    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.potentially_available(), 16);
    assert_eq!(bits.get_bits(16).unwrap(), 0xA55A);
    assert_eq!(bits.available(), 0);
}

#[test]
fn test_byte_at_a_time() {
    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.get_bits(8).unwrap(), 0x5A);
    assert_eq!(bits.potentially_available(), 8);
    assert_eq!(bits.get_bits(8).unwrap(), 0xA5);
}

#[test]
fn test_nibbles() {
    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.get_bits(4).unwrap(), 0xA);
    assert_eq!(bits.potentially_available(), 12);
    assert_eq!(bits.get_bits(4).unwrap(), 0x5);
}

#[test]
fn test_bit_pairs() {
    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.get_bits(2).unwrap(), 2);
    assert_eq!(bits.get_bits(2).unwrap(), 2);
    assert_eq!(bits.get_bits(2).unwrap(), 1);
    assert_eq!(bits.get_bits(2).unwrap(), 1);
}

#[test]
fn test_single_bits() {
    let mut bits = BitReader::new(&DATA);
    for expected in [0, 1, 0, 1, 1, 0, 1, 0] {
        assert_eq!(bits.get_bit().unwrap(), expected);
    }
}

#[test]
fn test_ensure_buffers_across_bytes() {
    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.get_bits(3).unwrap(), 0b010);
    assert_eq!(bits.potentially_available(), 13);
    bits.ensure(13).unwrap();
    assert!(bits.available() >= 13);
    assert_eq!(bits.get_bits(13).unwrap(), 0xA55A >> 3);
}

#[test]
fn test_any_width_crosses_byte_boundaries() {
    // Reading n bits must equal the low n bits of the LSB-first
    // concatenation of the input bytes, for every n.
    let data = [0x5A, 0xA5, 0x3C];
    let concatenated: u32 = 0x3CA55A;
    for n in 1..=23u32 {
        let mut bits = BitReader::new(&data);
        assert_eq!(bits.get_bits(n).unwrap(), concatenated & ((1 << n) - 1));
        // The remainder picks up exactly where the first read ended.
        assert_eq!(bits.get_bits(24 - n).unwrap(), concatenated >> n);
    }
}

#[test]
fn test_reads_past_the_end_fail() {
    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.get_bits(16).unwrap(), 0xA55A);
    assert_eq!(bits.get_bit(), Err(Error::InvalidStream));

    let mut bits = BitReader::new(&DATA);
    assert_eq!(bits.get_bits(17), Err(Error::InvalidStream));
}
