use gunzip::Decompressor;
use libdeflater::{CompressionLvl, Compressor};

fn gzip_compress(data: &[u8]) -> Vec<u8> {
    let mut compressor = Compressor::new(CompressionLvl::new(6).unwrap());
    let mut out = vec![0u8; compressor.gzip_compress_bound(data.len())];
    let size = compressor.gzip_compress(data, &mut out).unwrap();
    out.truncate(size);
    out
}

#[test]
fn test_output_cap_rejects_before_decoding() {
    let data = vec![0u8; 100_000];
    let member = gzip_compress(&data);

    let mut decompressor = Decompressor::new();
    decompressor.set_max_output_size(1000);
    let err = decompressor.decompress_gzip(&member).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);

    // The same member is fine without the cap.
    let decompressor = Decompressor::new();
    assert_eq!(decompressor.decompress_gzip(&member).unwrap(), data);
}

#[test]
fn test_forged_isize_is_rejected_by_ratio_guard() {
    let mut member = gzip_compress(b"small");
    let len = member.len();
    member[len - 4..].copy_from_slice(&u32::MAX.to_le_bytes());

    let decompressor = Decompressor::new();
    let err = decompressor.decompress_gzip(&member).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn test_deflate_output_cap() {
    let data = vec![0u8; 100_000];
    let mut compressor = Compressor::new(CompressionLvl::new(6).unwrap());
    let mut compressed = vec![0u8; compressor.deflate_compress_bound(data.len())];
    let size = compressor.deflate_compress(&data, &mut compressed).unwrap();
    compressed.truncate(size);

    let mut decompressor = Decompressor::new();
    decompressor.set_max_output_size(1000);
    let err = decompressor.decompress_deflate(&compressed).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn test_corrupt_payload_is_invalid_data() {
    let mut member = gzip_compress(b"payload corruption should surface as InvalidData");
    member[12] ^= 0x55;

    let decompressor = Decompressor::new();
    let err = decompressor.decompress_gzip(&member).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
