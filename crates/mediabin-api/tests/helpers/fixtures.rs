//! Media file fixtures with real signatures.

use sha2::{Digest, Sha256};

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

pub fn mp3_bytes() -> Vec<u8> {
    let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
    bytes.extend_from_slice(&[0u8; 256]);
    bytes
}

pub fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    bytes.extend_from_slice(b"JFIF\0");
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 32]);
    bytes
}

pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.7\n%binary\n1 0 obj\n<<>>\nendobj\n".to_vec()
}

/// A genuine MP4 whose leading box makes shallow signature detection report
/// the QuickTime family; the structural pass resolves it to video/mp4.
pub fn mp4_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&8u32.to_be_bytes());
    bytes.extend_from_slice(b"free");
    bytes.extend_from_slice(&20u32.to_be_bytes());
    bytes.extend_from_slice(b"ftyp");
    bytes.extend_from_slice(b"isom");
    bytes.extend_from_slice(&[0, 0, 2, 0]);
    bytes.extend_from_slice(b"mp42");
    bytes.extend_from_slice(&16u32.to_be_bytes());
    bytes.extend_from_slice(b"mdat");
    bytes.extend_from_slice(&[0u8; 8]);
    bytes
}

/// A QuickTime movie proper, which the ingestion pipeline rejects.
pub fn quicktime_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&20u32.to_be_bytes());
    bytes.extend_from_slice(b"ftyp");
    bytes.extend_from_slice(b"qt  ");
    bytes.extend_from_slice(&[0, 0, 2, 0]);
    bytes.extend_from_slice(b"qt  ");
    bytes.extend_from_slice(&16u32.to_be_bytes());
    bytes.extend_from_slice(b"mdat");
    bytes.extend_from_slice(&[0u8; 8]);
    bytes
}

pub fn text_bytes() -> Vec<u8> {
    b"meeting notes\nline two\n".to_vec()
}
