//! ISO base media file format (ISO-BMFF) container inspection.
//!
//! QuickTime and MP4 share the same box structure, so shallow signature
//! detection frequently reports `video/quicktime` for genuine MP4 files.
//! This module walks the top-level boxes of the container and reads the
//! `ftyp` brands, which is sufficient to tell the two apart: MP4-family
//! brands (`isom`, `mp42`, `avc1`, ...) mean MP4, the `qt  ` brand (or the
//! absence of a `ftyp` box, legal in old QuickTime files) means QuickTime.

use crate::DetectError;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

pub const MP4: &str = "video/mp4";
pub const QUICKTIME: &str = "video/quicktime";

const QUICKTIME_BRAND: &[u8; 4] = b"qt  ";

/// Largest `ftyp` payload we are willing to read. Real files carry a handful
/// of compatible brands; anything bigger is malformed.
const MAX_FTYP_PAYLOAD: u64 = 4096;

fn is_mp4_brand(brand: &[u8]) -> bool {
    matches!(
        brand,
        b"isom"
            | b"iso2"
            | b"iso3"
            | b"iso4"
            | b"iso5"
            | b"iso6"
            | b"mp41"
            | b"mp42"
            | b"mp4v"
            | b"mmp4"
            | b"avc1"
            | b"dash"
            | b"M4V "
            | b"M4A "
            | b"M4P "
            | b"F4V "
            | b"F4P "
            | b"NDAS"
    )
}

/// Structurally parse a QuickTime-family container and decide whether it is
/// a true MP4 or QuickTime proper.
///
/// Re-opens the file independently of any earlier detection pass. Malformed
/// box structure surfaces as [`DetectError::Parse`]; it never silently falls
/// back to the shallow answer.
pub fn resolve_quicktime_container(path: &Path) -> Result<&'static str, DetectError> {
    let file = File::open(path).map_err(|e| DetectError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| DetectError::io(path, e))?
        .len();
    let mut reader = BufReader::new(file);

    let mut offset: u64 = 0;
    while offset < len {
        if len - offset < 8 {
            return Err(DetectError::Parse(format!(
                "truncated box header at offset {}",
                offset
            )));
        }

        let mut header = [0u8; 8];
        reader
            .read_exact(&mut header)
            .map_err(|e| DetectError::io(path, e))?;
        let size32 = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let box_type: [u8; 4] = [header[4], header[5], header[6], header[7]];

        let (header_len, box_size) = match size32 {
            // size 0: box extends to end of file
            0 => (8u64, len - offset),
            // size 1: 64-bit largesize follows the type
            1 => {
                if len - offset < 16 {
                    return Err(DetectError::Parse(format!(
                        "truncated 64-bit box size at offset {}",
                        offset
                    )));
                }
                let mut large = [0u8; 8];
                reader
                    .read_exact(&mut large)
                    .map_err(|e| DetectError::io(path, e))?;
                let largesize = u64::from_be_bytes(large);
                if largesize < 16 {
                    return Err(DetectError::Parse(format!(
                        "invalid 64-bit box size {} at offset {}",
                        largesize, offset
                    )));
                }
                (16u64, largesize)
            }
            s if s < 8 => {
                return Err(DetectError::Parse(format!(
                    "invalid box size {} at offset {}",
                    s, offset
                )));
            }
            s => (8u64, s as u64),
        };

        if box_size > len - offset {
            return Err(DetectError::Parse(format!(
                "box '{}' extends past end of file",
                String::from_utf8_lossy(&box_type)
            )));
        }

        if &box_type == b"ftyp" {
            return read_ftyp_brands(path, &mut reader, box_size - header_len);
        }

        offset += box_size;
        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| DetectError::io(path, e))?;
    }

    // No ftyp box: old-style QuickTime movies start directly with moov/mdat.
    Ok(QUICKTIME)
}

fn read_ftyp_brands(
    path: &Path,
    reader: &mut impl Read,
    payload_len: u64,
) -> Result<&'static str, DetectError> {
    if payload_len < 8 || payload_len > MAX_FTYP_PAYLOAD {
        return Err(DetectError::Parse(format!(
            "invalid ftyp payload length {}",
            payload_len
        )));
    }
    let mut payload = vec![0u8; payload_len as usize];
    reader
        .read_exact(&mut payload)
        .map_err(|e| DetectError::io(path, e))?;

    let major = &payload[0..4];
    if major == QUICKTIME_BRAND {
        return Ok(QUICKTIME);
    }
    if is_mp4_brand(major) {
        return Ok(MP4);
    }

    // Unknown major brand: fall back to the compatible brand list
    // (bytes after major_brand + minor_version).
    let compatible = payload[8..].chunks_exact(4);
    for brand in compatible.clone() {
        if is_mp4_brand(brand) {
            return Ok(MP4);
        }
    }
    for brand in compatible {
        if brand == QUICKTIME_BRAND {
            return Ok(QUICKTIME);
        }
    }

    // Brand family unknown to us: keep the shallow QuickTime answer.
    Ok(QUICKTIME)
}
