//! Two-stage content type detection.
//!
//! Stage 1 is a fast signature pass over the first bytes of the file, with
//! the client-supplied file name as a tie-break hint for formats that carry
//! no usable magic bytes. Stage 2 only runs when stage 1 answers
//! `video/quicktime`: the QuickTime signature family is a strict superset of
//! MP4, so the container is re-opened and structurally parsed to tell the
//! two apart (see [`crate::bmff`]).

use crate::bmff;
use crate::DetectError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How much of the file the signature pass looks at.
const SNIFF_WINDOW: usize = 8192;

/// Fallback when neither the signature nor the name hint resolves the type.
const UNKNOWN: &str = "application/octet-stream";

/// Extension hint table, consulted only when magic-byte detection is
/// inconclusive. The name is a hint, never the authority: a conclusive
/// signature always wins over the extension.
const EXTENSION_HINTS: [(&str, &str); 9] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("pdf", "application/pdf"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
];

/// Detect the content type of the file at `path`.
///
/// `original_name` is the file name the client supplied with the upload.
pub fn content_type(path: &Path, original_name: &str) -> Result<String, DetectError> {
    let detected = detect_signature(path, original_name)?;
    if detected == bmff::QUICKTIME {
        let resolved = bmff::resolve_quicktime_container(path)?;
        tracing::debug!(
            shallow = bmff::QUICKTIME,
            resolved,
            "QuickTime container disambiguated"
        );
        return Ok(resolved.to_string());
    }
    Ok(detected)
}

fn detect_signature(path: &Path, original_name: &str) -> Result<String, DetectError> {
    let mut file = File::open(path).map_err(|e| DetectError::io(path, e))?;
    let mut buf = vec![0u8; SNIFF_WINDOW];
    let mut filled = 0;
    while filled < buf.len() {
        let n = file
            .read(&mut buf[filled..])
            .map_err(|e| DetectError::io(path, e))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);

    if let Some(kind) = infer::get(&buf) {
        return Ok(kind.mime_type().to_string());
    }

    if looks_like_text(&buf) {
        // Textual payloads have no signature; prefer the name hint if it names
        // a textual type, otherwise report plain text.
        if let Some(hint) = extension_hint(original_name) {
            if hint.starts_with("text/") {
                return Ok(hint.to_string());
            }
        }
        return Ok("text/plain".to_string());
    }

    Ok(extension_hint(original_name).unwrap_or(UNKNOWN).to_string())
}

fn extension_hint(original_name: &str) -> Option<&'static str> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())?;
    EXTENSION_HINTS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

fn looks_like_text(buf: &[u8]) -> bool {
    !buf.is_empty()
        && std::str::from_utf8(buf).is_ok_and(|s| {
            s.chars()
                .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[0u8; 64]);
        bytes
    }

    #[test]
    fn jpeg_is_detected_from_content() {
        let file = write_temp(&jpeg_bytes());
        assert_eq!(
            content_type(file.path(), "photo.jpg").unwrap(),
            "image/jpeg"
        );
    }

    #[test]
    fn jpeg_renamed_to_pdf_is_still_jpeg() {
        let file = write_temp(&jpeg_bytes());
        assert_eq!(
            content_type(file.path(), "report.pdf").unwrap(),
            "image/jpeg"
        );
    }

    #[test]
    fn png_is_detected() {
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        let file = write_temp(&bytes);
        assert_eq!(content_type(file.path(), "img.png").unwrap(), "image/png");
    }

    #[test]
    fn pdf_is_detected() {
        let file = write_temp(b"%PDF-1.7\n%binary\n1 0 obj\n<<>>\nendobj\n");
        assert_eq!(
            content_type(file.path(), "doc.pdf").unwrap(),
            "application/pdf"
        );
    }

    #[test]
    fn mp3_with_id3_tag_is_detected() {
        let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
        bytes.extend_from_slice(&[0u8; 128]);
        let file = write_temp(&bytes);
        assert_eq!(
            content_type(file.path(), "sample.mp3").unwrap(),
            "audio/mpeg"
        );
    }

    #[test]
    fn plain_text_is_detected_without_extension_help() {
        let file = write_temp(b"just some notes\nsecond line\n");
        assert_eq!(
            content_type(file.path(), "notes.bin").unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn unknown_binary_falls_back_to_extension_hint() {
        let file = write_temp(&[0x01, 0x02, 0x03, 0x00, 0xFE, 0xFD]);
        assert_eq!(
            content_type(file.path(), "voice.mp3").unwrap(),
            "audio/mpeg"
        );
    }

    #[test]
    fn unknown_binary_without_hint_is_octet_stream() {
        let file = write_temp(&[0x01, 0x02, 0x03, 0x00, 0xFE, 0xFD]);
        assert_eq!(
            content_type(file.path(), "mystery").unwrap(),
            "application/octet-stream"
        );
    }

    /// A genuine MP4 whose leading box hides the brand from shallow
    /// signature detection must still resolve to video/mp4 via the
    /// structural pass.
    #[test]
    fn shallow_quicktime_mp4_is_disambiguated() {
        let mut bytes = Vec::new();
        // free box first: infer sees a QuickTime-family container
        bytes.extend_from_slice(&8u32.to_be_bytes());
        bytes.extend_from_slice(b"free");
        // then ftyp with an MP4 brand
        bytes.extend_from_slice(&20u32.to_be_bytes());
        bytes.extend_from_slice(b"ftyp");
        bytes.extend_from_slice(b"isom");
        bytes.extend_from_slice(&[0, 0, 2, 0]);
        bytes.extend_from_slice(b"mp42");
        bytes.extend_from_slice(&16u32.to_be_bytes());
        bytes.extend_from_slice(b"mdat");
        bytes.extend_from_slice(&[0u8; 8]);
        let file = write_temp(&bytes);
        assert_eq!(content_type(file.path(), "clip.mp4").unwrap(), "video/mp4");
    }

    #[test]
    fn quicktime_proper_stays_quicktime() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&20u32.to_be_bytes());
        bytes.extend_from_slice(b"ftyp");
        bytes.extend_from_slice(b"qt  ");
        bytes.extend_from_slice(&[0, 0, 2, 0]);
        bytes.extend_from_slice(b"qt  ");
        bytes.extend_from_slice(&16u32.to_be_bytes());
        bytes.extend_from_slice(b"mdat");
        bytes.extend_from_slice(&[0u8; 8]);
        let file = write_temp(&bytes);
        assert_eq!(
            content_type(file.path(), "movie.mov").unwrap(),
            "video/quicktime"
        );
    }

    /// A QuickTime-flagged container with a corrupt box structure surfaces a
    /// parse error instead of keeping the shallow answer.
    #[test]
    fn corrupt_quicktime_container_is_a_parse_error() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&200u32.to_be_bytes());
        bytes.extend_from_slice(b"moov");
        bytes.extend_from_slice(&[0u8; 8]);
        let file = write_temp(&bytes);
        assert!(matches!(
            content_type(file.path(), "movie.mov"),
            Err(DetectError::Parse(_))
        ));
    }
}
