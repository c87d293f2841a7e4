//! Minimal JPEG COM-segment reader and writer.
//!
//! The `image` crate neither exposes COM (0xFFFE) comment segments on decode
//! nor writes them on encode, so this module walks the marker stream
//! directly. Two kinds of COM payload are understood:
//!
//! - a free-form comment (the first COM segment not starting with `Thumb::`);
//! - freedesktop-style thumbnail metadata: `Thumb::Key=Value` lines
//!   (Mimetype, URI, MTime, Image::Width, Image::Height).
//!
//! Zero external dependencies — pure byte walking.

/// Embedded thumbnail metadata parsed from `Thumb::` comment lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailInfo {
    pub mimetype: Option<String>,
    pub uri: Option<String>,
    pub mtime: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Everything COM-related found in one JPEG byte stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComData {
    pub comment: Option<String>,
    pub thumbnail: Option<ThumbnailInfo>,
}

const THUMB_PREFIX: &str = "Thumb::";

/// Scan a JPEG byte stream for COM segments and classify their contents.
pub fn read_com_data(data: &[u8]) -> ComData {
    let mut result = ComData::default();
    for text in com_segments(data) {
        if text.starts_with(THUMB_PREFIX) {
            let info = parse_thumb_lines(&text);
            if info != ThumbnailInfo::default() {
                result.thumbnail = Some(info);
            }
        } else if result.comment.is_none() && !text.is_empty() {
            result.comment = Some(text);
        }
    }
    result
}

/// Collect the text of every COM segment before SOS, in stream order.
fn com_segments(data: &[u8]) -> Vec<String> {
    let mut segments = Vec::new();
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return segments; // not a JPEG stream
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            // Fill bytes or garbage between markers
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];
        match marker {
            // SOS: entropy-coded data follows, stop scanning
            0xDA => break,
            // Standalone markers without a length field
            0xD8 | 0xD9 | 0x01 | 0xD0..=0xD7 => {
                pos += 2;
            }
            0xFF => {
                pos += 1; // padding
            }
            _ => {
                let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
                if seg_len < 2 {
                    break; // malformed length
                }
                let seg_start = pos + 4;
                let seg_end = (pos + 2 + seg_len).min(data.len());
                if marker == 0xFE && seg_start <= seg_end {
                    let text = String::from_utf8_lossy(&data[seg_start..seg_end])
                        .trim_end_matches('\0')
                        .to_string();
                    segments.push(text);
                }
                pos += 2 + seg_len;
            }
        }
    }
    segments
}

/// Parse `Thumb::Key=Value` lines into structured metadata.
fn parse_thumb_lines(text: &str) -> ThumbnailInfo {
    let mut info = ThumbnailInfo::default();
    for line in text.lines() {
        let Some(rest) = line.strip_prefix(THUMB_PREFIX) else {
            continue;
        };
        let Some((key, value)) = rest.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key {
            "Mimetype" => info.mimetype = Some(value.to_string()),
            "URI" => info.uri = Some(value.to_string()),
            "MTime" => info.mtime = value.parse().ok(),
            "Image::Width" => info.width = value.parse().ok(),
            "Image::Height" => info.height = value.parse().ok(),
            _ => {}
        }
    }
    info
}

/// Maximum COM payload: segment length is a u16 that counts itself.
const MAX_COM_PAYLOAD: usize = 65533;

/// Build the bytes of one COM segment holding `text` (truncated to fit).
fn com_segment(text: &str) -> Vec<u8> {
    let payload = &text.as_bytes()[..text.len().min(MAX_COM_PAYLOAD)];
    let mut seg = Vec::with_capacity(4 + payload.len());
    seg.extend_from_slice(&[0xFF, 0xFE]);
    seg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    seg.extend_from_slice(payload);
    seg
}

/// Splice COM segments into an encoded JPEG, right after SOI (and after an
/// immediately following APP0/JFIF segment, if present).
///
/// Returns the input unchanged when it does not start with SOI.
pub fn insert_com_segments(jpeg: &[u8], texts: &[String]) -> Vec<u8> {
    if jpeg.len() < 2 || jpeg[0] != 0xFF || jpeg[1] != 0xD8 {
        return jpeg.to_vec();
    }

    let mut insert_at = 2;
    // Keep a leading JFIF header in front of the comments
    if jpeg.len() >= insert_at + 4 && jpeg[insert_at] == 0xFF && jpeg[insert_at + 1] == 0xE0 {
        let seg_len = u16::from_be_bytes([jpeg[insert_at + 2], jpeg[insert_at + 3]]) as usize;
        insert_at += 2 + seg_len;
        if insert_at > jpeg.len() {
            return jpeg.to_vec();
        }
    }

    let mut out = Vec::with_capacity(jpeg.len() + texts.iter().map(|t| t.len() + 4).sum::<usize>());
    out.extend_from_slice(&jpeg[..insert_at]);
    for text in texts {
        if !text.is_empty() {
            out.extend_from_slice(&com_segment(text));
        }
    }
    out.extend_from_slice(&jpeg[insert_at..]);
    out
}
