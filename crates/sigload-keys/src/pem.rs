#![forbid(unsafe_code)]

//! Locating and decoding the first PEM block in a buffer.

use base64::Engine;

const BEGIN_MARKER: &[u8] = b"-----BEGIN ";
const END_MARKER: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

/// A decoded PEM block: its label and DER payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    pub label: String,
    pub der: Vec<u8>,
}

/// Decode the first well-formed PEM block in `data`.
///
/// A block starts with a `-----BEGIN <label>-----` line at the start of the
/// input or of a line; text before it is ignored. The base64 body may be
/// wrapped at any width. A block that does not decode is skipped and the
/// search resumes after its `BEGIN` line. Returns `None` when no block
/// decodes.
pub fn decode_first_block(data: &[u8]) -> Option<PemBlock> {
    let mut offset = 0;
    while let Some(pos) = find(&data[offset..], BEGIN_MARKER) {
        let start = offset + pos;
        offset = start + BEGIN_MARKER.len();

        if start > 0 && data[start - 1] != b'\n' {
            continue;
        }
        match decode_block(&data[start..]) {
            Ok(block) => return Some(block),
            Err(reason) => tracing::trace!(offset = start, "skipping PEM block: {reason}"),
        }
    }
    None
}

/// Decode the block at the start of `data`, which begins with `BEGIN_MARKER`.
fn decode_block(data: &[u8]) -> Result<PemBlock, String> {
    let rest = &data[BEGIN_MARKER.len()..];
    let line_end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    let line = &rest[..line_end];
    let label_len = find(line, DASHES).ok_or("unterminated BEGIN line")?;
    if !line[label_len + DASHES.len()..].iter().all(u8::is_ascii_whitespace) {
        return Err("trailing text on BEGIN line".into());
    }
    let label = std::str::from_utf8(&line[..label_len])
        .map_err(|e| format!("label is not UTF-8: {e}"))?;

    let body_start = (line_end + 1).min(rest.len());
    let body = &rest[body_start..];
    let body_len = find(body, END_MARKER).ok_or("missing END line")?;
    let end_line = &body[body_len + END_MARKER.len()..];
    if !end_line.starts_with(label.as_bytes()) || !end_line[label.len()..].starts_with(DASHES) {
        return Err(format!("END line does not match label {label:?}"));
    }

    let encoded: Vec<u8> = body[..body_len]
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let der = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| format!("invalid base64 body: {e}"))?;

    Ok(PemBlock {
        label: label.to_owned(),
        der,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
