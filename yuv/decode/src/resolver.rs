/*!
    Codec capability resolution.
*/

use ffmpeg_next::{Codec, codec};

use yuv_types::{Error, Result};

/// Hint spellings that force the H.264 decoder family.
const H264_ALIASES: &[&str] = &["h264", "avc"];

/// Hint spellings that force the HEVC decoder family.
const HEVC_ALIASES: &[&str] = &["hevc", "h265"];

/**
    Resolve a decoder capability from a caller hint and the stream's
    declared codec identifier.

    A hint matching a known alias family wins unconditionally, even when
    it disagrees with the container metadata; that lets callers force an
    interpretation for raw or mislabeled streams, and it is deliberately
    never validated against the declared identifier. Any other hint, or
    no hint, resolves by the declared identifier.
*/
pub fn resolve(hint: Option<&str>, declared: codec::Id) -> Result<Codec> {
    let id = match hint {
        Some(name) if is_alias(name, H264_ALIASES) => codec::Id::H264,
        Some(name) if is_alias(name, HEVC_ALIASES) => codec::Id::HEVC,
        _ => declared,
    };

    ffmpeg_next::decoder::find(id).ok_or_else(|| {
        Error::unsupported_codec(format!("{id:?} (hint: {})", hint.unwrap_or("none")))
    })
}

fn is_alias(name: &str, aliases: &[&str]) -> bool {
    aliases.iter().any(|a| name.eq_ignore_ascii_case(a))
}
