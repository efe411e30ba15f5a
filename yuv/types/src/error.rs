/*!
    Error types shared across the yuv crates.
*/

use thiserror::Error;

use crate::status::{self, Status};

/**
    Result type used throughout the yuv crates.
*/
pub type Result<T> = std::result::Result<T, Error>;

/**
    Errors produced by the decode and staging pipelines.

    Each variant is one externally observable failure class; the
    [`status`](Error::status) method maps a variant to the integer
    status code reported across the process boundary.
*/
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Local file or descriptor I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The input container could not be opened or probed.
    #[error("could not open input: {0}")]
    OpenFailed(String),

    /// The container opened but exposes no derivable stream metadata.
    #[error("no stream information available: {0}")]
    StreamInfoUnavailable(String),

    /// The container has no stream of video type.
    #[error("input has no video stream")]
    NoVideoStream,

    /// Neither the codec hint nor the declared identifier resolves to a decoder.
    #[error("no decoder available for codec: {0}")]
    UnsupportedCodec(String),

    /// A decoder was found but could not be opened for the stream parameters.
    #[error("could not open decoder: {0}")]
    CodecOpenFailed(String),

    /// The decoder reported a fatal error while draining frames.
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    /// Descriptor duplication, staging-file handling, or a provider call failed.
    #[error("resource error: {0}")]
    Resource(String),

    /// The decode ran to completion without writing a single frame.
    #[error("decoding produced no frames")]
    NoFramesDecoded,
}

impl Error {
    /**
        Container open/probe failure.
    */
    pub fn open_failed(msg: impl Into<String>) -> Self {
        Self::OpenFailed(msg.into())
    }

    /**
        Missing stream metadata.
    */
    pub fn stream_info(msg: impl Into<String>) -> Self {
        Self::StreamInfoUnavailable(msg.into())
    }

    /**
        No decoder available for the requested codec.
    */
    pub fn unsupported_codec(msg: impl Into<String>) -> Self {
        Self::UnsupportedCodec(msg.into())
    }

    /**
        Decoder open failure.
    */
    pub fn codec_open(msg: impl Into<String>) -> Self {
        Self::CodecOpenFailed(msg.into())
    }

    /**
        Fatal decode failure.
    */
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailed(msg.into())
    }

    /**
        Descriptor, staging, or provider failure.
    */
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /**
        The status code reported for this error across the process boundary.

        Zero is reserved for success; every variant maps to a distinct
        negative constant in [`status`](crate::status).
    */
    pub fn status(&self) -> Status {
        match self {
            Self::Io(_) => status::IO_FAILED,
            Self::OpenFailed(_) => status::OPEN_FAILED,
            Self::StreamInfoUnavailable(_) => status::STREAM_INFO_UNAVAILABLE,
            Self::NoVideoStream => status::NO_VIDEO_STREAM,
            Self::UnsupportedCodec(_) => status::UNSUPPORTED_CODEC,
            Self::CodecOpenFailed(_) => status::CODEC_OPEN_FAILED,
            Self::DecodeFailed(_) => status::DECODE_FAILED,
            Self::Resource(_) => status::RESOURCE_FAILED,
            Self::NoFramesDecoded => status::NO_FRAMES_DECODED,
        }
    }
}
