/*!
    Video decoder implementation.
*/

use ffmpeg_next::{codec, ffi, util::frame::video::Video as VideoFrameFFmpeg};

use yuv_source::{CodecConfig, Packet};
use yuv_types::{Error, Result};

use crate::resolver;

/**
    Outcome of one receive call against the decoder.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiveStatus {
    /// A frame was produced and written into the caller's buffer.
    Received,
    /// The decoder needs more input or has reached end of stream.
    ///
    /// Both answers are control-flow sentinels that end the current
    /// drain, never errors.
    Exhausted,
}

/**
    Video decoder bound to one stream's codec parameters.

    Owns the decoder instance and its internal state (reference frames,
    buffers). One decoder serves exactly one invocation; it is never
    shared across invocations or threads.
*/
pub struct VideoDecoder {
    decoder: codec::decoder::Video,
}

impl VideoDecoder {
    /**
        Resolve a decoder for the stream and open it.

        The codec hint, when it names a known family, overrides the
        identifier declared in `config`; see [`resolver::resolve`].
    */
    pub fn open(config: CodecConfig, hint: Option<&str>) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::codec_open(e.to_string()))?;

        let capability = resolver::resolve(hint, config.id())?;
        log::debug!("using decoder {:?}", capability.id());

        let decoder_ctx = codec::context::Context::from_parameters(config.into_parameters())
            .map_err(|e| Error::codec_open(e.to_string()))?;

        let decoder = decoder_ctx
            .decoder()
            .open_as(capability)
            .map_err(|e| Error::codec_open(e.to_string()))?
            .video()
            .map_err(|e| Error::codec_open(e.to_string()))?;

        Ok(Self { decoder })
    }

    /**
        Submit one compressed packet.

        A rejection here is not necessarily fatal: the decoder may
        refuse input while still holding frames to emit, so callers
        should drain frames regardless of the result.
    */
    pub fn submit(&mut self, packet: &Packet) -> Result<()> {
        self.decoder
            .send_packet(packet.inner())
            .map_err(|e| Error::decode(e.to_string()))
    }

    /**
        Signal end of stream, switching the decoder into flush mode.

        An EOF answer to the EOF submission itself means the decoder was
        already flushed and is not an error.
    */
    pub fn submit_eof(&mut self) -> Result<()> {
        match self.decoder.send_eof() {
            Ok(()) | Err(ffmpeg_next::Error::Eof) => Ok(()),
            Err(e) => Err(Error::decode(e.to_string())),
        }
    }

    /**
        Receive one decoded frame into `frame`.

        "Needs more input" and "end of stream" both map to
        [`ReceiveStatus::Exhausted`]; any other negative answer is a
        fatal [`Error::DecodeFailed`].
    */
    pub fn receive_frame(&mut self, frame: &mut VideoFrameFFmpeg) -> Result<ReceiveStatus> {
        match self.decoder.receive_frame(frame) {
            Ok(()) => Ok(ReceiveStatus::Received),
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                Ok(ReceiveStatus::Exhausted)
            }
            Err(ffmpeg_next::Error::Eof) => Ok(ReceiveStatus::Exhausted),
            Err(e) => Err(Error::decode(e.to_string())),
        }
    }
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("codec", &self.decoder.id())
            .finish_non_exhaustive()
    }
}
