/*!
    Media source implementation.
*/

use std::path::Path;

use ffmpeg_next::{format::context::Input as InputContext, media::Type};

use yuv_types::{Error, Result};

use crate::codec_config::CodecConfig;

/**
    A media source that produces encoded packets.

    Opens a container, exposes its streams, and yields packets in file
    order, interleaved across all streams. One source serves exactly one
    decode invocation; dropping it invalidates nothing the caller still
    holds, because packets are owned copies of the demuxer's output.
*/
pub struct Source {
    input: InputContext,
}

/**
    An immutable view of one stream inside an opened source.
*/
pub struct StreamDescriptor {
    index: usize,
    codec_config: CodecConfig,
}

impl StreamDescriptor {
    /**
        Index of this stream within the container.
    */
    pub fn index(&self) -> usize {
        self.index
    }

    /**
        The codec identifier the container declares for this stream.
    */
    pub fn declared_codec(&self) -> ffmpeg_next::codec::Id {
        self.codec_config.id()
    }

    /**
        A copy of the codec configuration, for creating a decoder.
    */
    pub fn codec_config(&self) -> CodecConfig {
        self.codec_config.clone()
    }
}

/**
    One compressed access unit, tagged with the stream it belongs to.

    Transient: consume it (or drop it) before reading the next packet.
*/
pub struct Packet {
    inner: ffmpeg_next::Packet,
    stream_index: usize,
}

impl Packet {
    /**
        Index of the stream this packet belongs to.
    */
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /**
        The underlying FFmpeg packet, for submission to a decoder.
    */
    pub fn inner(&self) -> &ffmpeg_next::Packet {
        &self.inner
    }
}

impl Source {
    /**
        Open a media container and probe its stream metadata.

        Fails with [`Error::OpenFailed`] when the container cannot be
        opened or probed, [`Error::Io`] when the path does not exist,
        and [`Error::StreamInfoUnavailable`] when the container opens
        but exposes no streams at all.
    */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ffmpeg_next::init().map_err(|e| Error::open_failed(e.to_string()))?;

        let input = ffmpeg_next::format::input(&path).map_err(|e| {
            if e.to_string().contains("No such file") {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    e.to_string(),
                ))
            } else {
                Error::open_failed(e.to_string())
            }
        })?;

        if input.streams().count() == 0 {
            return Err(Error::stream_info("container exposes no streams"));
        }

        log::debug!(
            "opened container with {} stream(s)",
            input.streams().count()
        );

        Ok(Self { input })
    }

    /**
        Select the video stream to decode.

        Picks the lowest-indexed stream whose medium is video. There is
        no fallback to other media types; a container without a video
        stream is an error, not a default.
    */
    pub fn select_video_stream(&self) -> Result<StreamDescriptor> {
        for stream in self.input.streams() {
            let parameters = stream.parameters();
            if parameters.medium() == Type::Video {
                log::debug!(
                    "selected video stream {} (codec {:?})",
                    stream.index(),
                    parameters.id()
                );
                return Ok(StreamDescriptor {
                    index: stream.index(),
                    codec_config: CodecConfig::new(parameters),
                });
            }
        }

        Err(Error::NoVideoStream)
    }

    /**
        Read the next packet from the container.

        Returns `None` at end of stream. The sequence is lazy, finite,
        and non-restartable, and interleaves packets from all streams in
        file order; filter by [`Packet::stream_index`].
    */
    pub fn read_packet(&mut self) -> Option<Packet> {
        let (stream, packet) = self.input.packets().next()?;
        let stream_index = stream.index();

        Some(Packet {
            inner: packet,
            stream_index,
        })
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("streams", &self.input.streams().count())
            .finish_non_exhaustive()
    }
}
