/*!
    The decode engine: drives packets from a source through a decoder,
    the normalizer, and into the sink.
*/

use ffmpeg_next::util::frame::video::Video as VideoFrameFFmpeg;

use yuv_decode::{ReceiveStatus, VideoDecoder};
use yuv_sink::RawSink;
use yuv_source::Source;
use yuv_transform::{Normalized, Normalizer};
use yuv_types::{Error, Result};

/**
    Outcome counters of one engine run.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Frames normalized and serialized.
    pub frames_written: u64,
    /// Frames the normalizer skipped (unsupported format or failed
    /// conversion). Skips are observable here but never fatal.
    pub frames_skipped: u64,
}

/**
    Engine states. Transitions only move forward; failure at any point
    leaves through the `Err` channel instead of a state.
*/
enum EngineState {
    Opened,
    Decoding,
    Flushing,
    Done,
}

/**
    Run the decode loop to completion.

    Packets not belonging to `stream_index` are discarded. Packet
    submission failures are logged and the drain still runs, since a
    decoder may reject input while holding emittable frames. The flush
    phase applies the same drain rule to the decoder's buffered tail.

    A run that writes zero frames is a failure
    ([`Error::NoFramesDecoded`]), even when no decode error occurred.
*/
pub fn run(
    source: &mut Source,
    stream_index: usize,
    decoder: &mut VideoDecoder,
    normalizer: &mut Normalizer,
    sink: &mut RawSink,
) -> Result<DecodeStats> {
    let mut stats = DecodeStats::default();
    let mut frame = VideoFrameFFmpeg::empty();
    let mut state = EngineState::Opened;

    loop {
        state = match state {
            EngineState::Opened => EngineState::Decoding,

            EngineState::Decoding => match source.read_packet() {
                Some(packet) => {
                    if packet.stream_index() == stream_index {
                        if let Err(e) = decoder.submit(&packet) {
                            log::warn!("packet submission rejected, draining anyway: {e}");
                        }
                        drain(decoder, normalizer, sink, &mut frame, &mut stats)?;
                    }
                    // The packet is released here, before the next read.
                    EngineState::Decoding
                }
                None => EngineState::Flushing,
            },

            EngineState::Flushing => {
                // Drain first so a decoder with a full output queue can
                // accept the end-of-stream signal.
                drain(decoder, normalizer, sink, &mut frame, &mut stats)?;
                if let Err(e) = decoder.submit_eof() {
                    log::warn!("end-of-stream submission rejected: {e}");
                }
                drain(decoder, normalizer, sink, &mut frame, &mut stats)?;
                EngineState::Done
            }

            EngineState::Done => break,
        };
    }

    log::info!(
        "decode finished: {} frame(s) written, {} skipped",
        stats.frames_written,
        stats.frames_skipped
    );

    if stats.frames_written == 0 {
        return Err(Error::NoFramesDecoded);
    }

    Ok(stats)
}

/**
    Receive frames until the decoder reports "needs more input" or "end
    of stream". Any other negative answer propagates as a fatal decode
    error.
*/
fn drain(
    decoder: &mut VideoDecoder,
    normalizer: &mut Normalizer,
    sink: &mut RawSink,
    frame: &mut VideoFrameFFmpeg,
    stats: &mut DecodeStats,
) -> Result<()> {
    loop {
        match decoder.receive_frame(frame)? {
            ReceiveStatus::Exhausted => return Ok(()),
            ReceiveStatus::Received => match normalizer.normalize(frame) {
                Normalized::Frame(normalized) => {
                    sink.write_frame(&normalized)?;
                    stats.frames_written += 1;
                }
                Normalized::Skipped => stats.frames_skipped += 1,
            },
        }
    }
}
