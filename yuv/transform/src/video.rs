/*!
    Video frame normalization.
*/

use ffmpeg_next::{
    format::Pixel,
    software::scaling::{context::Context as ScalerContext, flag::Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use yuv_types::{Error, Plane, Result, Yuv420Frame};

/**
    What the normalizer does with a given pixel format.

    The accept set (pass-through plus convert) is exactly the set of
    formats the raw serializer can write correctly; everything else is
    rejected. 4:2:2 and 4:4:4 are rejected rather than passed through,
    because the serializer assumes 4:2:0 chroma geometry unconditionally.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatAction {
    /// 8-bit planar 4:2:0 (either range variant): copy through unchanged.
    PassThrough,
    /// 10-bit planar 4:2:0: convert to 8-bit at identical dimensions.
    Convert,
    /// Anything else: skip the frame. Not an error.
    Reject,
}

/**
    Classify a decoded frame's pixel format.
*/
pub fn classify(format: Pixel) -> FormatAction {
    match format {
        Pixel::YUV420P | Pixel::YUVJ420P => FormatAction::PassThrough,
        Pixel::YUV420P10LE | Pixel::YUV420P10BE => FormatAction::Convert,
        _ => FormatAction::Reject,
    }
}

/**
    Outcome of normalizing one decoded frame.
*/
#[derive(Debug)]
pub enum Normalized {
    /// The frame survived normalization and can be serialized.
    Frame(Yuv420Frame),
    /// The frame was skipped; it does not count toward the output.
    Skipped,
}

/**
    Normalizes decoded frames to 8-bit planar 4:2:0.

    The conversion scaler is lazily created on the first 10-bit frame
    and reused while the input geometry and format stay the same.
*/
pub struct Normalizer {
    scaler: Option<ScalerState>,
}

struct ScalerState {
    context: ScalerContext,
    src_width: u32,
    src_height: u32,
    src_format: Pixel,
}

impl Normalizer {
    pub fn new() -> Self {
        Self { scaler: None }
    }

    /**
        Normalize one decoded frame.

        Pass-through and conversion yield [`Normalized::Frame`];
        unsupported formats and conversion failures yield
        [`Normalized::Skipped`]. Skips are logged but never fatal.
    */
    pub fn normalize(&mut self, frame: &VideoFrameFFmpeg) -> Normalized {
        match classify(frame.format()) {
            FormatAction::PassThrough => Normalized::Frame(copy_planes(frame)),
            FormatAction::Convert => match self.convert(frame) {
                Ok(converted) => Normalized::Frame(converted),
                Err(e) => {
                    log::warn!("skipping frame, conversion from {:?} failed: {e}", frame.format());
                    Normalized::Skipped
                }
            },
            FormatAction::Reject => {
                log::warn!("skipping frame with unsupported pixel format {:?}", frame.format());
                Normalized::Skipped
            }
        }
    }

    /**
        Convert a 10-bit 4:2:0 frame to 8-bit at identical dimensions.

        The converted frame is a new buffer, released when this function
        returns; only the copied plane data survives.
    */
    fn convert(&mut self, frame: &VideoFrameFFmpeg) -> Result<Yuv420Frame> {
        let width = frame.width();
        let height = frame.height();

        let needs_init = match &self.scaler {
            None => true,
            Some(state) => {
                state.src_width != width
                    || state.src_height != height
                    || state.src_format != frame.format()
            }
        };

        if needs_init {
            let context = ScalerContext::get(
                frame.format(),
                width,
                height,
                Pixel::YUV420P,
                width,
                height,
                ScalerFlags::BILINEAR,
            )
            .map_err(|e| Error::decode(format!("failed to create scaler: {e}")))?;

            self.scaler = Some(ScalerState {
                context,
                src_width: width,
                src_height: height,
                src_format: frame.format(),
            });
        }

        let state = self.scaler.as_mut().expect("scaler initialized above");

        let mut converted = VideoFrameFFmpeg::new(Pixel::YUV420P, width, height);
        state
            .context
            .run(frame, &mut converted)
            .map_err(|e| Error::decode(format!("scaling failed: {e}")))?;

        Ok(copy_planes(&converted))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/**
    Copy the three planes of an 8-bit 4:2:0 frame, preserving each
    plane's stride.
*/
fn copy_planes(frame: &VideoFrameFFmpeg) -> Yuv420Frame {
    let width = frame.width();
    let height = frame.height();
    let chroma_rows = (height / 2) as usize;

    Yuv420Frame {
        width,
        height,
        y: copy_plane(frame, 0, height as usize),
        u: copy_plane(frame, 1, chroma_rows),
        v: copy_plane(frame, 2, chroma_rows),
    }
}

fn copy_plane(frame: &VideoFrameFFmpeg, index: usize, rows: usize) -> Plane {
    let stride = frame.stride(index);
    let data = frame.data(index);
    Plane::new(data[..stride * rows].to_vec(), stride)
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("scaler_initialized", &self.scaler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(classify(Pixel::YUV420P), FormatAction::PassThrough);
        assert_eq!(classify(Pixel::YUVJ420P), FormatAction::PassThrough);
        assert_eq!(classify(Pixel::YUV420P10LE), FormatAction::Convert);
        assert_eq!(classify(Pixel::YUV420P10BE), FormatAction::Convert);

        // Everything the serializer cannot write must be rejected,
        // including the other planar YUV layouts.
        assert_eq!(classify(Pixel::YUV422P), FormatAction::Reject);
        assert_eq!(classify(Pixel::YUV444P), FormatAction::Reject);
        assert_eq!(classify(Pixel::NV12), FormatAction::Reject);
        assert_eq!(classify(Pixel::P010LE), FormatAction::Reject);
        assert_eq!(classify(Pixel::RGB24), FormatAction::Reject);
    }

    fn fill_plane_8bit(frame: &mut VideoFrameFFmpeg, index: usize, rows: usize, value: u8) {
        let stride = frame.stride(index);
        let data = frame.data_mut(index);
        for row in 0..rows {
            for byte in &mut data[row * stride..(row + 1) * stride] {
                *byte = value;
            }
        }
    }

    #[test]
    fn eight_bit_420_passes_through_with_stride() {
        let mut frame = VideoFrameFFmpeg::new(Pixel::YUV420P, 64, 48);
        fill_plane_8bit(&mut frame, 0, 48, 9);
        fill_plane_8bit(&mut frame, 1, 24, 17);
        fill_plane_8bit(&mut frame, 2, 24, 33);

        let mut normalizer = Normalizer::new();
        let Normalized::Frame(out) = normalizer.normalize(&frame) else {
            panic!("8-bit 4:2:0 must pass through");
        };

        assert_eq!((out.width, out.height), (64, 48));
        assert_eq!(out.serialized_len(), 64 * 48 * 3 / 2);
        assert!(out.y.stride >= 64);
        assert_eq!(out.y.row(0, 64), &[9u8; 64][..]);
        assert_eq!(out.u.row(23, 32), &[17u8; 32][..]);
        assert_eq!(out.v.row(0, 32), &[33u8; 32][..]);
    }

    #[test]
    fn ten_bit_420_is_converted_to_eight_bit() {
        let mut frame = VideoFrameFFmpeg::new(Pixel::YUV420P10LE, 64, 48);
        for plane in 0..3 {
            let rows = if plane == 0 { 48 } else { 24 };
            let stride = frame.stride(plane);
            let data = frame.data_mut(plane);
            for row in 0..rows {
                for sample in data[row * stride..(row + 1) * stride].chunks_exact_mut(2) {
                    // 512 of 1023 is mid-scale; expect roughly 128 after conversion
                    sample.copy_from_slice(&512u16.to_le_bytes());
                }
            }
        }

        let mut normalizer = Normalizer::new();
        let Normalized::Frame(out) = normalizer.normalize(&frame) else {
            panic!("10-bit 4:2:0 must convert, not skip");
        };

        assert_eq!((out.width, out.height), (64, 48));
        for value in out.y.row(10, 64) {
            assert!((126..=130).contains(value), "luma {value} not mid-scale");
        }
    }

    #[test]
    fn unsupported_formats_are_skipped() {
        let frame = VideoFrameFFmpeg::new(Pixel::NV12, 64, 48);
        let mut normalizer = Normalizer::new();
        assert!(matches!(normalizer.normalize(&frame), Normalized::Skipped));

        let frame = VideoFrameFFmpeg::new(Pixel::YUV444P, 64, 48);
        assert!(matches!(normalizer.normalize(&frame), Normalized::Skipped));
    }
}
