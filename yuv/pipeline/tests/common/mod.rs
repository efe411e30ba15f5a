//! Shared fixtures: a synthesized MPEG-1 clip (the one video codec
//! unconditionally built into libavcodec), a hand-written WAV for the
//! audio-only case, and a directory-backed content provider.
#![allow(dead_code)] // each test binary uses a different subset

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use yuv_staging::{ContentProvider, OpenMode, ProviderDescriptor};
use yuv_types::{Error, Result};

/**
    Encode `frames` gray frames of the given size as a raw MPEG-1 video
    elementary stream at `path`.
*/
pub fn encode_mpeg1_clip(path: &Path, frames: usize, width: u32, height: u32) {
    ffmpeg_next::init().unwrap();

    let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG1VIDEO)
        .expect("mpeg1video encoder is built into every libavcodec");
    let ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec);
    let mut encoder = ctx.encoder().video().unwrap();

    encoder.set_width(width);
    encoder.set_height(height);
    encoder.set_format(ffmpeg_next::format::Pixel::YUV420P);
    encoder.set_frame_rate(Some(ffmpeg_next::Rational::new(25, 1)));
    encoder.set_time_base(ffmpeg_next::Rational::new(1, 25));
    encoder.set_bit_rate(400_000);
    encoder.set_gop(12);

    let mut encoder = encoder
        .open_with(ffmpeg_next::Dictionary::new())
        .expect("mpeg1video encoder open");

    let mut out = Vec::new();
    let mut packet = ffmpeg_next::Packet::empty();

    for i in 0..frames {
        // A fresh frame per picture: the encoder may still hold
        // references to the previous frame's buffers.
        let mut frame =
            ffmpeg_next::frame::Video::new(ffmpeg_next::format::Pixel::YUV420P, width, height);
        fill_plane(&mut frame, 0, height as usize, 40 + (i as u8 % 5) * 40);
        fill_plane(&mut frame, 1, (height / 2) as usize, 128);
        fill_plane(&mut frame, 2, (height / 2) as usize, 128);
        frame.set_pts(Some(i as i64));

        encoder.send_frame(&frame).unwrap();
        loop {
            match encoder.receive_packet(&mut packet) {
                Ok(()) => {
                    if let Some(data) = packet.data() {
                        out.extend_from_slice(data);
                    }
                }
                Err(ffmpeg_next::Error::Other { errno })
                    if errno == ffmpeg_next::ffi::EAGAIN =>
                {
                    break;
                }
                Err(ffmpeg_next::Error::Eof) => break,
                Err(e) => panic!("receive_packet: {e}"),
            }
        }
    }

    encoder.send_eof().unwrap();
    loop {
        match encoder.receive_packet(&mut packet) {
            Ok(()) => {
                if let Some(data) = packet.data() {
                    out.extend_from_slice(data);
                }
            }
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffmpeg_next::ffi::EAGAIN => break,
            Err(ffmpeg_next::Error::Eof) => break,
            Err(e) => panic!("receive_packet during flush: {e}"),
        }
    }

    std::fs::write(path, &out).unwrap();
}

fn fill_plane(frame: &mut ffmpeg_next::frame::Video, index: usize, rows: usize, value: u8) {
    let stride = frame.stride(index);
    let data = frame.data_mut(index);
    for byte in &mut data[..stride * rows] {
        *byte = value;
    }
}

/**
    Write a minimal mono 16-bit PCM WAV: a valid container whose only
    stream is audio.
*/
pub fn write_wav(path: &Path) {
    let data = vec![0u8; 1600];
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&data);

    File::create(path).unwrap().write_all(&bytes).unwrap();
}

/**
    A content provider backed by a plain directory: handles are file
    names under the root, the scratch directory is a subdirectory.
*/
pub struct DirProvider {
    root: PathBuf,
    scratch: PathBuf,
}

impl DirProvider {
    pub fn new(root: &Path) -> Self {
        let scratch = root.join("scratch");
        std::fs::create_dir_all(&scratch).unwrap();
        Self {
            root: root.to_path_buf(),
            scratch,
        }
    }

    pub fn path_of(&self, handle: &str) -> PathBuf {
        self.root.join(handle)
    }

    pub fn scratch_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.scratch)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}

impl ContentProvider for DirProvider {
    fn open_descriptor(&self, handle: &str, mode: OpenMode) -> Result<ProviderDescriptor> {
        let path = self.root.join(handle);
        let file = match mode {
            OpenMode::Read => File::open(&path),
            OpenMode::WriteTruncate => File::create(&path),
        }
        .map_err(|e| Error::resource(format!("cannot resolve handle {handle}: {e}")))?;

        Ok(ProviderDescriptor::from_file(file))
    }

    fn scratch_dir(&self) -> Result<PathBuf> {
        Ok(self.scratch.clone())
    }
}
