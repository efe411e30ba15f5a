/*!
    Pipeline assembly: local-path decode and handle-staged decode.
*/

use std::path::Path;

use yuv_decode::VideoDecoder;
use yuv_sink::RawSink;
use yuv_source::Source;
use yuv_staging::{
    ContentProvider, DescriptorHandle, OpenMode, StagingFile, deliver_to_descriptor,
    stage_from_descriptor,
};
use yuv_transform::Normalizer;
use yuv_types::{Error, Result};

use crate::engine::{self, DecodeStats};

/**
    Process-wide one-time setup. Idempotent; safe to call more than
    once and from any invocation.
*/
pub fn initialize() -> Result<()> {
    ffmpeg_next::init().map_err(|e| Error::resource(format!("ffmpeg initialization failed: {e}")))
}

/**
    Release process-wide state. Safe to call without a matching
    [`initialize`]; current FFmpeg keeps no registration state that
    needs explicit teardown, so this only exists for interface symmetry.
*/
pub fn shutdown() {
    log::debug!("pipeline shutdown");
}

/**
    Decode the video stream of `input` into raw planar frames at
    `output`.

    The output file is created or truncated. Resources are acquired in
    a fixed order (source, stream selection, decoder, normalizer, sink)
    and released in exactly the reverse order on every exit path; the
    sink's final flush runs on the success path so its failure is
    reported rather than swallowed.
*/
pub fn decode_file(input: &Path, output: &Path, codec_hint: Option<&str>) -> Result<DecodeStats> {
    log::debug!(
        "decode {} -> {} (hint: {})",
        input.display(),
        output.display(),
        codec_hint.unwrap_or("none")
    );

    let mut source = Source::open(input)?;
    let stream = source.select_video_stream()?;
    let stream_index = stream.index();

    let mut decoder = VideoDecoder::open(stream.codec_config(), codec_hint)?;
    let mut normalizer = Normalizer::new();
    let mut sink = RawSink::create(output)?;

    let stats = engine::run(
        &mut source,
        stream_index,
        &mut decoder,
        &mut normalizer,
        &mut sink,
    )?;

    sink.finish()?;
    Ok(stats)
}

/**
    Decode between opaque provider handles, staging bytes through local
    files.

    The provider's descriptors are duplicated immediately and the
    originals released per the provider's contract; only the duplicates
    are used. Both staging files are deleted when this function returns,
    on success and on every failure path, because their deletion is
    owned by their drop.
*/
pub fn decode_handles(
    provider: &dyn ContentProvider,
    input_handle: &str,
    output_handle: &str,
    codec_hint: Option<&str>,
) -> Result<DecodeStats> {
    let scratch = provider.scratch_dir()?;

    let input = DescriptorHandle::obtain(provider, input_handle, OpenMode::Read)?;

    // Keep the handle's extension on the staged copy; container probing
    // falls back to it when the content alone is not conclusive.
    let suffix = Path::new(input_handle)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut staged_input = StagingFile::create_in(&scratch, "staged_", &suffix)?;
    stage_from_descriptor(input, &mut staged_input)?;

    let staged_output = StagingFile::create_in(&scratch, "decoded_", ".yuv")?;
    let stats = decode_file(staged_input.path(), staged_output.path(), codec_hint)?;

    let output = DescriptorHandle::obtain(provider, output_handle, OpenMode::WriteTruncate)?;
    deliver_to_descriptor(&staged_output, output)?;

    Ok(stats)
}
