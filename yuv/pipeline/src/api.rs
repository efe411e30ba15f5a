/*!
    Status-code surface.

    The decode operations as a flat, status-code based interface: zero
    for success, a distinct negative constant per failure class (see
    [`yuv_types::status`]). No structured error crosses this boundary;
    failures are logged here and reduced to their code.
*/

use std::path::Path;

use yuv_staging::ContentProvider;
use yuv_types::{Status, status};

use crate::pipeline;

/**
    Process-wide one-time setup. Idempotent.
*/
pub fn initialize() -> Status {
    match pipeline::initialize() {
        Ok(()) => status::OK,
        Err(e) => {
            log::error!("initialize failed: {e}");
            e.status()
        }
    }
}

/**
    Release process-wide state. Safe without a matching initialize.
*/
pub fn shutdown() {
    pipeline::shutdown();
}

/**
    Decode a local file into a raw-frame output file.

    Returns [`status::OK`] iff at least one frame was written.
*/
pub fn decode_from_paths(input: &Path, output: &Path, codec_hint: Option<&str>) -> Status {
    match pipeline::decode_file(input, output, codec_hint) {
        Ok(stats) => {
            log::debug!(
                "decode_from_paths wrote {} frame(s), skipped {}",
                stats.frames_written,
                stats.frames_skipped
            );
            status::OK
        }
        Err(e) => {
            log::error!("decode_from_paths failed: {e}");
            e.status()
        }
    }
}

/**
    Decode between opaque provider handles, staging through local files.

    Returns [`status::OK`] iff at least one frame was written and the
    result was delivered and synced through the output handle.
*/
pub fn decode_from_handles(
    provider: &dyn ContentProvider,
    input_handle: &str,
    output_handle: &str,
    codec_hint: Option<&str>,
) -> Status {
    match pipeline::decode_handles(provider, input_handle, output_handle, codec_hint) {
        Ok(stats) => {
            log::debug!(
                "decode_from_handles wrote {} frame(s), skipped {}",
                stats.frames_written,
                stats.frames_skipped
            );
            status::OK
        }
        Err(e) => {
            log::error!("decode_from_handles failed: {e}");
            e.status()
        }
    }
}
