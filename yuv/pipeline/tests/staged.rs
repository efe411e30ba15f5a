//! Handle-staged decode tests: opaque handles resolved by a
//! directory-backed provider, bytes bridged through staging files.

mod common;

use yuv_pipeline::api;
use yuv_types::status;

use common::{DirProvider, encode_mpeg1_clip, write_wav};

#[test]
fn handle_to_handle_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let provider = DirProvider::new(dir.path());
    encode_mpeg1_clip(&provider.path_of("clip.m1v"), 2, 64, 48);

    let stats = yuv_pipeline::decode_handles(&provider, "clip.m1v", "out.yuv", None).unwrap();

    assert_eq!(stats.frames_written, 2);
    assert_eq!(
        std::fs::read(provider.path_of("out.yuv")).unwrap().len(),
        9216
    );
    // Both staging files are gone once the call returns.
    assert!(provider.scratch_entries().is_empty());
}

#[test]
fn status_surface_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let provider = DirProvider::new(dir.path());
    encode_mpeg1_clip(&provider.path_of("clip.m1v"), 3, 64, 48);

    let code = api::decode_from_handles(&provider, "clip.m1v", "out.yuv", None);
    assert_eq!(code, status::OK);
    assert_eq!(
        std::fs::read(provider.path_of("out.yuv")).unwrap().len(),
        3 * 4608
    );
}

#[test]
fn unresolvable_input_handle_is_a_resource_failure_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let provider = DirProvider::new(dir.path());

    let code = api::decode_from_handles(&provider, "missing.m1v", "out.yuv", None);

    assert_eq!(code, status::RESOURCE_FAILED);
    assert!(provider.scratch_entries().is_empty());
    assert!(!provider.path_of("out.yuv").exists());
}

#[test]
fn audio_only_input_fails_before_the_output_handle_is_touched() {
    let dir = tempfile::tempdir().unwrap();
    let provider = DirProvider::new(dir.path());
    write_wav(&provider.path_of("tone.wav"));

    let code = api::decode_from_handles(&provider, "tone.wav", "out.yuv", None);

    assert_eq!(code, status::NO_VIDEO_STREAM);
    // The failure happened mid-pipeline; staging files are still gone,
    // and the output handle was never resolved.
    assert!(provider.scratch_entries().is_empty());
    assert!(!provider.path_of("out.yuv").exists());
}

#[test]
fn staged_output_matches_local_path_output() {
    let dir = tempfile::tempdir().unwrap();
    let provider = DirProvider::new(dir.path());
    encode_mpeg1_clip(&provider.path_of("clip.m1v"), 2, 64, 48);

    yuv_pipeline::decode_handles(&provider, "clip.m1v", "staged.yuv", None).unwrap();
    yuv_pipeline::decode_file(
        &provider.path_of("clip.m1v"),
        &provider.path_of("direct.yuv"),
        None,
    )
    .unwrap();

    assert_eq!(
        std::fs::read(provider.path_of("staged.yuv")).unwrap(),
        std::fs::read(provider.path_of("direct.yuv")).unwrap()
    );
}
