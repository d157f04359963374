//! Extraction integration tests.
//!
//! Tests that need a real video are gated on the presence of
//! `tests/fixtures/sample_video.mp4` and skip silently when it is absent.
//! The degraded-input behaviour (missing or invalid files) needs no fixture.

use std::{fs, path::Path};

use framedump::{DecodeErrorPolicy, ExtractError, FrameExtractor, OutputConfig};

const FIXTURE: &str = "tests/fixtures/sample_video.mp4";
/// A structurally valid container whose video stream holds zero frames.
const EMPTY_FIXTURE: &str = "tests/fixtures/sample_empty.mp4";
/// A container that opens cleanly but whose stream fails to decode partway
/// through (corrupted packet data after the first frames).
const CORRUPT_FIXTURE: &str = "tests/fixtures/sample_corrupt_midstream.mp4";
/// A container that opens cleanly but whose stream parameters carry no pixel
/// format, so decoder setup fails before the first frame.
const NO_PIXFMT_FIXTURE: &str = "tests/fixtures/sample_missing_pixfmt.mkv";

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn nonexistent_input_yields_zero_frames_and_creates_directory() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let out = temp.path().join("frames");

    let extractor = FrameExtractor::new(OutputConfig::new(&out));
    let summary = extractor
        .extract(temp.path().join("does_not_exist.mp4"))
        .expect("Degraded run should not error");

    assert_eq!(summary.frames_written, 0);
    assert_eq!(summary.output_dir, out);
    assert!(out.is_dir(), "Output directory should be created regardless");
    assert!(file_names(&out).is_empty());
}

#[test]
fn invalid_input_degrades_even_in_strict_mode() {
    // Strict mode hardens mid-stream decode errors only; an unopenable
    // input still degrades to a zero-frame run.
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let garbage = temp.path().join("garbage.mp4");
    fs::write(&garbage, b"this is not a media file").expect("Failed to write garbage file");

    let extractor = FrameExtractor::new(OutputConfig::new(temp.path().join("frames")))
        .with_decode_error_policy(DecodeErrorPolicy::Fail);
    let summary = extractor.extract(&garbage).expect("Degraded run should not error");

    assert_eq!(summary.frames_written, 0);
}

#[test]
fn output_directory_creation_is_idempotent_and_nondestructive() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let out = temp.path().join("frames");
    fs::create_dir_all(&out).expect("Failed to pre-create output dir");
    fs::write(out.join("unrelated.txt"), b"keep me").expect("Failed to write marker file");

    let extractor = FrameExtractor::new(OutputConfig::new(&out));
    let missing = temp.path().join("missing.mp4");
    extractor.extract(&missing).expect("First run failed");
    extractor.extract(&missing).expect("Second run failed");

    assert!(
        out.join("unrelated.txt").exists(),
        "Pre-existing content must never be cleared",
    );
}

#[test]
fn zero_frame_video_behaves_like_nonexistent_input() {
    if !Path::new(EMPTY_FIXTURE).exists() {
        return;
    }

    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let out = temp.path().join("frames");

    let extractor = FrameExtractor::new(OutputConfig::new(&out));
    let summary = extractor.extract(EMPTY_FIXTURE).expect("Empty video should not error");

    assert_eq!(summary.frames_written, 0);
    assert!(out.is_dir(), "Output directory should be created regardless");
    assert!(file_names(&out).is_empty());
}

#[test]
fn decoder_setup_failure_degrades_to_zero_frames() {
    if !Path::new(NO_PIXFMT_FIXTURE).exists() {
        return;
    }

    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let out = temp.path().join("frames");

    let extractor = FrameExtractor::new(OutputConfig::new(&out));
    let summary = extractor
        .extract(NO_PIXFMT_FIXTURE)
        .expect("Decoder setup failure should degrade, not error");

    assert_eq!(summary.frames_written, 0);
    assert!(out.is_dir(), "Output directory should be created regardless");
    assert!(file_names(&out).is_empty());
}

#[test]
fn strict_mode_surfaces_mid_stream_decode_failure() {
    if !Path::new(CORRUPT_FIXTURE).exists() {
        return;
    }

    let temp = tempfile::tempdir().expect("Failed to create temp dir");

    let strict = FrameExtractor::new(OutputConfig::new(temp.path().join("strict")))
        .with_decode_error_policy(DecodeErrorPolicy::Fail);
    let result = strict.extract(CORRUPT_FIXTURE);
    assert!(
        matches!(result, Err(ExtractError::DecodeError(_))),
        "Strict mode must fail hard on a mid-stream decode error: {result:?}",
    );

    // The default policy keeps the frames decoded before the failure.
    let quiet = FrameExtractor::new(OutputConfig::new(temp.path().join("quiet")));
    let summary = quiet
        .extract(CORRUPT_FIXTURE)
        .expect("Default policy should treat the failure as end of stream");
    assert_eq!(
        file_names(&summary.output_dir).len() as u64,
        summary.frames_written,
    );
}

#[test]
fn extracts_every_frame_with_zero_padded_names() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let out = temp.path().join("frames");

    let extractor = FrameExtractor::new(OutputConfig::new(&out));
    let summary = extractor.extract(FIXTURE).expect("Extraction failed");

    assert!(summary.frames_written > 0, "Fixture should contain frames");

    let names = file_names(&out);
    assert_eq!(names.len() as u64, summary.frames_written);

    // Lexicographic order equals decode order via the zero-padded index.
    for (index, name) in names.iter().enumerate() {
        assert_eq!(name, &format!("frame_{index:04}.jpg"));
    }
}

#[test]
fn rerun_overwrites_rather_than_accumulates() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let out = temp.path().join("frames");
    let extractor = FrameExtractor::new(OutputConfig::new(&out));

    let first = extractor.extract(FIXTURE).expect("First run failed");
    let second = extractor.extract(FIXTURE).expect("Second run failed");

    assert_eq!(first.frames_written, second.frames_written);
    assert_eq!(
        file_names(&out).len() as u64,
        second.frames_written,
        "File count must equal the latest run's frame count, not cumulative",
    );
}

#[test]
fn progress_callback_sees_every_frame() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let extractor = FrameExtractor::new(OutputConfig::new(temp.path().join("frames")));

    let mut last_seen = 0u64;
    let summary = extractor
        .extract_with_progress(FIXTURE, |index| last_seen = index)
        .expect("Extraction failed");

    assert_eq!(last_seen, summary.frames_written);
}
