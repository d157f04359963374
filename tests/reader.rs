//! Frame reader integration tests.
//!
//! Tests that decode real frames skip silently when the fixture video is
//! absent.

use std::path::Path;

use framedump::{DecodeStep, FrameReader, VideoSource};

const FIXTURE: &str = "tests/fixtures/sample_video.mp4";

#[test]
fn open_nonexistent_file() {
    let result = VideoSource::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video file"),
        "Error message should mention file open failure: {error_message}",
    );
}

#[test]
fn reader_yields_frames_then_end_of_stream() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let mut source = VideoSource::open(FIXTURE).expect("Failed to open fixture");
    let (width, height) = (source.info().width, source.info().height);
    let mut reader = FrameReader::new(&mut source).expect("Failed to create reader");

    let mut count = 0u64;
    loop {
        match reader.read_step() {
            DecodeStep::Frame(image) => {
                assert_eq!(image.width(), width);
                assert_eq!(image.height(), height);
                count += 1;
            }
            DecodeStep::EndOfStream => break,
            DecodeStep::Failed(reason) => panic!("Unexpected decode failure: {reason}"),
        }
    }
    assert!(count > 0, "Fixture should contain at least one frame");

    // The reader stays terminal once exhausted.
    assert!(matches!(reader.read_step(), DecodeStep::EndOfStream));
}

#[test]
fn iterator_adapter_matches_step_api() {
    if !Path::new(FIXTURE).exists() {
        return;
    }

    let mut source = VideoSource::open(FIXTURE).expect("Failed to open fixture");
    let mut reader = FrameReader::new(&mut source).expect("Failed to create reader");
    let via_steps = {
        let mut count = 0u64;
        while let DecodeStep::Frame(_) = reader.read_step() {
            count += 1;
        }
        count
    };

    let mut source = VideoSource::open(FIXTURE).expect("Failed to reopen fixture");
    let reader = FrameReader::new(&mut source).expect("Failed to create reader");
    let via_iterator = reader.filter_map(Result::ok).count() as u64;

    assert_eq!(via_steps, via_iterator);
}
