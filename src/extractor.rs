//! The frame extraction loop.
//!
//! [`FrameExtractor`] ties the pieces together: ensure the output directory
//! exists, open the source, pull frames in decode order, and write each one
//! to a sequentially numbered image file.
//!
//! # Example
//!
//! ```no_run
//! use framedump::{ExtractError, FrameExtractor, OutputConfig};
//!
//! let extractor = FrameExtractor::new(OutputConfig::new("frames"));
//! let summary = extractor.extract("data/videos/clip.mp4")?;
//! println!("Extracted {} frames.", summary.frames_written);
//! # Ok::<(), ExtractError>(())
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{DecodeErrorPolicy, OutputConfig},
    error::ExtractError,
    reader::{DecodeStep, FrameReader},
    source::VideoSource,
};

/// The result of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Number of image files written. Equal to the final frame index.
    pub frames_written: u64,
    /// The directory the files were written into.
    pub output_dir: PathBuf,
}

/// Extracts every frame of a video to numbered image files.
///
/// An unusable input (missing file, unreadable file, no video stream, a
/// stream the decoder cannot be set up for) is not an error: the run
/// degrades to an empty output directory and a count of zero, matching the
/// historical contract of this tool. Mid-stream decode
/// failures follow the configured [`DecodeErrorPolicy`]. Filesystem write
/// failures always propagate.
#[derive(Debug, Clone, Default)]
pub struct FrameExtractor {
    output: OutputConfig,
    on_decode_error: DecodeErrorPolicy,
}

impl FrameExtractor {
    /// Create an extractor writing frames per the given output configuration.
    pub fn new(output: OutputConfig) -> Self {
        Self {
            output,
            on_decode_error: DecodeErrorPolicy::default(),
        }
    }

    /// Set how mid-stream decode errors are treated.
    #[must_use]
    pub fn with_decode_error_policy(mut self, policy: DecodeErrorPolicy) -> Self {
        self.on_decode_error = policy;
        self
    }

    /// The output configuration this extractor writes with.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Extract all frames of the video at `path`.
    ///
    /// The output directory is created first (idempotent), so it exists even
    /// for a zero-frame run. Frame `i` is written to
    /// [`OutputConfig::frame_path`]`(i)`; pre-existing same-named files are
    /// overwritten. The source is released when this returns, whether any
    /// frames were decoded or not.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::IoError`] if the output directory cannot be created.
    /// - [`ExtractError::ImageError`] / [`ExtractError::IoError`] if a frame
    ///   cannot be written.
    /// - [`ExtractError::DecodeError`] on a mid-stream decode failure, only
    ///   under [`DecodeErrorPolicy::Fail`].
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionSummary, ExtractError> {
        self.extract_with_progress(path, |_| {})
    }

    /// Like [`extract`](FrameExtractor::extract), invoking `on_frame` after
    /// each frame is written with the number of frames written so far
    /// (1 after the first frame).
    pub fn extract_with_progress<P, F>(
        &self,
        path: P,
        mut on_frame: F,
    ) -> Result<ExtractionSummary, ExtractError>
    where
        P: AsRef<Path>,
        F: FnMut(u64),
    {
        let path = path.as_ref();

        fs::create_dir_all(&self.output.directory)?;

        // Missing, unreadable, and stream-less inputs all degrade to an
        // empty run rather than an error, as does a stream the decoder
        // cannot be set up for (e.g. no pixel format in the parameters).
        let mut source = match VideoSource::open(path) {
            Ok(source) => source,
            Err(error) => {
                log::warn!("{}: {error}; extracting 0 frames", path.display());
                return Ok(ExtractionSummary {
                    frames_written: 0,
                    output_dir: self.output.directory.clone(),
                });
            }
        };

        let mut reader = match FrameReader::new(&mut source) {
            Ok(reader) => reader,
            Err(error) => {
                log::warn!(
                    "{}: decoder setup failed: {error}; extracting 0 frames",
                    path.display(),
                );
                return Ok(ExtractionSummary {
                    frames_written: 0,
                    output_dir: self.output.directory.clone(),
                });
            }
        };
        let mut index: u64 = 0;

        loop {
            match reader.read_step() {
                DecodeStep::Frame(image) => {
                    let frame_path = self.output.frame_path(index);
                    image.save(&frame_path)?;
                    log::debug!("Wrote {}", frame_path.display());
                    index += 1;
                    on_frame(index);
                }
                DecodeStep::EndOfStream => break,
                DecodeStep::Failed(reason) => match self.on_decode_error {
                    DecodeErrorPolicy::StopQuietly => {
                        log::warn!(
                            "Decode stopped after {index} frames: {reason}; treating as end of stream"
                        );
                        break;
                    }
                    DecodeErrorPolicy::Fail => {
                        return Err(ExtractError::DecodeError(reason));
                    }
                },
            }
        }

        log::info!(
            "Extracted {index} frames from {} into {}",
            path.display(),
            self.output.directory.display(),
        );

        Ok(ExtractionSummary {
            frames_written: index,
            output_dir: self.output.directory.clone(),
        })
    }
}
