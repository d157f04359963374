//! Output and decode-error configuration.
//!
//! The original frame-dump workflow hardcoded its output directory and
//! filename pattern. [`OutputConfig`] threads those as explicit settings
//! instead, and [`DecodeErrorPolicy`] lets the caller choose whether a
//! mid-stream decode error ends the run quietly or fails it.
//!
//! # Example
//!
//! ```
//! use framedump::OutputConfig;
//!
//! let config = OutputConfig::new("frames");
//! assert_eq!(config.filename(7), "frame_0007.jpg");
//! assert_eq!(config.frame_path(7), std::path::Path::new("frames/frame_0007.jpg"));
//! ```

use std::path::{Path, PathBuf};

/// How the extraction loop reacts to a mid-stream decode error.
///
/// FFmpeg does not always distinguish a truncated or corrupt stream from a
/// clean end-of-stream, and the historical contract of this tool treats the
/// two identically. [`Fail`](DecodeErrorPolicy::Fail) opts into hard errors
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeErrorPolicy {
    /// Treat a decode error like end-of-stream: keep the frames written so
    /// far and report their count. This is the default.
    #[default]
    StopQuietly,
    /// Abort the run with [`ExtractError::DecodeError`](crate::ExtractError::DecodeError).
    Fail,
}

/// Where extracted frames go and what they are called.
///
/// Frame `i` is written to `<directory>/<prefix><i:0index_width><.extension>`,
/// so the defaults produce `frames/frame_0000.jpg`, `frames/frame_0001.jpg`,
/// and so on. Zero-padding keeps lexicographic filename order equal to decode
/// order for up to `10^index_width` frames.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory frames are written into. Created if absent, never cleared;
    /// same-named files from a previous run are overwritten.
    pub directory: PathBuf,
    /// Filename prefix placed before the frame index.
    pub prefix: String,
    /// Zero-padded width of the frame index. Indices that need more digits
    /// widen naturally, which breaks lexicographic ordering past
    /// `10^index_width - 1` frames.
    pub index_width: usize,
    /// Image file extension. The encoder is chosen from it by the `image`
    /// crate, at that format's default quality.
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new("frames")
    }
}

impl OutputConfig {
    /// Create a configuration writing `frame_NNNN.jpg` files into `directory`.
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            prefix: "frame_".to_string(),
            index_width: 4,
            extension: "jpg".to_string(),
        }
    }

    /// Set the filename prefix.
    #[must_use]
    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the zero-padded index width. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_index_width(mut self, width: usize) -> Self {
        self.index_width = width.max(1);
        self
    }

    /// Set the image file extension (without the leading dot).
    #[must_use]
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    /// The filename for a given frame index, e.g. `frame_0042.jpg`.
    pub fn filename(&self, index: u64) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index,
            self.extension,
            width = self.index_width
        )
    }

    /// The full output path for a given frame index.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.directory.join(self.filename(index))
    }

    /// The configured output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
