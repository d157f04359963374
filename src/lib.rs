//! # framedump
//!
//! Dump every frame of a video file to sequentially numbered image files.
//!
//! `framedump` decodes a video strictly in stream order, powered by FFmpeg
//! via the [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate, and
//! writes each frame as an independent image (JPEG by default) named
//! `frame_0000.jpg`, `frame_0001.jpg`, … so that lexicographic filename
//! order equals decode order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framedump::{ExtractError, FrameExtractor, OutputConfig};
//!
//! let extractor = FrameExtractor::new(OutputConfig::new("frames"));
//! let summary = extractor.extract("data/videos/clip.mp4")?;
//! println!("Extracted {} frames.", summary.frames_written);
//! # Ok::<(), ExtractError>(())
//! ```
//!
//! ## Streaming access
//!
//! For per-frame control, open a [`VideoSource`] and pull frames through a
//! [`FrameReader`]:
//!
//! ```no_run
//! use framedump::{ExtractError, FrameReader, VideoSource};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! for frame in FrameReader::new(&mut source)? {
//!     let image = frame?;
//!     // ...
//! }
//! # Ok::<(), ExtractError>(())
//! ```
//!
//! ## Failure posture
//!
//! A missing or unreadable input — or one whose decoder cannot be set up —
//! is not an error: [`FrameExtractor::extract`] still creates the output
//! directory and reports zero frames. By default a
//! mid-stream decode failure is likewise treated as end-of-stream; opt into
//! hard failures with [`DecodeErrorPolicy::Fail`]. Filesystem write failures
//! always propagate.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod config;
mod convert;
pub mod error;
pub mod extractor;
pub mod ffmpeg_log;
pub mod reader;
pub mod source;

pub use config::{DecodeErrorPolicy, OutputConfig};
pub use error::ExtractError;
pub use extractor::{ExtractionSummary, FrameExtractor};
pub use ffmpeg_log::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use reader::{DecodeStep, FrameReader};
pub use source::{SourceInfo, VideoSource, resolve_input};
