//! Opening video inputs and resolving input paths.
//!
//! [`VideoSource`] wraps an FFmpeg demuxer context opened on a video file and
//! caches lightweight stream information. [`resolve_input`] implements the
//! conventional input-path lookup: a `data/videos/` subdirectory is preferred,
//! with a fall back to the bare path for backward compatibility.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{codec::context::Context as CodecContext, media::Type};

use crate::error::ExtractError;

/// Subdirectory preferred by [`resolve_input`].
pub const PREFERRED_VIDEO_DIR: &str = "data/videos";

/// Resolve an input name to a concrete path under `root`.
///
/// Prefers `<root>/data/videos/<name>` when that file exists; otherwise falls
/// back to `<root>/<name>` (the legacy flat layout). Absolute names are
/// returned unchanged.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// use framedump::resolve_input;
///
/// // With no data/videos/clip.mp4 present, the flat path wins.
/// let path = resolve_input(Path::new("."), "clip.mp4");
/// assert_eq!(path, Path::new("./clip.mp4"));
/// ```
pub fn resolve_input(root: &Path, name: &str) -> PathBuf {
    let name_path = Path::new(name);
    if name_path.is_absolute() {
        return name_path.to_path_buf();
    }

    let preferred = root.join(PREFERRED_VIDEO_DIR).join(name);
    if preferred.exists() {
        log::debug!("Resolved input {name:?} to {}", preferred.display());
        return preferred;
    }

    root.join(name)
}

/// Lightweight information about the opened video stream.
///
/// Extracted once during [`VideoSource::open`] without decoding any frames.
/// `frame_count` is an estimate derived from container duration and average
/// frame rate; the actual number of decodable frames is only known after a
/// full decode pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Average frames per second, or 0.0 when the container does not say.
    pub frames_per_second: f64,
    /// Estimated total frame count, or 0 when it cannot be estimated.
    pub frame_count: u64,
    /// Container duration.
    pub duration: Duration,
}

/// An opened video file, positioned at the start of its stream.
///
/// Created via [`VideoSource::open`]. The underlying demuxer and decoder
/// resources are released when the source is dropped. Obtain a
/// [`FrameReader`](crate::FrameReader) to pull decoded frames in order.
pub struct VideoSource {
    /// The opened FFmpeg input (demuxer) context.
    pub(crate) input_context: ffmpeg_next::format::context::Input,
    /// Index of the best video stream.
    pub(crate) video_stream_index: usize,
    /// Cached stream information.
    pub(crate) info: SourceInfo,
    /// Path the source was opened from (kept for error messages).
    pub(crate) path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("path", &self.path)
            .field("video_stream_index", &self.video_stream_index)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for sequential frame decoding.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, and locates the best
    /// video stream.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::FileOpen`] if the file cannot be opened.
    /// - [`ExtractError::NoVideoStream`] if it contains no video stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use framedump::{ExtractError, VideoSource};
    ///
    /// let source = VideoSource::open("input.mp4")?;
    /// println!("{}x{}", source.info().width, source.info().height);
    /// # Ok::<(), ExtractError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening video file: {}", path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| ExtractError::FileOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| ExtractError::FileOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let video_stream_index = input_context
            .streams()
            .best(Type::Video)
            .map(|stream| stream.index())
            .ok_or(ExtractError::NoVideoStream)?;

        let stream = input_context
            .stream(video_stream_index)
            .ok_or(ExtractError::NoVideoStream)?;

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| ExtractError::FileOpen {
                path: path.clone(),
                reason: format!("Failed to read video codec parameters: {error}"),
            })?;
        let video_decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| ExtractError::FileOpen {
                    path: path.clone(),
                    reason: format!("Failed to create video decoder: {error}"),
                })?;

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        // Average frame rate, falling back to the stream's rate field.
        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        let frame_count = if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let info = SourceInfo {
            width: video_decoder.width(),
            height: video_decoder.height(),
            frames_per_second,
            frame_count,
            duration,
        };

        log::info!(
            "Opened video: {} ({}x{}, {:.2} fps, ~{} frames)",
            path.display(),
            info.width,
            info.height,
            info.frames_per_second,
            info.frame_count,
        );

        Ok(Self {
            input_context,
            video_stream_index,
            info,
            path,
        })
    }

    /// Cached information about the opened video stream.
    pub fn info(&self) -> &SourceInfo {
        &self.info
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_path_used_when_preferred_location_is_absent() {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let resolved = resolve_input(root.path(), "clip.mp4");
        assert_eq!(resolved, root.path().join("clip.mp4"));
    }

    #[test]
    fn preferred_location_wins_when_both_exist() {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let nested = root.path().join(PREFERRED_VIDEO_DIR);
        std::fs::create_dir_all(&nested).expect("Failed to create nested dir");
        std::fs::write(nested.join("clip.mp4"), b"nested").expect("Failed to write nested file");
        std::fs::write(root.path().join("clip.mp4"), b"flat").expect("Failed to write flat file");

        let resolved = resolve_input(root.path(), "clip.mp4");
        assert_eq!(resolved, nested.join("clip.mp4"));
    }

    #[test]
    fn absolute_path_passes_through() {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let absolute = root.path().join("somewhere.mp4");
        let resolved = resolve_input(Path::new("/unrelated"), absolute.to_str().unwrap());
        assert_eq!(resolved, absolute);
    }
}
