//! Sequential pull-based frame decoding.
//!
//! [`FrameReader`] decodes frames strictly in stream order — each call to
//! [`read_step`](FrameReader::read_step) reads just enough packets to produce
//! the next frame, so the whole video is never buffered in memory. The
//! outcome of a step is a [`DecodeStep`], which keeps end-of-stream and
//! mid-stream decode failure apart so the caller can decide how to treat the
//! latter.
//!
//! # Example
//!
//! ```no_run
//! use framedump::{DecodeStep, ExtractError, FrameReader, VideoSource};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let mut reader = FrameReader::new(&mut source)?;
//! let mut count = 0u64;
//! loop {
//!     match reader.read_step() {
//!         DecodeStep::Frame(image) => {
//!             image.save(format!("frame_{count:04}.jpg"))?;
//!             count += 1;
//!         }
//!         DecodeStep::EndOfStream | DecodeStep::Failed(_) => break,
//!     }
//! }
//! # Ok::<(), ExtractError>(())
//! ```

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::DynamicImage;

use crate::{convert, error::ExtractError, source::VideoSource};

/// The outcome of one decode step.
///
/// The underlying libraries do not always distinguish a truncated stream from
/// a clean end, but where they do, this enum preserves the difference.
#[derive(Debug)]
pub enum DecodeStep {
    /// The next frame, in decode order, converted to RGB8.
    Frame(DynamicImage),
    /// The stream is exhausted and the decoder fully drained.
    EndOfStream,
    /// Decoding failed mid-stream. No further frames will be produced.
    Failed(String),
}

/// A pull-based reader over every frame of a [`VideoSource`].
///
/// The reader borrows the source mutably, so nothing else can advance the
/// stream while it is alive. Frames are yielded strictly in decode order;
/// there is no seeking and no read-ahead.
pub struct FrameReader<'a> {
    source: &'a mut VideoSource,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    width: u32,
    height: u32,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    done: bool,
}

impl<'a> FrameReader<'a> {
    /// Create a reader positioned at the start of the video stream.
    ///
    /// Builds a fresh decoder from the stream parameters and a pixel-format
    /// converter (source format → RGB24) at the source resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::FfmpegError`] if the decoder or scaler cannot
    /// be constructed, or [`ExtractError::NoVideoStream`] if the stream has
    /// disappeared from the context.
    pub fn new(source: &'a mut VideoSource) -> Result<Self, ExtractError> {
        let stream = source
            .input_context
            .stream(source.video_stream_index)
            .ok_or(ExtractError::NoVideoStream)?;
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();
        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        Ok(Self {
            source,
            decoder,
            scaler,
            width,
            height,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            done: false,
        })
    }

    /// Decode the next frame, or report why there is none.
    ///
    /// Once [`DecodeStep::EndOfStream`] or [`DecodeStep::Failed`] has been
    /// returned, every subsequent call returns [`DecodeStep::EndOfStream`].
    pub fn read_step(&mut self) -> DecodeStep {
        if self.done {
            return DecodeStep::EndOfStream;
        }

        loop {
            // Drain any frame the decoder has already produced.
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                match self.convert_current_frame() {
                    Ok(image) => return DecodeStep::Frame(image),
                    Err(error) => {
                        self.done = true;
                        return DecodeStep::Failed(error.to_string());
                    }
                }
            }

            // Decoder has no buffered frames left. Feed it more packets.
            if self.eof_sent {
                self.done = true;
                return DecodeStep::EndOfStream;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.source.input_context) {
                Ok(()) => {
                    if packet.stream() != self.source.video_stream_index {
                        // Non-video packets are silently skipped.
                        continue;
                    }
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        self.done = true;
                        return DecodeStep::Failed(error.to_string());
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        self.done = true;
                        return DecodeStep::Failed(error.to_string());
                    }
                    self.eof_sent = true;
                }
                Err(error) => {
                    self.done = true;
                    return DecodeStep::Failed(error.to_string());
                }
            }
        }
    }

    /// Scale and convert the current `decoded_frame` to a `DynamicImage`.
    fn convert_current_frame(&mut self) -> Result<DynamicImage, ExtractError> {
        self.scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;
        convert::frame_to_image(&self.rgb_frame, self.width, self.height)
    }
}

/// Iterator adapter: yields frames until end-of-stream, surfacing mid-stream
/// decode failures as errors.
impl Iterator for FrameReader<'_> {
    type Item = Result<DynamicImage, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_step() {
            DecodeStep::Frame(image) => Some(Ok(image)),
            DecodeStep::EndOfStream => None,
            DecodeStep::Failed(reason) => Some(Err(ExtractError::DecodeError(reason))),
        }
    }
}
