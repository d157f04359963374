//! Conversion from FFmpeg frame planes to `image` buffers.

use ffmpeg_next::frame::Video as VideoFrame;
use image::{DynamicImage, RgbImage};

use crate::error::ExtractError;

/// Copy pixel data from an RGB24 FFmpeg frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3); this
/// strips it so the result can be passed to [`RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        // No padding — copy the entire plane at once.
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        // Stride includes padding bytes — copy row by row.
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Build a [`DynamicImage`] from an RGB24 FFmpeg frame.
pub(crate) fn frame_to_image(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Result<DynamicImage, ExtractError> {
    let buffer = frame_to_rgb_buffer(video_frame, width, height);
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        ExtractError::DecodeError(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })?;
    Ok(DynamicImage::ImageRgb8(image))
}
