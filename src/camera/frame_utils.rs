//! Frame transformation utilities.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};

use super::types::{Frame, Resolution};

/// Resize a frame to `target` with bilinear filtering.
///
/// Channel order is preserved, so BGR stays BGR. Returns `None` for a zero
/// target size or a frame whose buffer doesn't match its dimensions.
pub fn resize_frame(frame: &Frame, target: Resolution) -> Option<Frame> {
    if target.width == 0 || target.height == 0 {
        return None;
    }
    if frame.resolution() == target {
        return Some(frame.clone());
    }

    // `Rgb<u8>` is just a 3-byte pixel here; the filter doesn't care about order.
    let source: ImageBuffer<Rgb<u8>, &[u8]> =
        ImageBuffer::from_raw(frame.width, frame.height, frame.data.as_slice())?;
    let resized = imageops::resize(&source, target.width, target.height, FilterType::Triangle);

    Some(Frame {
        data: resized.into_raw(),
        width: target.width,
        height: target.height,
        format: frame.format,
        timestamp: frame.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, bgr: [u8; 3]) -> Frame {
        let data = bgr
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Frame::from_bgr(width, height, data).unwrap()
    }

    #[test]
    fn test_resize_downscale_dimensions() {
        let frame = solid(1280, 720, [10, 20, 30]);
        let resized = resize_frame(&frame, Resolution::VGA).unwrap();
        assert_eq!(resized.shape(), (480, 640, 3));
        assert_eq!(resized.data.len(), 480 * 640 * 3);
    }

    #[test]
    fn test_resize_upscale_keeps_channel_order() {
        let frame = solid(2, 2, [255, 0, 7]);
        let resized = resize_frame(&frame, Resolution::new(5, 3)).unwrap();
        assert_eq!(resized.shape(), (3, 5, 3));
        for pixel in resized.data.chunks(3) {
            assert_eq!(pixel, &[255, 0, 7]);
        }
    }

    #[test]
    fn test_resize_same_size_is_copy() {
        let frame = solid(4, 4, [1, 2, 3]);
        let resized = resize_frame(&frame, Resolution::new(4, 4)).unwrap();
        assert_eq!(resized.data, frame.data);
        assert_eq!(resized.timestamp, frame.timestamp);
    }

    #[test]
    fn test_resize_rejects_zero_target() {
        let frame = solid(4, 4, [1, 2, 3]);
        assert!(resize_frame(&frame, Resolution::new(0, 4)).is_none());
        assert!(resize_frame(&frame, Resolution::new(4, 0)).is_none());
    }

    #[test]
    fn test_resize_rejects_short_buffer() {
        let mut frame = solid(4, 4, [1, 2, 3]);
        frame.data.truncate(10);
        assert!(resize_frame(&frame, Resolution::new(2, 2)).is_none());
    }
}
