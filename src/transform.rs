//! # 颜色反转模块
//!
//! 对像素缓冲区逐个像素进行原地的颜色取反。

use crate::pixel::Pixel;

/// 原地反转每个像素的颜色通道。
///
/// 对同一缓冲区调用两次会恢复原始像素值。
pub fn invert_colors(pixels: &mut [Pixel]) {
    for pixel in pixels.iter_mut() {
        *pixel = pixel.inverted();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverts_every_channel() {
        let mut pixels = vec![
            Pixel::new(0, 0, 0),
            Pixel::new(255, 255, 255),
            Pixel::new(10, 20, 30),
            Pixel::new(200, 100, 50),
        ];

        invert_colors(&mut pixels);

        assert_eq!(
            pixels,
            vec![
                Pixel::new(255, 255, 255),
                Pixel::new(0, 0, 0),
                Pixel::new(245, 235, 225),
                Pixel::new(55, 155, 205),
            ]
        );
    }

    #[test]
    fn inversion_is_involutive_for_every_channel_value() {
        let original: Vec<Pixel> = (0..=255u8)
            .map(|c| Pixel::new(c, c.wrapping_add(85), c.wrapping_add(170)))
            .collect();
        let mut pixels = original.clone();

        invert_colors(&mut pixels);
        assert_ne!(pixels, original);
        invert_colors(&mut pixels);

        assert_eq!(pixels, original);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut pixels: Vec<Pixel> = Vec::new();
        invert_colors(&mut pixels);
        assert!(pixels.is_empty());
    }
}
