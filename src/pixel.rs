//! # 像素与像素缓冲区模块
//!
//! `Pixel` 按磁盘上的 BGR 顺序保存一个 24 位像素；`PixelBuffer` 独占整幅不含填充的图像，
//! 由解码阶段填充、反转阶段原地修改、编码阶段读取。

/// 24 位 BMP 的单个像素，字段顺序与磁盘上的 BGR 字节顺序一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Pixel {
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self { blue, green, red }
    }

    pub fn from_bgr(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    pub fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    /// 将每个通道 `c` 变换为 `255 - c`。
    pub fn inverted(self) -> Self {
        Self::new(255 - self.blue, 255 - self.green, 255 - self.red)
    }
}

/// 缓冲区中各行的排列方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// 第 0 行是文件中存储的第一行，与 `height` 的符号无关。
    #[default]
    AsStored,
    /// 第 0 行是图像视觉上的最顶行。
    TopDown,
}

/// 逻辑 (不含填充) 图像，按行主序存放，下标为 `y * width + x`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    row_order: RowOrder,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// 由已有像素构造缓冲区，像素数量必须等于 `width * height`。
    pub fn from_pixels(
        width: usize,
        height: usize,
        row_order: RowOrder,
        pixels: Vec<Pixel>,
    ) -> Option<Self> {
        (width.checked_mul(height)? == pixels.len()).then_some(Self {
            width,
            height,
            row_order,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    pub fn row(&self, y: usize) -> &[Pixel] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_checks_length() {
        assert!(PixelBuffer::from_pixels(2, 2, RowOrder::AsStored, vec![Pixel::default(); 3]).is_none());
        assert!(PixelBuffer::from_pixels(usize::MAX, 2, RowOrder::AsStored, Vec::new()).is_none());

        let buffer =
            PixelBuffer::from_pixels(2, 2, RowOrder::TopDown, vec![Pixel::default(); 4]).unwrap();
        assert_eq!(buffer.row_order(), RowOrder::TopDown);
    }

    #[test]
    fn indexing_is_row_major() {
        let pixels = (0..6u8).map(|i| Pixel::new(i, 0, 0)).collect();
        let buffer = PixelBuffer::from_pixels(3, 2, RowOrder::AsStored, pixels).unwrap();

        assert_eq!(buffer.get(2, 0), Some(Pixel::new(2, 0, 0)));
        assert_eq!(buffer.get(0, 1), Some(Pixel::new(3, 0, 0)));
        assert_eq!(buffer.get(3, 0), None);
        assert_eq!(buffer.get(0, 2), None);
        assert_eq!(buffer.row(1).len(), 3);
    }

    #[test]
    fn bgr_byte_order() {
        let pixel = Pixel::from_bgr([10, 20, 30]);
        assert_eq!(pixel.blue, 10);
        assert_eq!(pixel.red, 30);
        assert_eq!(pixel.to_bgr(), [10, 20, 30]);
        assert_eq!(pixel.inverted(), Pixel::new(245, 235, 225));
    }
}
