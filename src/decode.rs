//! # 像素解码模块
//!
//! 根据已校验的头部，将磁盘上带填充的像素行读入不含填充的内存缓冲区。

use crate::constants::{BYTES_PER_PIXEL, DEFAULT_MAX_PIXELS};
use crate::error::{BmpError, Result};
use crate::header::{Headers, row_padding};
use crate::pixel::{Pixel, PixelBuffer, RowOrder};
use std::io::{Read, Seek, SeekFrom};

/// 解码选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// 为 `true` 时，缓冲区第 0 行总是图像的最顶行：
    /// 自下而上存储 (`height` 为正) 的文件会在读取时反转行序。
    /// 为 `false` 时按文件中的存储顺序放置各行，忽略 `height` 的符号。
    pub honor_row_order: bool,

    /// 允许分配的最大像素数 (`width * height`)。
    pub max_pixels: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            honor_row_order: false,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// 读取全部像素行。
///
/// 无论流当前位于何处，都会先绝对定位到 `FileHeader.offset`，
/// 信息头与该偏移之间的字节 (例如调色板) 被直接跳过。
/// 每读完一行，流以相对定位跳过该行的填充字节而不读取它们，
/// 对 `BufReader` 而言这不会丢弃其内部缓冲区。
///
/// # Errors
///
/// * 宽度为负、像素数溢出或超过 `max_pixels`、或内存分配失败时返回
///   `BmpError::Allocation`。
/// * 任何一次像素读取不完整时返回 `BmpError::Io`。
pub fn decode_pixels<R: Read + Seek>(
    reader: &mut R,
    headers: &Headers,
    options: &DecodeOptions,
) -> Result<PixelBuffer> {
    let info = &headers.info;
    let alloc_error = |reason: String| BmpError::Allocation {
        width: info.width,
        height: info.height,
        reason,
    };

    let width = usize::try_from(info.width)
        .map_err(|_| alloc_error("the width is negative".to_string()))?;
    let height = info.row_count() as usize;

    // 宽和高各自也要受限：高为 0 时像素总数为 0，无法约束宽度。
    if width as u64 > options.max_pixels || height as u64 > options.max_pixels {
        return Err(alloc_error(format!(
            "a side exceeds the limit of {} pixels",
            options.max_pixels
        )));
    }
    let row_len = width
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(|| alloc_error("the row length overflows".to_string()))?;
    let count = width
        .checked_mul(height)
        .filter(|count| count.checked_mul(BYTES_PER_PIXEL).is_some())
        .ok_or_else(|| alloc_error("the pixel count overflows".to_string()))?;
    if count as u64 > options.max_pixels {
        return Err(alloc_error(format!(
            "{count} pixels exceed the limit of {}",
            options.max_pixels
        )));
    }

    let mut pixels: Vec<Pixel> = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|e| alloc_error(e.to_string()))?;
    pixels.resize(count, Pixel::default());

    let reverse = options.honor_row_order && !info.is_top_down();
    let padding = row_padding(width) as i64;
    let mut row_bytes: Vec<u8> = Vec::new();
    if count > 0 {
        row_bytes
            .try_reserve_exact(row_len)
            .map_err(|e| alloc_error(e.to_string()))?;
        row_bytes.resize(row_len, 0);
    }

    reader.seek(SeekFrom::Start(u64::from(headers.file.offset)))?;

    for y in 0..height {
        reader.read_exact(&mut row_bytes)?;

        let dest_y = if reverse { height - 1 - y } else { y };
        let dest = &mut pixels[dest_y * width..(dest_y + 1) * width];
        for (pixel, bgr) in dest.iter_mut().zip(row_bytes.chunks_exact(BYTES_PER_PIXEL)) {
            *pixel = Pixel::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }

        reader.seek_relative(padding)?;
    }

    let row_order = if options.honor_row_order {
        RowOrder::TopDown
    } else {
        RowOrder::AsStored
    };

    PixelBuffer::from_pixels(width, height, row_order, pixels)
        .ok_or_else(|| alloc_error("the buffer size does not match the dimensions".to_string()))
}
