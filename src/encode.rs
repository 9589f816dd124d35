//! # 头部重写与像素编码模块

use crate::constants::{BYTES_PER_PIXEL, COMPRESSION_NONE, INFO_HEADER_SIZE, PIXEL_DATA_OFFSET};
use crate::error::Result;
use crate::header::{Headers, row_padding};
use crate::pixel::{PixelBuffer, RowOrder};
use std::io::{self, ErrorKind, Write};

/// 由输入头部推导输出头部。
///
/// 只重新计算像素偏移、文件大小、信息头大小和压缩方式，
/// 其余字段 (包括宽高的符号、分辨率、保留字段) 原样保留。
/// 输出不包含调色板，像素数据总是从第 54 字节开始。
///
/// # Errors
///
/// 缓冲区的尺寸与头部不一致，或输出文件大小超出 `u32` 范围时返回 `BmpError::Io`。
pub fn output_headers(input: &Headers, buffer: &PixelBuffer) -> Result<Headers> {
    check_dimensions(input, buffer)?;

    let stride = buffer.width() as u64 * BYTES_PER_PIXEL as u64 + row_padding(buffer.width()) as u64;
    let pixel_bytes = stride * buffer.height() as u64;
    let size = u32::try_from(u64::from(PIXEL_DATA_OFFSET) + pixel_bytes).map_err(|_| {
        io::Error::new(
            ErrorKind::InvalidInput,
            "The output image exceeds the 4 GiB limit of the BMP format.",
        )
    })?;

    let mut headers = *input;
    headers.file.offset = PIXEL_DATA_OFFSET;
    headers.file.size = size;
    headers.info.size = INFO_HEADER_SIZE;
    headers.info.compression = COMPRESSION_NONE;
    Ok(headers)
}

/// 依次写出文件头、信息头和所有像素行，每行之后补零到 4 字节对齐。
///
/// 若缓冲区按 `RowOrder::TopDown` 排列而文件为自下而上存储，
/// 写出时会再次反转行序，使输出字节与按存储顺序解码时完全相同。
pub fn encode<W: Write>(writer: &mut W, headers: &Headers, buffer: &PixelBuffer) -> Result<()> {
    check_dimensions(headers, buffer)?;

    headers.write_to(writer)?;

    let width = buffer.width();
    let height = buffer.height();
    let reverse = buffer.row_order() == RowOrder::TopDown && !headers.info.is_top_down();

    if height == 0 {
        return Ok(());
    }

    // 末尾的填充字节始终为零。宽度受已有像素数约束，这里不会溢出。
    let mut row_bytes = vec![0u8; width * BYTES_PER_PIXEL + row_padding(width)];

    for y in 0..height {
        let src_y = if reverse { height - 1 - y } else { y };
        for (bgr, pixel) in row_bytes
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(buffer.row(src_y))
        {
            bgr.copy_from_slice(&pixel.to_bgr());
        }
        writer.write_all(&row_bytes)?;
    }

    Ok(())
}

fn check_dimensions(headers: &Headers, buffer: &PixelBuffer) -> Result<()> {
    let matches = usize::try_from(headers.info.width).ok() == Some(buffer.width())
        && headers.info.row_count() as usize == buffer.height();
    if !matches {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!(
                "The pixel buffer is {}x{} but the headers describe {}x{}.",
                buffer.width(),
                buffer.height(),
                headers.info.width,
                headers.info.height
            ),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BMP_MAGIC;
    use crate::error::ErrorKind as BmpErrorKind;
    use crate::header::{FileHeader, InfoHeader};
    use crate::pixel::Pixel;

    fn input_headers(width: i32, height: i32) -> Headers {
        Headers {
            file: FileHeader {
                file_type: BMP_MAGIC,
                size: 12345,
                reserved1: 3,
                reserved2: 4,
                offset: 1078,
            },
            info: InfoHeader {
                size: 124,
                width,
                height,
                planes: 1,
                bit_count: 24,
                compression: 3,
                size_image: 777,
                x_pixels_per_meter: 3780,
                y_pixels_per_meter: 3779,
                colors_used: 256,
                colors_important: 16,
            },
        }
    }

    fn buffer(width: usize, height: usize, row_order: RowOrder) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| Pixel::new(i as u8, 100, 200))
            .collect();
        PixelBuffer::from_pixels(width, height, row_order, pixels).unwrap()
    }

    #[test]
    fn output_headers_recompute_only_layout_fields() {
        let input = input_headers(5, -3);

        let output = output_headers(&input, &buffer(5, 3, RowOrder::AsStored)).unwrap();

        assert_eq!(output.file.offset, 54);
        assert_eq!(output.file.size, 54 + 16 * 3);
        assert_eq!(output.info.size, 40);
        assert_eq!(output.info.compression, 0);

        assert_eq!(output.file.file_type, input.file.file_type);
        assert_eq!(output.file.reserved1, 3);
        assert_eq!(output.file.reserved2, 4);
        assert_eq!(output.info.height, -3);
        assert_eq!(output.info.size_image, 777);
        assert_eq!(output.info.x_pixels_per_meter, 3780);
        assert_eq!(output.info.colors_used, 256);
        assert_eq!(output.info.colors_important, 16);
    }

    #[test]
    fn file_size_matches_padded_rows() {
        for width in [1usize, 2, 3, 4, 5, 6, 100, 101] {
            let height = 7;
            let output = output_headers(
                &input_headers(width as i32, height as i32),
                &buffer(width, height, RowOrder::AsStored),
            )
            .unwrap();
            let expected = 54 + (width * 3 + row_padding(width)) * height;
            assert_eq!(output.file.size as usize, expected, "width {width}");
        }
    }

    #[test]
    fn encode_writes_headers_pixels_and_zero_padding() {
        let buffer = buffer(1, 2, RowOrder::AsStored);
        let headers = output_headers(&input_headers(1, 2), &buffer).unwrap();
        let mut out = Vec::new();

        encode(&mut out, &headers, &buffer).unwrap();

        assert_eq!(out.len() as u32, headers.file.size);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(&out[54..], &[0, 100, 200, 0, 1, 100, 200, 0]);
    }

    #[test]
    fn top_down_buffer_is_written_back_in_stored_order() {
        let buffer = buffer(1, 2, RowOrder::TopDown);
        let headers = output_headers(&input_headers(1, 2), &buffer).unwrap();
        let mut out = Vec::new();

        encode(&mut out, &headers, &buffer).unwrap();

        assert_eq!(&out[54..], &[1, 100, 200, 0, 0, 100, 200, 0]);
    }

    #[test]
    fn zero_height_writes_headers_only() {
        let buffer = PixelBuffer::from_pixels(1 << 30, 0, RowOrder::AsStored, Vec::new()).unwrap();
        let headers = output_headers(&input_headers(1 << 30, 0), &buffer).unwrap();
        let mut out = Vec::new();

        encode(&mut out, &headers, &buffer).unwrap();

        assert_eq!(out.len(), 54);
        assert_eq!(headers.file.size, 54);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = output_headers(&input_headers(2, 2), &buffer(1, 2, RowOrder::AsStored))
            .unwrap_err();
        assert_eq!(err.kind(), BmpErrorKind::Io);
    }

    #[test]
    fn write_failures_are_io_errors() {
        let buffer = buffer(2, 2, RowOrder::AsStored);
        let headers = output_headers(&input_headers(2, 2), &buffer).unwrap();
        let mut out = [0u8; 60];

        let err = encode(&mut &mut out[..], &headers, &buffer).unwrap_err();

        assert_eq!(err.kind(), BmpErrorKind::Io);
    }
}
