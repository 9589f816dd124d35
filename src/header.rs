//! # BMP 头部模块
//!
//! 负责 14 字节文件头与 40 字节信息头的读取、校验和写出。
//! 所有字段按声明顺序、按各自的自然宽度逐个以小端序序列化，
//! 不依赖任何内存中的结构体布局。

use crate::constants::{
    BMP_MAGIC, BYTES_PER_PIXEL, FILE_HEADER_SIZE, INFO_HEADER_SIZE, ROW_ALIGNMENT,
    SUPPORTED_BIT_COUNT,
};
use crate::error::{BmpError, FormatError, Result};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::io::{self, ErrorKind, Read, Write};

/// BITMAPFILEHEADER。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: u16,
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub offset: u32,
}

/// BITMAPINFOHEADER。
///
/// `height` 为正表示行自下而上存储，为负表示自上而下存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// 一对经过校验的头部。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headers {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl FileHeader {
    pub const SIZE: usize = FILE_HEADER_SIZE as usize;

    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        Self {
            file_type: LittleEndian::read_u16(&buf[0..2]),
            size: LittleEndian::read_u32(&buf[2..6]),
            reserved1: LittleEndian::read_u16(&buf[6..8]),
            reserved2: LittleEndian::read_u16(&buf[8..10]),
            offset: LittleEndian::read_u32(&buf[10..14]),
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.file_type)?;
        writer.write_u32::<LittleEndian>(self.size)?;
        writer.write_u16::<LittleEndian>(self.reserved1)?;
        writer.write_u16::<LittleEndian>(self.reserved2)?;
        writer.write_u32::<LittleEndian>(self.offset)
    }
}

impl InfoHeader {
    pub const SIZE: usize = INFO_HEADER_SIZE as usize;

    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        Self {
            size: LittleEndian::read_u32(&buf[0..4]),
            width: LittleEndian::read_i32(&buf[4..8]),
            height: LittleEndian::read_i32(&buf[8..12]),
            planes: LittleEndian::read_u16(&buf[12..14]),
            bit_count: LittleEndian::read_u16(&buf[14..16]),
            compression: LittleEndian::read_u32(&buf[16..20]),
            size_image: LittleEndian::read_u32(&buf[20..24]),
            x_pixels_per_meter: LittleEndian::read_i32(&buf[24..28]),
            y_pixels_per_meter: LittleEndian::read_i32(&buf[28..32]),
            colors_used: LittleEndian::read_u32(&buf[32..36]),
            colors_important: LittleEndian::read_u32(&buf[36..40]),
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.size)?;
        writer.write_i32::<LittleEndian>(self.width)?;
        writer.write_i32::<LittleEndian>(self.height)?;
        writer.write_u16::<LittleEndian>(self.planes)?;
        writer.write_u16::<LittleEndian>(self.bit_count)?;
        writer.write_u32::<LittleEndian>(self.compression)?;
        writer.write_u32::<LittleEndian>(self.size_image)?;
        writer.write_i32::<LittleEndian>(self.x_pixels_per_meter)?;
        writer.write_i32::<LittleEndian>(self.y_pixels_per_meter)?;
        writer.write_u32::<LittleEndian>(self.colors_used)?;
        writer.write_u32::<LittleEndian>(self.colors_important)
    }

    /// 行数，即 `height` 的绝对值。行序由 `height` 的符号表示，这里不予考虑。
    pub fn row_count(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// 行是否自上而下存储 (`height` 为负)。
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }
}

impl Headers {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.file.write_to(writer)?;
        self.info.write_to(writer)
    }
}

/// 计算每行像素之后需要补齐的字节数 (0 到 3)，
/// 使得 `width * 3 + padding` 是 4 的整数倍。
/// 先对宽度取模再相乘，与 `(width * 3) % 4` 等价且不会溢出。
pub fn row_padding(width: usize) -> usize {
    (ROW_ALIGNMENT - (width % ROW_ALIGNMENT) * BYTES_PER_PIXEL % ROW_ALIGNMENT) % ROW_ALIGNMENT
}

/// 磁盘上一整行 (含填充) 的字节数。
pub fn row_stride(width: usize) -> usize {
    width * BYTES_PER_PIXEL + row_padding(width)
}

/// 从流的起始位置读取并校验两个头部。
///
/// 读取完成后，流的位置恰好位于第 54 个字节。
///
/// # Errors
///
/// * 流中不足 54 字节时返回 `FormatError::Truncated`。
/// * 魔数不是 "BM" 时返回 `FormatError::BadMagic`，此时信息头尚未被解释。
/// * 色深不是 24 位时返回 `FormatError::UnsupportedBitCount`。
pub fn read_headers<R: Read>(reader: &mut R) -> Result<Headers> {
    let mut file_buf = [0u8; FileHeader::SIZE];
    read_header_bytes(reader, &mut file_buf)?;
    let file = FileHeader::from_bytes(&file_buf);

    if file.file_type != BMP_MAGIC {
        return Err(FormatError::BadMagic(file.file_type).into());
    }

    let mut info_buf = [0u8; InfoHeader::SIZE];
    read_header_bytes(reader, &mut info_buf)?;
    let info = InfoHeader::from_bytes(&info_buf);

    if info.bit_count != SUPPORTED_BIT_COUNT {
        return Err(FormatError::UnsupportedBitCount(info.bit_count).into());
    }

    Ok(Headers { file, info })
}

fn read_header_bytes<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| -> BmpError {
        match e.kind() {
            ErrorKind::UnexpectedEof => FormatError::Truncated.into(),
            _ => e.into(),
        }
    })
}
