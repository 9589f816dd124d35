//! # 流水线模块
//!
//! 按顺序串联头部读取、像素解码、颜色反转与编码四个阶段。
//! 每个阶段都依赖上一阶段的完整输出，任一步失败都会立即中止。

use crate::decode::{DecodeOptions, decode_pixels};
use crate::encode::{encode, output_headers};
use crate::error::{BmpError, Result};
use crate::header::{Headers, read_headers, row_padding};
use crate::pixel::PixelBuffer;
use crate::transform::invert_colors;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;
use tempfile::Builder;

/// 一次成功运行的结果概要。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvertSummary {
    pub width: usize,
    pub height: usize,
    pub row_padding: usize,
    pub file_size: u32,
}

/// 读取头部和全部像素并完成颜色反转。
///
/// 输入流按值传入，在解码结束、反转开始之前即被释放。
pub fn decode_and_invert<R: Read + Seek>(
    mut input: R,
    options: &DecodeOptions,
) -> Result<(Headers, PixelBuffer)> {
    let headers = read_headers(&mut input)?;
    let mut buffer = decode_pixels(&mut input, &headers, options)?;
    drop(input);

    invert_colors(buffer.pixels_mut());
    Ok((headers, buffer))
}

/// 计算输出头部并写出完整的 BMP 文件，返回写出的头部。
pub fn write_output<W: Write>(
    output: &mut W,
    input_headers: &Headers,
    buffer: &PixelBuffer,
) -> Result<Headers> {
    let headers = output_headers(input_headers, buffer)?;
    encode(output, &headers, buffer)?;
    output.flush()?;
    Ok(headers)
}

/// 在任意流上运行完整的流水线，可用于内存中的 `Cursor`。
pub fn invert_stream<R: Read + Seek, W: Write>(
    input: R,
    output: &mut W,
    options: &DecodeOptions,
) -> Result<InvertSummary> {
    let (headers, buffer) = decode_and_invert(input, options)?;
    let written = write_output(output, &headers, &buffer)?;
    Ok(summarize(&written, &buffer))
}

/// 在文件上运行完整的流水线。
///
/// 输出文件在像素反转完成之后才被写入，写入方式见 `write_file`。
///
/// # Errors
///
/// * 无法打开输入文件时返回 `BmpError::Open`。
/// * 其余错误见各阶段的说明。
pub fn invert_file(input: &Path, output: &Path, options: &DecodeOptions) -> Result<InvertSummary> {
    let file = File::open(input).map_err(|source| BmpError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let (headers, buffer) = decode_and_invert(BufReader::new(file), options)?;

    let written = write_file(output, |mut writer| write_output(&mut writer, &headers, &buffer))?;
    Ok(summarize(&written, &buffer))
}

/// 将 `write` 产生的内容写到 `path`。
///
/// 路径不存在或是普通文件时，先写入同一目录下的临时文件，成功后再原子地替换目标；
/// 失败时临时文件被丢弃，目标保持原样，不会留下截断的 BMP。
/// 替换后的文件沿用原文件的权限。
/// 设备、管道和符号链接等其他路径则直接写入，失败时不做任何删除。
pub fn write_file<T>(
    path: &Path,
    write: impl FnOnce(&mut dyn Write) -> Result<T>,
) -> Result<T> {
    let replaceable = fs::symlink_metadata(path).map_or(true, |meta| meta.is_file());
    if !replaceable {
        let mut writer = BufWriter::new(File::create(path)?);
        return write(&mut writer);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // 与 `File::create` 相同，新文件的实际权限仍受 umask 约束。
        if existing.is_none() {
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
    }

    let mut writer = BufWriter::new(builder.tempfile_in(dir)?);
    let value = write(&mut writer)?;
    let temp = writer.into_inner().map_err(|e| e.into_error())?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(value)
}

fn summarize(headers: &Headers, buffer: &PixelBuffer) -> InvertSummary {
    InvertSummary {
        width: buffer.width(),
        height: buffer.height(),
        row_padding: row_padding(buffer.width()),
        file_size: headers.file.size,
    }
}
