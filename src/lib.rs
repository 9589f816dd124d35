//! # bmp_invert 库
//!
//! 本库包含 24 位 BMP 颜色反转工具的核心逻辑：
//! 头部读取与校验、像素解码、颜色反转以及头部重写与像素编码。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod handler;
pub mod header;
pub mod pipeline;
pub mod pixel;
pub mod transform;

pub use error::{BmpError, ErrorKind, FormatError};
pub use pipeline::{InvertSummary, invert_file, invert_stream};
