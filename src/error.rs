//! # 错误类型模块
//!
//! 定义流水线各阶段可能产生的错误。库内部使用强类型的 `BmpError`，
//! 命令处理层再通过 `anyhow` 为其附加面向用户的上下文。

use std::io;
use std::path::PathBuf;

/// BMP 格式校验失败的具体原因。
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("not a valid BMP file (magic tag {0:#06x}, expected 0x4d42)")]
    BadMagic(u16),

    #[error("only 24-bit BMPs are supported, found {0} bits per pixel")]
    UnsupportedBitCount(u16),

    #[error("the file ends before the 54-byte BMP headers are complete")]
    Truncated,
}

/// 流水线中任一阶段失败时返回的错误。
#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    #[error("unable to open input file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot allocate a pixel buffer for a {width}x{height} image: {reason}")]
    Allocation {
        width: i32,
        height: i32,
        reason: String,
    },
}

/// 错误的分类，便于调用方只关心失败的类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Open,
    Format,
    Io,
    Allocation,
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BmpError::Open { .. } => ErrorKind::Open,
            BmpError::Format(_) => ErrorKind::Format,
            BmpError::Io(_) => ErrorKind::Io,
            BmpError::Allocation { .. } => ErrorKind::Allocation,
        }
    }
}

pub type Result<T> = std::result::Result<T, BmpError>;
