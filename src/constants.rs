/// BMP 文件头 (BITMAPFILEHEADER) 的固定大小 (字节)。
pub const FILE_HEADER_SIZE: u32 = 14;

/// 信息头 (BITMAPINFOHEADER) 的固定大小 (字节)。
pub const INFO_HEADER_SIZE: u32 = 40;

/// 输出文件中像素数据的起始偏移量。
/// 输出从不写入调色板，因此像素数据紧跟在两个头部之后。
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// "BM" 魔数，以小端序 `u16` 读取。
pub const BMP_MAGIC: u16 = 0x4D42;

/// 唯一支持的色深 (每像素位数)。
pub const SUPPORTED_BIT_COUNT: u16 = 24;

/// 每个像素在磁盘上占用的字节数 (B, G, R)。
pub const BYTES_PER_PIXEL: usize = 3;

/// 磁盘上每一行的字节数必须是该值的整数倍。
pub const ROW_ALIGNMENT: usize = 4;

/// 未压缩 (BI_RGB) 的压缩方式标记。
pub const COMPRESSION_NONE: u32 = 0;

/// 默认允许分配的最大像素数。
/// 宽高来自不可信的输入，超过该值的图像在分配缓冲区之前即被拒绝。
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

/// 默认输入文件路径。
pub const DEFAULT_INPUT_PATH: &str = "./input.bmp";

/// 默认输出文件路径。
pub const DEFAULT_OUTPUT_PATH: &str = "./output.bmp";
