use std::num::NonZeroUsize;

/// 长度头占用的字节数。
/// 载荷长度以大端序 `u32` 写入位流开头，随后才是载荷本身的位。
pub const LENGTH_HEADER_BYTES: usize = 4;

/// 每个像素可用的承载位数。
/// R、G、B 三个通道各提供 1 个最低有效位，Alpha 通道保持原样。
pub const BITS_PER_PIXEL: usize = 3;

/// 容量检查时预留的安全余量 (字节)。
/// 可用位数按 `8 * (capacity - margin)` 计算，超出即拒绝嵌入。
pub const CAPACITY_MARGIN_BYTES: usize = 4;

/// 统计分析默认的块大小 (每块包含的 LSB 个数)。
pub const DEFAULT_BLOCK_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// 未指定输出路径时，隐写图像文件名使用的后缀。
pub const STEGO_SUFFIX: &str = "-stego";

/// 未指定输出路径时，提取出的载荷文件名使用的后缀。
pub const EXTRACTED_SUFFIX: &str = "-extracted";
