//! # 像素载体读写模块
//!
//! 以行优先顺序遍历像素网格，每个像素的 R、G、B 通道各承载 1 个
//! 最低有效位。写入永远生成一张新图像，源图像不被修改。

use crate::constants::{BITS_PER_PIXEL, CAPACITY_MARGIN_BYTES};
use crate::error::StegoError;
use image::{Rgba, RgbaImage};

/// 计算载体可容纳的位流字节数：`floor(width * height * 3 / 8)`。
pub fn capacity(img: &RgbaImage) -> usize {
    let (width, height) = img.dimensions();
    width as usize * height as usize * BITS_PER_PIXEL / 8
}

/// 把位流嵌入载体的 LSB，返回一张新图像。
///
/// 位流先以 0 补齐到 3 的整数倍，随后做容量检查；检查失败时
/// 不会产生任何像素。嵌入完成后剩余像素原样复制，Alpha 通道
/// 始终保持不变。
///
/// # Errors
///
/// 补齐后的位数超过 `8 * (capacity - margin)` 时返回
/// [`StegoError::CapacityExceeded`]。
pub fn embed_bits(img: &RgbaImage, bits: &[u8]) -> Result<RgbaImage, StegoError> {
    let mut stream = bits.to_vec();
    while stream.len() % BITS_PER_PIXEL != 0 {
        stream.push(0);
    }

    let available = 8 * capacity(img).saturating_sub(CAPACITY_MARGIN_BYTES);
    if stream.len() > available {
        return Err(StegoError::CapacityExceeded {
            required: stream.len(),
            available,
        });
    }

    let (width, height) = img.dimensions();
    let mut stego = RgbaImage::new(width, height);
    let mut idx = 0;

    for y in 0..height {
        for x in 0..width {
            let Rgba([mut r, mut g, mut b, a]) = *img.get_pixel(x, y);
            if idx < stream.len() {
                r = set_lsb(r, stream[idx]);
                g = set_lsb(g, stream[idx + 1]);
                b = set_lsb(b, stream[idx + 2]);
            }
            stego.put_pixel(x, y, Rgba([r, g, b, a]));
            idx += BITS_PER_PIXEL;
        }
    }

    Ok(stego)
}

/// 按与 `embed_bits` 完全相同的遍历顺序读出每个通道的 LSB。
///
/// 始终消费整张图像；位流中有多少字节是有效的，由 `assemble`
/// 读取长度头后决定。
pub fn extract_bits(img: &RgbaImage) -> Vec<u8> {
    let (width, height) = img.dimensions();
    let mut bits = Vec::with_capacity(width as usize * height as usize * BITS_PER_PIXEL);

    for y in 0..height {
        for x in 0..width {
            let Rgba([r, g, b, _]) = *img.get_pixel(x, y);
            bits.push(r & 1);
            bits.push(g & 1);
            bits.push(b & 1);
        }
    }

    bits
}

/// 用 `bit` 覆盖 `value` 的最低有效位。
fn set_lsb(value: u8, bit: u8) -> u8 {
    (value & 0xFE) | (bit & 1)
}
