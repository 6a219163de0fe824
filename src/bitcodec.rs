//! # 位流编解码模块
//!
//! 负责把字节载荷序列化为自描述的位流，以及把位流还原为字节。
//! 位流以大端序 `u32` 长度头开始，后接载荷，每个字节按高位在前展开。

use crate::constants::LENGTH_HEADER_BYTES;
use crate::error::StegoError;

/// 将字节载荷分解为带长度头的位序列。
///
/// 输出的每个元素都是 0 或 1。长度头记录的是 `data` 的字节数，
/// 因此 `assemble` 无需任何外部信息即可恢复载荷。
///
/// # Errors
///
/// 载荷长度超出 `u32` 表示范围时返回 [`StegoError::PayloadTooLarge`]。
pub fn decompose(data: &[u8]) -> Result<Vec<u8>, StegoError> {
    let length =
        u32::try_from(data.len()).map_err(|_| StegoError::PayloadTooLarge(data.len()))?;

    let mut bits = Vec::with_capacity((LENGTH_HEADER_BYTES + data.len()) * 8);
    for byte in length.to_be_bytes().into_iter().chain(data.iter().copied()) {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }

    Ok(bits)
}

/// 将位序列还原为字节载荷。
///
/// 每 8 个位组装为一个字节 (高位在前)，不足一个字节的尾部位被丢弃。
/// 随后读取大端序长度头，并精确返回其声明的字节数。
///
/// # Errors
///
/// 组装出的字节数不足以覆盖长度头或其声明的载荷时，
/// 返回 [`StegoError::TruncatedStream`]。
pub fn assemble(bits: &[u8]) -> Result<Vec<u8>, StegoError> {
    let bytes: Vec<u8> = bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect();

    let header: [u8; LENGTH_HEADER_BYTES] = bytes
        .get(..LENGTH_HEADER_BYTES)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(StegoError::TruncatedStream {
            expected: LENGTH_HEADER_BYTES,
            available: bytes.len(),
        })?;

    let declared = u32::from_be_bytes(header) as usize;
    let end = LENGTH_HEADER_BYTES + declared;

    bytes
        .get(LENGTH_HEADER_BYTES..end)
        .map(<[u8]>::to_vec)
        .ok_or(StegoError::TruncatedStream {
            expected: end,
            available: bytes.len(),
        })
}
