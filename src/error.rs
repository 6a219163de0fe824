//! # 错误类型模块
//!
//! 定义库各环节可能产生的结构化错误。
//! 所有错误在检测点即不可恢复，由调用方决定如何向用户呈现。

use thiserror::Error;

/// 隐写流程中的错误分类。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载体容量不足以容纳补齐后的位流。
    #[error(
        "carrier capacity exceeded: {required} bits required but only {available} bits are usable"
    )]
    CapacityExceeded { required: usize, available: usize },

    /// 位流在组装时比长度头声明的要短。
    #[error("bitstream truncated: {expected} bytes expected but only {available} were recovered")]
    TruncatedStream { expected: usize, available: usize },

    /// 解密后的 PKCS#7 填充不合法。
    #[error("invalid PKCS#7 padding in decrypted data")]
    InvalidPadding,

    /// 密文格式损坏，无法进入解密流程。
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(&'static str),

    /// 载荷长度超出 4 字节长度头的表示范围。
    #[error("payload of {0} bytes does not fit in the 4-byte length header")]
    PayloadTooLarge(usize),
}
