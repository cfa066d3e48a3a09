//! 长度前缀帧编解码器
//!
//! 帧格式为 4 字节小端 `u32` 长度前缀，后接等长的负载，帧与帧之间无分隔符。
//!
//! - [`frames`]：无状态扫描，每次调用重新开始，遇到不完整的尾帧即停止
//! - [`StreamDecoder`]：增量解码，跨数据块保留未完成的尾部
//! - [`encode_frame`]：编码单个帧
//!
//! # 示例
//!
//! ```
//! use bytes::BytesMut;
//! use frame_stream::{encode_frame, frames};
//!
//! let mut buf = BytesMut::new();
//! encode_frame(b"hello", &mut buf).unwrap();
//! encode_frame(b"", &mut buf).unwrap();
//!
//! let payloads: Vec<&[u8]> = frames(&buf).collect();
//! assert_eq!(payloads, [&b"hello"[..], &b""[..]]);
//! ```

mod decoder;
mod frame;
mod iter;

// 公开 API
pub use decoder::StreamDecoder;
pub use frame::{Frame, FrameTooLarge, encode_frame};
pub use iter::{Frames, frames};

/// 长度前缀字节数
pub const LENGTH_PREFIX_SIZE: usize = 4;
