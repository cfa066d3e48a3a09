//! 帧定义与编码

use bytes::{BufMut as _, BytesMut};

use crate::LENGTH_PREFIX_SIZE;

/// 长度前缀帧的视图
///
/// # 帧格式
///
/// ```text
/// +----------+----------------+
/// | length   | payload        |
/// | 4B (LE)  | length bytes   |
/// +----------+----------------+
/// ```
///
/// 负载内容不做任何校验，任意字节序列（包括空序列）都是合法负载。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'b> {
    /// 帧负载
    pub payload: &'b [u8],
}

impl Frame<'_> {
    /// 计算该帧在缓冲区中占用的总字节数
    ///
    /// 包含 4 字节长度前缀 + 负载长度
    ///
    /// ```
    /// # use frame_stream::Frame;
    /// let frame = Frame { payload: &[1, 2, 3] };
    /// assert_eq!(frame.total_size(), 7); // 4 + 3
    /// ```
    #[inline]
    pub const fn total_size(&self) -> usize { LENGTH_PREFIX_SIZE + self.payload.len() }
}

/// 负载长度超出 4 字节长度前缀的表示范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTooLarge {
    /// 被拒绝的负载长度（字节）
    pub len: usize,
}

impl core::fmt::Display for FrameTooLarge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "frame payload of {} bytes exceeds u32::MAX", self.len)
    }
}

impl core::error::Error for FrameTooLarge {}

/// 将 `payload` 编码为一个帧并追加到 `dst`
///
/// 写入 `len(payload)` 的 4 字节小端表示，随后是负载本身。
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<(), FrameTooLarge> {
    let len = u32::try_from(payload.len()).map_err(|_| FrameTooLarge { len: payload.len() })?;
    dst.reserve(LENGTH_PREFIX_SIZE + payload.len());
    dst.put_u32_le(len);
    dst.put_slice(payload);
    Ok(())
}
