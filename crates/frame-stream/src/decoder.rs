//! 增量帧解码器

use bytes::{Buf as _, BytesMut};

use crate::frame::Frame;
use crate::iter::frames;

/// 增量帧解码器
///
/// 处理连续到达的数据块，跨块保留不完整的尾帧，直到后续数据补齐。
///
/// # 示例
///
/// ```
/// use frame_stream::StreamDecoder;
///
/// let mut decoder = StreamDecoder::new();
///
/// // 帧被拆分在两个数据块中
/// let first = decoder.decode(&[3, 0, 0, 0, b'a'], |f| Some(f.payload.to_vec()));
/// assert!(first.is_empty());
/// assert_eq!(decoder.pending(), 5);
///
/// let second = decoder.decode(b"bc", |f| Some(f.payload.to_vec()));
/// assert_eq!(second, [b"abc".to_vec()]);
/// assert_eq!(decoder.pending(), 0);
/// ```
pub struct StreamDecoder {
    buffer: BytesMut,
}

impl StreamDecoder {
    /// 创建新的解码器
    #[inline]
    pub fn new() -> Self { Self { buffer: BytesMut::new() } }

    /// 创建指定初始容量的解码器
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: BytesMut::with_capacity(capacity) }
    }

    /// 缓冲区中尚未组成完整帧的字节数
    #[inline]
    pub fn pending(&self) -> usize { self.buffer.len() }

    /// 使用自定义处理器解码数据块
    ///
    /// # 类型参数
    /// - `T`: 处理结果类型
    /// - `F`: 处理函数，签名为 `FnMut(Frame<'_>) -> Option<T>`
    ///
    /// # 返回
    /// 处理器返回 `Some` 的结果列表，按帧到达顺序排列
    pub fn decode<T, F>(&mut self, data: &[u8], mut processor: F) -> Vec<T>
    where F: FnMut(Frame<'_>) -> Option<T> {
        self.buffer.extend_from_slice(data);

        let mut iter = frames(&self.buffer);
        let mut out = Vec::with_capacity(iter.len());

        for payload in &mut iter {
            if let Some(item) = processor(Frame { payload }) {
                out.push(item);
            }
        }

        let consumed = iter.offset();
        self.buffer.advance(consumed);
        out
    }
}

impl Default for StreamDecoder {
    fn default() -> Self { Self::new() }
}
