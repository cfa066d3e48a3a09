//! 无状态帧扫描

use core::iter::FusedIterator;

use crate::LENGTH_PREFIX_SIZE;

/// 从 `buffer` 开头扫描帧
///
/// 每次调用都从偏移 0 重新开始，不修改输入。遇到不完整的尾帧（长度前缀不足 4 字节，
/// 或负载不足声明的长度）时静默停止，不产生错误。
#[inline]
pub fn frames(buffer: &[u8]) -> Frames<'_> { Frames { buffer, offset: 0 } }

/// 帧迭代器，按到达顺序产出每个完整帧的负载
#[derive(Debug, Clone)]
pub struct Frames<'b> {
    buffer: &'b [u8],
    offset: usize,
}

impl<'b> Frames<'b> {
    /// 返回已产出的完整帧所消耗的字节数
    ///
    /// 不完整尾帧的长度前缀不计入，游标永远不会越过未完成的帧。
    #[inline]
    pub fn offset(&self) -> usize { self.offset }

    /// 返回尚未解码的剩余字节
    #[inline]
    pub fn remainder(&self) -> &'b [u8] { &self.buffer[self.offset..] }

    /// 读取 `offset` 处的帧，返回 (负载起点, 负载长度)
    #[inline]
    fn peek_at(buffer: &[u8], offset: usize) -> Option<(usize, usize)> {
        let start = offset.checked_add(LENGTH_PREFIX_SIZE)?;
        let prefix: [u8; LENGTH_PREFIX_SIZE] = buffer.get(offset..start)?.try_into().ok()?;
        let len = u32::from_le_bytes(prefix) as usize;

        // 检查帧是否完整
        if start.checked_add(len)? > buffer.len() {
            return None;
        }

        Some((start, len))
    }
}

impl<'b> Iterator for Frames<'b> {
    type Item = &'b [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (start, len) = Self::peek_at(self.buffer, self.offset)?;
        let end = start + len;
        self.offset = end;
        Some(&self.buffer[start..end])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        // 精确计算剩余完整帧数量
        let mut count = 0;
        let mut offset = self.offset;

        while let Some((start, len)) = Self::peek_at(self.buffer, offset) {
            count += 1;
            offset = start + len;
        }

        (count, Some(count))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}
