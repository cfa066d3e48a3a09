//! 跟随日志文件增长，跨追加边界解码帧

use std::{
    fs::File,
    io::{self, Read as _, Seek as _, SeekFrom},
    path::Path,
};

use frame_stream::StreamDecoder;

use super::preview::PreviewRecord;

const READ_CHUNK: usize = 64 * 1024;

pub struct LogTail {
    file: File,
    offset: u64,
    decoder: StreamDecoder,
    chunk: Vec<u8>,
}

impl LogTail {
    /// 打开日志文件；`from_end` 为真时从当前文件末尾开始
    pub fn open(path: &Path, from_end: bool) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let offset = if from_end { file.seek(SeekFrom::End(0))? } else { 0 };
        Ok(Self {
            file,
            offset,
            decoder: StreamDecoder::with_capacity(READ_CHUNK),
            chunk: Vec::with_capacity(READ_CHUNK),
        })
    }

    /// 已读取的文件偏移
    #[inline]
    pub fn offset(&self) -> u64 { self.offset }

    /// 已读取但尚未组成完整帧的字节数
    #[inline]
    pub fn pending(&self) -> usize { self.decoder.pending() }

    /// 读取上次之后新追加的字节，返回其中补齐的完整帧
    pub fn poll(&mut self) -> io::Result<Vec<PreviewRecord>> {
        self.chunk.clear();
        self.file.seek(SeekFrom::Start(self.offset))?;
        let n = self.file.read_to_end(&mut self.chunk)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        self.offset += n as u64;

        Ok(self
            .decoder
            .decode(&self.chunk, |frame| Some(PreviewRecord::from_payload(frame.payload))))
    }
}
