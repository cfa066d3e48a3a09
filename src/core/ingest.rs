//! 追加写入服务
//!
//! 每次调用先把整个请求体原样追加到日志文件，再独立地对同一份字节做帧扫描并输出预览。
//! 两步互不影响：预览只是诊断手段，日志文件才是完整记录。

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::{
    fs::OpenOptions,
    io::Write as _,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use parking_lot::Mutex;
use serde::Serialize;

use super::{
    error::StorageError,
    preview::{PreviewRecord, PreviewSink},
};

/// 一次成功追加的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// 追加的字节数
    pub bytes: usize,
    /// 解码出的完整帧数
    pub frames: usize,
}

pub struct Ingestor {
    log_path: PathBuf,
    sync: bool,
    sink: Arc<dyn PreviewSink>,
    // 串行化 open → write → close，保证不同请求的字节不会交错
    write_lock: Mutex<()>,
    bytes_appended: AtomicU64,
    frames_previewed: AtomicU64,
}

impl Ingestor {
    pub fn new(log_path: impl Into<PathBuf>, sync: bool, sink: Arc<dyn PreviewSink>) -> Self {
        Self {
            log_path: log_path.into(),
            sync,
            sink,
            write_lock: Mutex::new(()),
            bytes_appended: AtomicU64::new(0),
            frames_previewed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn log_path(&self) -> &Path { &self.log_path }

    /// 自启动以来追加的字节数
    #[inline]
    pub fn bytes_appended(&self) -> u64 { self.bytes_appended.load(Relaxed) }

    /// 自启动以来输出的预览记录数
    #[inline]
    pub fn frames_previewed(&self) -> u64 { self.frames_previewed.load(Relaxed) }

    /// 创建日志文件所在目录
    pub fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        match self.log_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                std::fs::create_dir_all(dir).map_err(|source| StorageError::Open {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    /// 追加 `payload` 并输出预览
    ///
    /// 只有追加失败才会返回错误；不含完整帧的负载照常追加。
    pub fn ingest(&self, payload: &[u8]) -> Result<IngestReport, StorageError> {
        self.append(payload)?;
        let frames = self.preview(payload);
        Ok(IngestReport { bytes: payload.len(), frames })
    }

    /// 在阻塞线程池中执行 [`Ingestor::ingest`]
    pub async fn ingest_blocking(
        self: &Arc<Self>,
        payload: Bytes,
    ) -> Result<IngestReport, StorageError> {
        let this = self.clone();
        match tokio::task::spawn_blocking(move || this.ingest(&payload)).await {
            Ok(result) => result,
            Err(e) => Err(StorageError::Write {
                path: self.log_path.clone(),
                source: std::io::Error::other(e),
            }),
        }
    }

    fn append(&self, payload: &[u8]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|source| StorageError::Open { path: self.log_path.clone(), source })?;

        let write_err =
            |source: std::io::Error| StorageError::Write { path: self.log_path.clone(), source };
        file.write_all(payload).map_err(write_err)?;
        if self.sync {
            file.sync_data().map_err(write_err)?;
        }

        self.bytes_appended.fetch_add(payload.len() as u64, Relaxed);
        Ok(())
    }

    /// 扫描 `payload` 中的完整帧，每帧输出一条预览，返回帧数
    fn preview(&self, payload: &[u8]) -> usize {
        let mut count = 0;
        for frame in frame_stream::frames(payload) {
            self.sink.emit(&PreviewRecord::from_payload(frame));
            count += 1;
        }
        self.frames_previewed.fetch_add(count as u64, Relaxed);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preview::PreviewOutput;
    use bytes::BytesMut;
    use frame_stream::encode_frame;

    fn collecting() -> (Arc<Mutex<Vec<PreviewRecord>>>, Arc<dyn PreviewSink>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let records = records.clone();
            move |record: &PreviewRecord| records.lock().push(record.clone())
        };
        (records, Arc::new(sink))
    }

    fn encode_all(payloads: &[&[u8]]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for payload in payloads {
            encode_frame(payload, &mut buf).unwrap();
        }
        buf.to_vec()
    }

    #[test]
    fn test_append_fidelity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.ssef");
        std::fs::write(&path, b"existing").unwrap();

        let ingestor = Ingestor::new(&path, false, Arc::new(PreviewOutput::Off));
        let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let report = ingestor.ingest(&payload).unwrap();

        let content = std::fs::read(&path).unwrap();
        assert_eq!(&content[content.len() - payload.len()..], &payload[..]);
        assert_eq!(&content[..8], b"existing");
        assert_eq!(report.bytes, 1000);
        assert_eq!(ingestor.bytes_appended(), 1000);
    }

    #[test]
    fn test_sequential_accumulation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.ssef");
        let ingestor = Ingestor::new(&path, true, Arc::new(PreviewOutput::Off));

        // 第二帧被拆分在两次调用之间
        let stream = encode_all(&[b"alpha", b"beta"]);
        let (b1, b2) = stream.split_at(11);
        let b3 = encode_all(&[b"gamma"]);

        ingestor.ingest(b1).unwrap();
        ingestor.ingest(b2).unwrap();
        ingestor.ingest(&b3).unwrap();

        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, [b1, b2, &b3[..]].concat());

        // 整个文件作为连续流可以完整解码
        let decoded: Vec<_> = frame_stream::frames(&content).collect();
        assert_eq!(decoded, [&b"alpha"[..], b"beta", b"gamma"]);
    }

    #[test]
    fn test_previews_per_frame() {
        let dir = tempfile::tempdir().unwrap();
        let (records, sink) = collecting();
        let ingestor = Ingestor::new(dir.path().join("log"), false, sink);

        let mut big = b"hello".to_vec();
        big.resize(250, b'.');
        let payload = encode_all(&[&big[..], b"", b"tail"]);

        let report = ingestor.ingest(&payload).unwrap();
        assert_eq!(report, IngestReport { bytes: payload.len(), frames: 3 });

        let records = records.lock();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].len, 250);
        assert_eq!(records[0].preview.as_bytes(), &big[..100]);
        assert_eq!(records[1], PreviewRecord { len: 0, preview: String::new() });
        assert_eq!(records[2].preview, "tail");
        assert_eq!(ingestor.frames_previewed(), 3);
    }

    #[test]
    fn test_truncated_payload_still_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        let (records, sink) = collecting();
        let ingestor = Ingestor::new(&path, false, sink);

        let full = encode_all(&[b"p1", b"p2"]);
        let cut = &full[..full.len() - 1];
        let report = ingestor.ingest(cut).unwrap();

        assert_eq!(report.frames, 1);
        assert_eq!(records.lock().len(), 1);
        assert_eq!(std::fs::read(&path).unwrap(), cut);
    }

    #[test]
    fn test_payload_without_frames_is_not_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        let (records, sink) = collecting();
        let ingestor = Ingestor::new(&path, false, sink);

        let report = ingestor.ingest(&[0xff, 0xff]).unwrap();
        assert_eq!(report, IngestReport { bytes: 2, frames: 0 });
        assert!(records.lock().is_empty());
        assert_eq!(std::fs::read(&path).unwrap(), [0xff, 0xff]);
    }

    #[test]
    fn test_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        std::fs::write(&path, b"abc").unwrap();
        let (records, sink) = collecting();
        let ingestor = Ingestor::new(&path, false, sink);

        let report = ingestor.ingest(b"").unwrap();
        assert_eq!(report, IngestReport { bytes: 0, frames: 0 });
        assert!(records.lock().is_empty());
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    }

    #[test]
    fn test_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        // 目录无法以追加模式打开
        let (records, sink) = collecting();
        let ingestor = Ingestor::new(dir.path(), false, sink);

        let err = ingestor.ingest(&encode_all(&[b"x"])).unwrap_err();
        assert!(matches!(err, StorageError::Open { .. }));
        assert_eq!(err.path(), dir.path());
        assert!(records.lock().is_empty());
        assert_eq!(ingestor.bytes_appended(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure() {
        // /dev/full 可以打开，但任何写入都返回 ENOSPC
        let (records, sink) = collecting();
        let ingestor = Ingestor::new("/dev/full", false, sink);

        let err = ingestor.ingest(&encode_all(&[b"x"])).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(err.path(), Path::new("/dev/full"));
        assert!(records.lock().is_empty());
        assert_eq!(ingestor.bytes_appended(), 0);
    }

    #[test]
    fn test_ensure_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/log");
        let ingestor = Ingestor::new(&path, false, Arc::new(PreviewOutput::Off));

        ingestor.ensure_parent_dir().unwrap();
        ingestor.ingest(b"ok").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"ok");
    }

    #[test]
    fn test_concurrent_append_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        let ingestor = Arc::new(Ingestor::new(&path, false, Arc::new(PreviewOutput::Off)));

        let a = vec![b'A'; 1000];
        let b = vec![b'B'; 1000];

        for _ in 0..50 {
            std::fs::write(&path, b"").unwrap();
            let handles: Vec<_> = [a.clone(), b.clone()]
                .into_iter()
                .map(|payload| {
                    let ingestor = ingestor.clone();
                    std::thread::spawn(move || ingestor.ingest(&payload).unwrap())
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let content = std::fs::read(&path).unwrap();
            let ab = [&a[..], &b[..]].concat();
            let ba = [&b[..], &a[..]].concat();
            assert!(content == ab || content == ba);
        }
    }

    #[tokio::test]
    async fn test_ingest_blocking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        let ingestor = Arc::new(Ingestor::new(&path, false, Arc::new(PreviewOutput::Off)));

        let payload = Bytes::from(encode_all(&[b"async"]));
        let report = ingestor.ingest_blocking(payload.clone()).await.unwrap();

        assert_eq!(report.frames, 1);
        assert_eq!(std::fs::read(&path).unwrap(), payload);
    }
}
