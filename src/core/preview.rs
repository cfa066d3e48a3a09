//! 帧预览：每个解码出的帧对应一条仅用于诊断的记录

use std::io::Write as _;

use serde::{Deserialize, Serialize};

use crate::app::constant::PREVIEW_BYTES;

/// 单个帧的诊断摘要，不落盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// 负载总长度
    pub len: u64,
    /// 负载前 100 字节的 UTF-8 解码结果，非法序列替换为 U+FFFD
    pub preview: String,
}

impl PreviewRecord {
    pub fn from_payload(payload: &[u8]) -> Self {
        let head = &payload[..payload.len().min(PREVIEW_BYTES)];
        Self { len: payload.len() as u64, preview: String::from_utf8_lossy(head).into_owned() }
    }
}

/// 预览记录的输出端
pub trait PreviewSink: Send + Sync {
    fn emit(&self, record: &PreviewRecord);
}

impl<F> PreviewSink for F
where F: Fn(&PreviewRecord) + Send + Sync
{
    #[inline]
    fn emit(&self, record: &PreviewRecord) { self(record) }
}

/// 内置的预览输出方式
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewOutput {
    /// 每条记录一行 JSON，写到标准输出
    #[default]
    Stdout,
    /// 作为 `tracing` 事件输出
    Log,
    /// 丢弃
    Off,
}

impl PreviewOutput {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Some(Self::Stdout),
            "log" => Some(Self::Log),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Log => "log",
            Self::Off => "off",
        }
    }
}

impl PreviewSink for PreviewOutput {
    fn emit(&self, record: &PreviewRecord) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // 诊断输出，写失败不影响追加
                if serde_json::to_writer(&mut out, record).is_ok() {
                    let _ = out.write_all(b"\n");
                }
            }
            Self::Log => {
                tracing::info!(
                    target: "frame_ingest::preview",
                    len = record.len,
                    preview = %record.preview
                )
            }
            Self::Off => {}
        }
    }
}
