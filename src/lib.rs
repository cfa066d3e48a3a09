//! 将浏览器扩展推送的长度前缀帧流逐字节追加到本地日志文件，
//! 并为每个帧输出尽力而为的文本预览。

extern crate alloc;

pub mod app;
pub mod common;
pub mod core;
