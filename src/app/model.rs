use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};

use crate::core::ingest::Ingestor;

// 运行时状态
pub struct AppState {
    pub ingestor: Arc<Ingestor>,
    pub started_at: DateTime<Local>,
    pub total_requests: AtomicU64,
    pub active_requests: AtomicU64,
    pub error_requests: AtomicU64,
}

impl AppState {
    pub fn new(ingestor: Ingestor) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
            started_at: Local::now(),
            total_requests: AtomicU64::new(0),
            active_requests: AtomicU64::new(0),
            error_requests: AtomicU64::new(0),
        }
    }

    /// 增加总请求计数
    #[inline(always)]
    pub fn increment_total(&self) { self.total_requests.fetch_add(1, Ordering::Relaxed); }

    /// 记录一个新请求，返回的守卫存活期间计入活跃请求
    ///
    /// 处理函数的 future 被丢弃（如客户端断开）时同样会归还计数。
    pub fn enter(&self) -> ActiveRequest<'_> {
        self.increment_total();
        self.active_requests.fetch_add(1, Ordering::Relaxed);
        ActiveRequest { state: self }
    }

    /// 增加错误请求计数
    #[inline(always)]
    pub fn increment_error(&self) { self.error_requests.fetch_add(1, Ordering::Relaxed); }
}

/// 活跃请求守卫，析构时减少活跃请求计数
#[must_use]
pub struct ActiveRequest<'a> {
    state: &'a AppState,
}

impl Drop for ActiveRequest<'_> {
    #[inline]
    fn drop(&mut self) { self.state.active_requests.fetch_sub(1, Ordering::Relaxed); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preview::PreviewOutput;

    fn state() -> AppState {
        AppState::new(Ingestor::new("unused.ssef", false, Arc::new(PreviewOutput::Off)))
    }

    #[test]
    fn test_active_request_guard() {
        let state = state();
        {
            let _a = state.enter();
            let _b = state.enter();
            assert_eq!(state.active_requests.load(Ordering::Relaxed), 2);
        }
        assert_eq!(state.active_requests.load(Ordering::Relaxed), 0);
        assert_eq!(state.total_requests.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_active_request_released_on_cancel() {
        let state = Arc::new(state());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let task = tokio::spawn({
            let state = state.clone();
            async move {
                let _active = state.enter();
                let _ = rx.await;
            }
        });
        while state.active_requests.load(Ordering::Relaxed) == 0 {
            tokio::task::yield_now().await;
        }

        // 未完成的 future 被中止，守卫随之析构
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        drop(tx);

        assert_eq!(state.active_requests.load(Ordering::Relaxed), 0);
        assert_eq!(state.total_requests.load(Ordering::Relaxed), 1);
    }
}
