#[macro_export]
macro_rules! def_pub_const {
    // 批量常量定义
    ($($(#[$meta:meta])* $name:ident = $value:expr),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub const $name: &'static str = $value;
        )+
    };
}

#[macro_export]
macro_rules! define_typed_constants {
    // 递归情况：处理一个类型块，然后继续处理剩余的
    (
        $vis:vis $ty:ty => {
            $(
                $(#[$attr:meta])*
                $name:ident = $value:expr
            ),* $(,)?
        }
        $($rest:tt)*
    ) => {
        $(
            $(#[$attr])*
            $vis const $name: $ty = $value;
        )*

        // 递归处理剩余的类型块
        $crate::define_typed_constants! {
            $($rest)*
        }
    };

    // 基础情况：没有更多内容时停止
    () => {};
}

// Package related constants
def_pub_const!(PKG_VERSION = env!("CARGO_PKG_VERSION"), PKG_NAME = env!("CARGO_PKG_NAME"));

// Basic string constants
def_pub_const!(EMPTY_STRING = "");

// Route related constants
def_pub_const!(ROUTE_HEALTH_PATH = "/health", ROUTE_INGEST_PATH = "/ingest");

crate::define_typed_constants! {
    pub &'static str => {
        /// 默认监听地址，仅本机可达
        DEFAULT_LISTEN_ADDR = "127.0.0.1:8765",
        /// 默认日志文件路径
        DEFAULT_LOG_PATH = "data/stream.ssef",
        /// 默认允许的跨域来源（浏览器扩展）
        DEFAULT_ALLOW_ORIGIN = "chrome-extension://omglnnhkdmhcdoanlffmdffhpjaadjhc",
        /// 默认配置文件路径
        DEFAULT_CONFIG_FILE = "config.toml",
        /// CORS 允许的请求头
        CORS_ALLOW_HEADERS = "content-type",
    }
    pub usize => {
        /// 预览截取的负载字节数
        PREVIEW_BYTES = 100,
        /// 默认请求体上限（8 MiB）
        DEFAULT_REQUEST_BODY_LIMIT = 0x800000,
    }
    pub u64 => {
        /// CORS 预检缓存时间（秒）
        CORS_MAX_AGE_SECS = 86400,
        /// 默认 frame-tail 轮询间隔（毫秒）
        DEFAULT_TAIL_POLL_MS = 120,
    }
}
