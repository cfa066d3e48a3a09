use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::constant::{
    DEFAULT_ALLOW_ORIGIN, DEFAULT_CONFIG_FILE, DEFAULT_LISTEN_ADDR, DEFAULT_LOG_PATH,
    DEFAULT_REQUEST_BODY_LIMIT, EMPTY_STRING, ROUTE_INGEST_PATH,
};
use crate::{common::utils::parse_from_env, core::preview::PreviewOutput};

// 静态配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub listen_addr: String,
    pub log_path: PathBuf,
    /// 为空或 `*` 时允许任意来源
    pub allow_origin: String,
    /// 规范化为 `/xxx` 或空串
    pub route_prefix: String,
    pub request_body_limit: usize,
    /// 每次追加后调用 `sync_data`
    pub sync: bool,
    pub preview_output: PreviewOutput,
    pub create_parent_dirs: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_owned(),
            route_prefix: String::new(),
            request_body_limit: DEFAULT_REQUEST_BODY_LIMIT,
            sync: false,
            preview_output: PreviewOutput::default(),
            create_parent_dirs: true,
        }
    }
}

impl IngestConfig {
    /// 读取 `CONFIG_FILE`（默认 `config.toml`），再应用环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let path = parse_from_env("CONFIG_FILE", DEFAULT_CONFIG_FILE);
        Ok(Self::from_file(Path::new(&*path))?.apply_env())
    }

    /// 文件不存在时返回默认配置
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<Self>(&s) {
                Ok(mut config) => {
                    config.route_prefix = normalize_route_prefix(&config.route_prefix);
                    Ok(config)
                }
                Err(source) => Err(ConfigError::Parse { path: path.to_path_buf(), source }),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }

    pub fn apply_env(mut self) -> Self {
        self.listen_addr = parse_from_env("LISTEN_ADDR", self.listen_addr);
        self.allow_origin = parse_from_env("ALLOW_ORIGIN", self.allow_origin);
        self.route_prefix =
            normalize_route_prefix(&parse_from_env("ROUTE_PREFIX", self.route_prefix));
        self.request_body_limit = parse_from_env("REQUEST_BODY_LIMIT", self.request_body_limit);
        self.sync = parse_from_env("LOG_SYNC", self.sync);
        self.create_parent_dirs = parse_from_env("CREATE_PARENT_DIRS", self.create_parent_dirs);

        let log_path = parse_from_env("LOG_PATH", EMPTY_STRING);
        if !log_path.is_empty() {
            self.log_path = PathBuf::from(&*log_path);
        }

        let output = parse_from_env("PREVIEW_OUTPUT", EMPTY_STRING);
        if !output.is_empty() {
            match PreviewOutput::from_str(&output) {
                Some(output) => self.preview_output = output,
                None => tracing::warn!(
                    "无法解析 PREVIEW_OUTPUT '{output}'，将使用 {}",
                    self.preview_output.as_str()
                ),
            }
        }

        self
    }

    /// 接收帧流的完整路径
    pub fn ingest_path(&self) -> String {
        format!("{}{ROUTE_INGEST_PATH}", normalize_route_prefix(&self.route_prefix))
    }
}

/// 补齐前导 `/`，去掉末尾 `/`；全为 `/` 或空白时返回空串
pub fn normalize_route_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}

/// Configuration file could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config '{}': {source}", path.display())
            }
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
