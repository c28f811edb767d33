//! 全局错误类型定义

use std::io::Error as IoError;
use std::path::PathBuf;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum CmsprintError {
    // 指纹库相关错误
    #[error("指纹库读取失败：{}：{source}", .path.display())]
    DatabaseLoadError {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("指纹库解析失败：{0}")]
    DatabaseParseError(#[from] SerdeJsonError),

    // 目标相关错误
    #[error("无效目标站点：{0}")]
    InvalidSite(String),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),

    // 网络相关错误
    #[error("HTTP客户端初始化失败：{0}")]
    HttpClientError(#[from] reqwest::Error),

    // 扫描任务错误
    #[error("异步任务执行失败：{0}")]
    AsyncTaskError(String),
}

impl CmsprintError {
    /// 是否属于指纹库加载类错误（扫描开始前的致命错误）
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CmsprintError::DatabaseLoadError { .. } | CmsprintError::DatabaseParseError(_)
        )
    }
}

// 全局Result类型
pub type CmsResult<T> = Result<T, CmsprintError>;
