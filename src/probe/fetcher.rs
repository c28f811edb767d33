//! 页面拉取：探测器唯一的网络出口
//! 所有探测请求都经过 `PageFetcher`，测试中可替换为内存实现

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::ScanConfig;
use crate::error::CmsResult;
use crate::utils::decode_body;

/// 单次探测失败原因，只在探测器内部流转，最终视为未命中
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("请求超时")]
    Timeout,
    #[error("网络请求失败：{0}")]
    Transport(#[source] reqwest::Error),
    #[error("非预期状态码：{0}")]
    UnexpectedStatus(u16),
    #[error("探测URL无效：{0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else {
            ProbeError::Transport(e)
        }
    }
}

/// 页面拉取接口：仅状态码为 200 时返回内容
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 拉取原始字节（校验和探测）
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ProbeError>;

    /// 拉取并解码为文本（关键字探测）
    async fn fetch_text(&self, url: &Url) -> Result<String, ProbeError>;
}

/// 基于 reqwest 的 HTTP 拉取器
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScanConfig) -> CmsResult<Self> {
        let redirect = match config.max_redirects {
            0 => Policy::none(),
            n => Policy::limited(n),
        };
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect)
            .build()?;
        Ok(Self { client })
    }

    // 响应体在每条路径上都会被读取或随 Response 一起释放
    async fn get_ok(&self, url: &Url) -> Result<Response, ProbeError> {
        let response = self.client.get(url.clone()).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ProbeError::UnexpectedStatus(response.status().as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ProbeError> {
        let response = self.get_ok(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, ProbeError> {
        let response = self.get_ok(url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;
        Ok(decode_body(content_type.as_deref(), &body))
    }
}
