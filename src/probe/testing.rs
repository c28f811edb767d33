//! 内存拉取器，供单元测试记录请求次数

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use super::fetcher::{PageFetcher, ProbeError};
use crate::utils::decode_body;

enum StaticPage {
    Page { status: u16, body: Vec<u8> },
    Unreachable,
}

/// 按 URL 返回固定内容；未登记的 URL 返回 404
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, StaticPage>,
    requests: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(
            url.to_string(),
            StaticPage::Page {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), StaticPage::Unreachable);
        self
    }

    pub fn requests_for(&self, url: &str) -> usize {
        self.requests.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().values().sum()
    }

    fn serve(&self, url: &Url) -> Result<Vec<u8>, ProbeError> {
        *self
            .requests
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        match self.pages.get(url.as_str()) {
            Some(StaticPage::Page { status: 200, body }) => Ok(body.clone()),
            Some(StaticPage::Page { status, .. }) => Err(ProbeError::UnexpectedStatus(*status)),
            Some(StaticPage::Unreachable) => Err(ProbeError::Timeout),
            None => Err(ProbeError::UnexpectedStatus(404)),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ProbeError> {
        self.serve(url)
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, ProbeError> {
        self.serve(url).map(|body| decode_body(None, &body))
    }
}
