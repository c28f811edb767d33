//! 关键字探测：拉取页面，检查字面子串

use tracing::trace;

use super::fetcher::{PageFetcher, ProbeError};
use super::outcome::ProbeOutcome;
use crate::signature::FingerprintRecord;
use crate::site::Site;

/// 关键字探测器
pub struct KeywordProbe;

impl KeywordProbe {
    pub async fn evaluate<F>(fetcher: &F, site: &Site, record: &FingerprintRecord) -> ProbeOutcome
    where
        F: PageFetcher + ?Sized,
    {
        if !record.has_keyword_rule() {
            return ProbeOutcome::Skipped;
        }

        let url = match site.probe_url(&record.homeurl) {
            Ok(url) => url,
            Err(e) => return ProbeOutcome::Failed(ProbeError::from(e)),
        };

        match fetcher.fetch_text(&url).await {
            // 区分大小写的字面匹配，不做正则解释
            Ok(body) => ProbeOutcome::from_bool(body.contains(record.keyword.as_str())),
            Err(e) => {
                trace!("关键字探测失败：{} -> {}", url, e);
                ProbeOutcome::Failed(e)
            }
        }
    }
}
