//! 校验和探测：拉取静态资源，比对内容 MD5

use tracing::trace;

use super::fetcher::{PageFetcher, ProbeError};
use super::outcome::ProbeOutcome;
use crate::signature::FingerprintRecord;
use crate::site::Site;
use crate::utils::md5_hex;

/// 校验和探测器
pub struct ChecksumProbe;

impl ChecksumProbe {
    pub async fn evaluate<F>(fetcher: &F, site: &Site, record: &FingerprintRecord) -> ProbeOutcome
    where
        F: PageFetcher + ?Sized,
    {
        if !record.has_checksum_rule() {
            return ProbeOutcome::Skipped;
        }

        let url = match site.probe_url(&record.staticurl) {
            Ok(url) => url,
            Err(e) => return ProbeOutcome::Failed(ProbeError::from(e)),
        };

        match fetcher.fetch_bytes(&url).await {
            Ok(content) => {
                let checksum = md5_hex(&content);
                trace!("校验和探测：{} -> {}，期望 {}", url, checksum, record.checksum);
                ProbeOutcome::from_bool(checksum == record.checksum)
            }
            Err(e) => {
                trace!("校验和探测失败：{} -> {}", url, e);
                ProbeOutcome::Failed(e)
            }
        }
    }
}
