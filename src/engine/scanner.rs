//! 指纹扫描引擎：对每条记录执行关键字探测与校验和探测，汇总命中的 remark
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::debug;

use super::result::ResultSet;
use crate::config::ScanConfig;
use crate::error::{CmsResult, CmsprintError};
use crate::probe::{ChecksumProbe, HttpFetcher, KeywordProbe, PageFetcher, ProbeOutcome};
use crate::signature::{FingerprintRecord, SignatureStore};
use crate::site::Site;

/// 单条记录的检测结论
#[derive(Debug)]
pub struct RecordVerdict {
    pub keyword: ProbeOutcome,
    pub checksum: ProbeOutcome,
}

impl RecordVerdict {
    /// 任一探测命中即视为命中
    pub fn is_match(&self) -> bool {
        self.keyword.is_match() || self.checksum.is_match()
    }
}

/// 指纹扫描引擎
#[derive(Debug, Clone)]
pub struct FingerEngine<F = HttpFetcher> {
    store: Arc<SignatureStore>,
    fetcher: Arc<F>,
    config: ScanConfig,
}

impl FingerEngine<HttpFetcher> {
    /// 使用 HTTP 拉取器创建引擎
    pub fn new(store: impl Into<Arc<SignatureStore>>, config: ScanConfig) -> CmsResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(store, fetcher, config))
    }
}

impl<F> FingerEngine<F>
where
    F: PageFetcher + 'static,
{
    pub fn with_fetcher(
        store: impl Into<Arc<SignatureStore>>,
        fetcher: F,
        config: ScanConfig,
    ) -> Self {
        Self {
            store: store.into(),
            fetcher: Arc::new(fetcher),
            config,
        }
    }

    pub fn store(&self) -> &SignatureStore {
        &self.store
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// 扫描目标站点，返回所有命中的 remark
    ///
    /// 每条记录都会被检测，不会在首次命中后提前结束。单个探测的失败只影响该探测本身。
    /// `concurrency` 为 1 时按指纹库顺序逐条检测，大于 1 时限流并发检测。
    pub async fn scan(&self, site: &Site) -> CmsResult<ResultSet> {
        let start = Instant::now();
        debug!(
            "开始扫描：{}，记录数：{}，并发度：{}",
            site,
            self.store.len(),
            self.config.concurrency
        );

        let result = if self.config.concurrency <= 1 {
            self.scan_sequential(site).await
        } else {
            self.scan_concurrent(site).await?
        };

        debug!(
            "扫描完成：{}，命中 {} 项，耗时 {:?}",
            site,
            result.len(),
            start.elapsed()
        );
        Ok(result)
    }

    async fn scan_sequential(&self, site: &Site) -> ResultSet {
        let mut result = ResultSet::new();
        for record in self.store.iter() {
            let verdict = Self::evaluate_record(self.fetcher.as_ref(), site, record).await;
            if verdict.is_match() {
                debug!("命中指纹：{}（{:?}）", record.remark, verdict);
                result.insert(record.remark.as_str());
            }
        }
        result
    }

    async fn scan_concurrent(&self, site: &Site) -> CmsResult<ResultSet> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut handles = Vec::with_capacity(self.store.len());

        for index in 0..self.store.len() {
            // 获取许可，控制同时检测的记录数
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| CmsprintError::AsyncTaskError(e.to_string()))?;
            let store = Arc::clone(&self.store);
            let fetcher = Arc::clone(&self.fetcher);
            let site = site.clone();

            handles.push(tokio::spawn(async move {
                let _permit_guard = permit;
                let record = &store.records()[index];
                let verdict = Self::evaluate_record(fetcher.as_ref(), &site, record).await;
                if verdict.is_match() {
                    debug!("命中指纹：{}（{:?}）", record.remark, verdict);
                    Some(record.remark.clone())
                } else {
                    None
                }
            }));
        }

        // 等待全部记录检测完成后再汇总
        let mut result = ResultSet::new();
        for handle in handles {
            let matched = handle
                .await
                .map_err(|e| CmsprintError::AsyncTaskError(e.to_string()))?;
            if let Some(remark) = matched {
                result.insert(remark);
            }
        }
        Ok(result)
    }

    /// 检测单条记录：先关键字，后校验和，两者都会执行
    pub async fn evaluate_record(
        fetcher: &F,
        site: &Site,
        record: &FingerprintRecord,
    ) -> RecordVerdict {
        let keyword = KeywordProbe::evaluate(fetcher, site, record).await;
        let checksum = ChecksumProbe::evaluate(fetcher, site, record).await;
        RecordVerdict { keyword, checksum }
    }
}

/// 使用默认配置扫描目标站点
pub async fn scan(site: &Site, store: &SignatureStore) -> CmsResult<ResultSet> {
    FingerEngine::new(store.clone(), ScanConfig::default())?
        .scan(site)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::testing::StaticFetcher;
    use crate::utils::md5_hex;

    const ORIGIN: &str = "http://target.test";

    fn site() -> Site {
        Site::parse(ORIGIN).unwrap()
    }

    fn engine(records: Vec<FingerprintRecord>, fetcher: StaticFetcher, concurrency: usize) -> FingerEngine<StaticFetcher> {
        let config = ScanConfig::builder().concurrency(concurrency).build();
        FingerEngine::with_fetcher(SignatureStore::from(records), fetcher, config)
    }

    #[tokio::test]
    async fn test_inert_records_never_match() {
        let fetcher = StaticFetcher::new().page("http://target.test/", 200, "anything");
        let records = vec![
            FingerprintRecord::new("Inert", "", "", "", ""),
            FingerprintRecord::new("Half inert", "/a.js", "", "", "anything"),
        ];
        let engine = engine(records, fetcher, 1);

        let result = engine.scan(&site()).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(engine.fetcher.total_requests(), 0);
    }

    #[tokio::test]
    async fn test_or_combination() {
        let fetcher = StaticFetcher::new()
            .page("http://target.test/", 200, "<p>Powered by Typecho</p>")
            .page("http://target.test/static/app.js", 200, "console.log(1)");
        let records = vec![
            // 关键字命中，校验和不命中
            FingerprintRecord::new("Typecho", "/static/app.js", "0000", "/", "Powered by Typecho"),
            // 校验和命中，关键字不命中
            FingerprintRecord::new(
                "AppJS",
                "/static/app.js",
                md5_hex(b"console.log(1)"),
                "/",
                "not on the page",
            ),
        ];
        let result = engine(records, fetcher, 1).scan(&site()).await.unwrap();
        assert!(result.contains("Typecho"));
        assert!(result.contains("AppJS"));
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_remarks_collapse() {
        let fetcher = StaticFetcher::new().page("http://target.test/", 200, "wp-content");
        let records = vec![
            FingerprintRecord::keyword_rule("WordPress", "/", "wp-content"),
            FingerprintRecord::keyword_rule("WordPress", "/readme.html", "WordPress"),
            FingerprintRecord::checksum_rule("WordPress", "/", md5_hex(b"wp-content")),
        ];
        let result = engine(records, fetcher, 1).scan(&site()).await.unwrap();
        assert_eq!(result.into_vec(), vec!["WordPress".to_string()]);
    }

    #[tokio::test]
    async fn test_fault_isolation() {
        let fetcher = StaticFetcher::new()
            .unreachable("http://target.test/down.js")
            .page("http://target.test/", 200, "Powered by DedeCMS")
            .page("http://target.test/up.js", 200, "up");
        let records = vec![
            FingerprintRecord::checksum_rule("Unreachable", "/down.js", md5_hex(b"up")),
            FingerprintRecord::keyword_rule("DedeCMS", "/", "Powered by DedeCMS"),
            FingerprintRecord::checksum_rule("UpJS", "/up.js", md5_hex(b"up")),
        ];
        let result = engine(records, fetcher, 1).scan(&site()).await.unwrap();
        assert_eq!(result.into_vec(), vec!["DedeCMS".to_string(), "UpJS".to_string()]);
    }

    #[tokio::test]
    async fn test_every_record_evaluated_once() {
        let mut fetcher = StaticFetcher::new();
        let mut records = Vec::new();
        for i in 0..6 {
            let path = format!("/p{}.html", i);
            fetcher = fetcher.page(&format!("{}{}", ORIGIN, path), 200, "Powered by Z");
            records.push(FingerprintRecord::keyword_rule(format!("Z{}", i), path, "Powered by Z"));
        }
        let engine = engine(records, fetcher, 1);

        let result = engine.scan(&site()).await.unwrap();
        // 第一条就命中，也不会提前结束
        assert_eq!(result.len(), 6);
        for i in 0..6 {
            assert_eq!(engine.fetcher.requests_for(&format!("{}/p{}.html", ORIGIN, i)), 1);
        }
        assert_eq!(engine.fetcher.total_requests(), 6);
    }

    #[tokio::test]
    async fn test_both_probes_run_after_keyword_match() {
        let fetcher = StaticFetcher::new()
            .page("http://target.test/", 200, "Powered by X")
            .page("http://target.test/x.js", 200, "x");
        let record = FingerprintRecord::new("X", "/x.js", md5_hex(b"x"), "/", "Powered by X");

        let verdict = FingerEngine::<StaticFetcher>::evaluate_record(&fetcher, &site(), &record).await;
        assert!(verdict.keyword.is_match());
        assert!(verdict.checksum.is_match());
        assert_eq!(fetcher.total_requests(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let build = || {
            let mut fetcher = StaticFetcher::new().unreachable("http://target.test/gone.js");
            let mut records = vec![FingerprintRecord::checksum_rule("Gone", "/gone.js", "abc")];
            for i in 0..20 {
                let path = format!("/asset{}.js", i);
                let body = format!("asset {}", i);
                fetcher = fetcher.page(&format!("{}{}", ORIGIN, path), 200, body.clone());
                // 偶数项命中，remark 每两项重复一次
                let checksum = if i % 2 == 0 { md5_hex(body.as_bytes()) } else { "ffff".to_string() };
                records.push(FingerprintRecord::checksum_rule(format!("Lib{}", i / 4), path, checksum));
            }
            (records, fetcher)
        };

        let (records, fetcher) = build();
        let sequential = engine(records, fetcher, 1).scan(&site()).await.unwrap();

        let (records, fetcher) = build();
        let parallel_engine = engine(records, fetcher, 4);
        let parallel = parallel_engine.scan(&site()).await.unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.len(), 5);
        assert!(!parallel.contains("Gone"));
        assert_eq!(parallel_engine.fetcher.total_requests(), 21);
    }

    #[test]
    fn test_engine_exposes_store_and_config() {
        let records = vec![
            FingerprintRecord::keyword_rule("A", "/", "A"),
            FingerprintRecord::default(),
        ];
        let engine = engine(records, StaticFetcher::new(), 0);
        assert_eq!(engine.store().len(), 2);
        assert_eq!(engine.store().active_count(), 1);
        // 并发度 0 在构建配置时被修正为 1
        assert_eq!(engine.config().concurrency, 1);
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_result() {
        let result = engine(Vec::new(), StaticFetcher::new(), 1)
            .scan(&site())
            .await
            .unwrap();
        assert!(result.is_empty());
    }
}
