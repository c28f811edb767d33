//! 扫描配置，存储所有可配置项

use std::time::Duration;

/// 默认浏览器 User-Agent，规避简单的爬虫拦截
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36 SE 2.X Metar 1.0";

/// 默认指纹库文件
pub const DEFAULT_DATABASE: &str = "cmsprint.json";

/// 扫描配置
#[derive(Debug, Clone)]
pub struct ScanConfig {
    // 单次请求超时
    pub timeout: Duration,
    // 并发检测的指纹条数，1 为顺序扫描
    pub concurrency: usize,
    // 探测请求的 User-Agent
    pub user_agent: String,
    // 最大重定向次数，0 表示不跟随
    pub max_redirects: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            concurrency: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

impl ScanConfig {
    /// 自定义配置
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::new()
    }
}

/// 配置构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    pub fn build(mut self) -> ScanConfig {
        // 并发度至少为 1；超时为 0 时请求会立即失败，回退到默认值
        self.config.concurrency = self.config.concurrency.max(1);
        if self.config.timeout.is_zero() {
            self.config.timeout = ScanConfig::default().timeout;
        }
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_builder_clamps_invalid_values() {
        let config = ScanConfig::builder()
            .concurrency(0)
            .timeout(Duration::ZERO)
            .build();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_chain() {
        let config = ScanConfig::builder()
            .concurrency(8)
            .timeout_secs(3)
            .user_agent("probe/1.0")
            .max_redirects(0)
            .build();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.max_redirects, 0);
    }
}
