//! cmsprint - 基于静态文件校验和与页面关键字的 CMS 指纹识别工具

// 导出全局错误类型
pub use self::error::{CmsResult, CmsprintError};

// 导出配置模块
pub use self::config::{DEFAULT_DATABASE, DEFAULT_USER_AGENT, ScanConfig, ScanConfigBuilder};

// 导出指纹库模块核心接口
pub use self::signature::{FingerprintRecord, SignatureLoader, SignatureStore};

// 导出目标站点
pub use self::site::Site;

// 导出探测模块核心接口
pub use self::probe::{
    ChecksumProbe, HttpFetcher, KeywordProbe, PageFetcher, ProbeError, ProbeOutcome,
};

// 导出扫描模块核心接口
pub use self::engine::{FingerEngine, RecordVerdict, ResultSet, scan};

// 导出工具模块核心接口
pub use self::utils::{UrlJoiner, decode_body, md5_hex};

// 声明所有子模块
pub mod config;
pub mod engine;
pub mod error;
pub mod probe;
pub mod signature;
pub mod site;
pub mod utils;
