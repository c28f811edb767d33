//! 探测模块：校验和探测与关键字探测，每次探测只发出一个 GET 请求
pub mod checksum;
pub mod fetcher;
pub mod keyword;
pub mod outcome;

#[cfg(test)]
pub(crate) mod testing;

// 导出核心接口
pub use self::checksum::ChecksumProbe;
pub use self::fetcher::{HttpFetcher, PageFetcher, ProbeError};
pub use self::keyword::KeywordProbe;
pub use self::outcome::ProbeOutcome;
