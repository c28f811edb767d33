//! 扫描模块：指纹扫描核心逻辑
pub mod result;
pub mod scanner;

// 导出核心接口
pub use self::result::ResultSet;
pub use self::scanner::{FingerEngine, RecordVerdict, scan};
