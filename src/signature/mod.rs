//! 指纹库模块：负责指纹数据模型定义与加载
pub mod loader;
pub mod model;

// 导出核心接口
pub use self::loader::SignatureLoader;
pub use self::model::{FingerprintRecord, SignatureStore};
