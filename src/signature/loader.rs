//! 指纹库加载
//! 负责从本地 JSON 文件读取指纹库，结构为 { "RECORDS": [ {...}, ... ] }

use std::path::Path;

use tracing::debug;

use super::model::SignatureStore;
use crate::error::{CmsResult, CmsprintError};

/// 指纹库加载器
pub struct SignatureLoader;

impl SignatureLoader {
    /// 从本地文件加载指纹库
    pub async fn load(path: impl AsRef<Path>) -> CmsResult<SignatureStore> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| CmsprintError::DatabaseLoadError {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::from_slice(&data)?;
        debug!(
            "指纹库加载成功：{}，记录总数：{}，有效记录数：{}",
            path.display(),
            store.len(),
            store.active_count()
        );
        Ok(store)
    }

    /// 从内存字节解析指纹库
    pub fn from_slice(data: &[u8]) -> CmsResult<SignatureStore> {
        Ok(serde_json::from_slice(data)?)
    }

    /// 从 JSON 字符串解析指纹库
    pub fn from_json_str(data: &str) -> CmsResult<SignatureStore> {
        Ok(serde_json::from_str(data)?)
    }
}
