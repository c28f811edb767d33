//! 指纹数据模型定义
//! 仅存储指纹数据，无网络逻辑，支持序列化/反序列化

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 单条指纹记录（一个产品/版本的可检测特征）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    /// 产品标识，例如 "WordPress 5.2"，结果集按此去重
    #[serde(default, deserialize_with = "null_as_empty")]
    pub remark: String,
    /// 静态资源相对路径（用于校验和比对）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub staticurl: String,
    /// 静态资源内容的 MD5（小写十六进制）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub checksum: String,
    /// 关键字比对页面的相对路径
    #[serde(default, deserialize_with = "null_as_empty")]
    pub homeurl: String,
    /// 页面中应出现的关键字（字面子串）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keyword: String,
}

impl FingerprintRecord {
    pub fn new(
        remark: impl Into<String>,
        staticurl: impl Into<String>,
        checksum: impl Into<String>,
        homeurl: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self {
            remark: remark.into(),
            staticurl: staticurl.into(),
            checksum: checksum.into(),
            homeurl: homeurl.into(),
            keyword: keyword.into(),
        }
    }

    /// 仅校验和规则
    pub fn checksum_rule(
        remark: impl Into<String>,
        staticurl: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self::new(remark, staticurl, checksum, "", "")
    }

    /// 仅关键字规则
    pub fn keyword_rule(
        remark: impl Into<String>,
        homeurl: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        Self::new(remark, "", "", homeurl, keyword)
    }

    /// staticurl 与 checksum 均非空时参与校验和检测
    pub fn has_checksum_rule(&self) -> bool {
        !self.staticurl.is_empty() && !self.checksum.is_empty()
    }

    /// homeurl 与 keyword 均非空时参与关键字检测
    pub fn has_keyword_rule(&self) -> bool {
        !self.homeurl.is_empty() && !self.keyword.is_empty()
    }

    /// 两类规则都不成立的记录永远不会命中
    pub fn is_inert(&self) -> bool {
        !self.has_checksum_rule() && !self.has_keyword_rule()
    }
}

impl fmt::Display for FingerprintRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remark)
    }
}

// 缺失字段与 null 按空字符串处理，其他非字符串值取其 JSON 文本，不因字段类型中断加载
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// 指纹库：有序、加载后只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureStore {
    #[serde(rename = "RECORDS")]
    records: Vec<FingerprintRecord>,
}

impl SignatureStore {
    pub fn new(records: Vec<FingerprintRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FingerprintRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FingerprintRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 可能命中的记录数（排除无效记录）
    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_inert()).count()
    }
}

impl From<Vec<FingerprintRecord>> for SignatureStore {
    fn from(records: Vec<FingerprintRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a SignatureStore {
    type Item = &'a FingerprintRecord;
    type IntoIter = std::slice::Iter<'a, FingerprintRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
