//! 扫描目标站点

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{CmsResult, CmsprintError};
use crate::utils::UrlJoiner;

/// 已校验的目标站点根地址（http/https）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    origin: String,
}

impl Site {
    pub fn parse(input: &str) -> CmsResult<Self> {
        let input = input.trim();
        let url = Url::parse(input)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CmsprintError::InvalidSite(format!(
                "{}：仅支持 http:// 或 https://",
                input
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(CmsprintError::InvalidSite(format!("{}：缺少主机名", input)));
        }

        Ok(Self {
            origin: input.trim_end_matches('/').to_string(),
        })
    }

    /// 站点根地址（不含末尾斜杠）
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// 拼接探测地址
    pub fn probe_url(&self, path: &str) -> Result<Url, url::ParseError> {
        UrlJoiner::join(&self.origin, path)
    }
}

impl FromStr for Site {
    type Err = CmsprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)
    }
}
