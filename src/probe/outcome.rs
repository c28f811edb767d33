//! 探测结果

use super::fetcher::ProbeError;

/// 单个探测器对单条记录的结果
#[derive(Debug)]
pub enum ProbeOutcome {
    /// 记录缺少该探测所需字段，未发出请求
    Skipped,
    Matched,
    NotMatched,
    /// 请求失败（超时、连接错误、非 200 等），按未命中处理
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Matched)
    }

    pub(crate) fn from_bool(matched: bool) -> Self {
        if matched {
            ProbeOutcome::Matched
        } else {
            ProbeOutcome::NotMatched
        }
    }
}
