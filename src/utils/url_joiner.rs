//! 探测URL拼接工具
//! 站点根地址 + 相对路径 → 绝对URL，处理缺失或重复的斜杠

use url::Url;

/// URL拼接工具
pub struct UrlJoiner;

impl UrlJoiner {
    /// 拼接站点地址与相对路径
    ///
    /// 相对路径始终作为站点路径的后缀（不同于 `Url::join` 的 RFC 3986 解析，
    /// `/a.js` 不会丢弃站点自身的子目录）。两者之间只保留一个 `/`。
    pub fn join(origin: &str, path: &str) -> Result<Url, url::ParseError> {
        let base = origin.trim_end_matches('/');
        let joined = if path.starts_with('?') || path.starts_with('#') {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        };
        Url::parse(&joined)
    }
}
