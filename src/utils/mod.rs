//! 通用工具模块
pub mod charset;
pub mod digest;
pub mod url_joiner;

pub use self::charset::decode_body;
pub use self::digest::md5_hex;
pub use self::url_joiner::UrlJoiner;
