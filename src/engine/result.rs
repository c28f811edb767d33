//! 扫描结果集：命中记录的 remark，去重

use std::collections::BTreeSet;
use std::collections::btree_set;

use serde::Serialize;

/// 扫描结果集（按 remark 去重，迭代顺序为字典序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    remarks: BTreeSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增时返回 true，重复的 remark 返回 false
    pub fn insert(&mut self, remark: impl Into<String>) -> bool {
        self.remarks.insert(remark.into())
    }

    pub fn contains(&self, remark: &str) -> bool {
        self.remarks.contains(remark)
    }

    pub fn len(&self) -> usize {
        self.remarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remarks.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.remarks.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.remarks.into_iter().collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.remarks.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.remarks.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ResultSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            remarks: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut set = ResultSet::new();
        assert!(set.insert("WordPress"));
        assert!(!set.insert("WordPress"));
        assert!(set.insert("jQuery"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.into_vec(), vec!["WordPress".to_string(), "jQuery".to_string()]);
    }

    #[test]
    fn test_serializes_as_array() {
        let set: ResultSet = ["b", "a", "b"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}
