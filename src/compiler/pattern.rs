//! 编译后模式模型
//! 锚定、转义后的范围正则字符串

use regex::Regex;
use std::fmt;

use crate::error::ScopeResult;

/// 编译后的范围模式（生成后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledPattern(String);

impl CompiledPattern {
    pub(crate) fn new(pattern: String) -> Self {
        Self(pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 包装为 ZAP 包含项 `<incregexes>…</incregexes>`
    pub fn to_include_line(&self) -> String {
        format!("<incregexes>{}</incregexes>", self.0)
    }

    /// 包装为 ZAP 排除项 `<excregexes>…</excregexes>`
    pub fn to_exclude_line(&self) -> String {
        format!("<excregexes>{}</excregexes>", self.0)
    }

    /// 编译为可执行正则，用于校验某个URL是否落在范围内
    pub fn to_regex(&self) -> ScopeResult<Regex> {
        Ok(Regex::new(&self.0)?)
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompiledPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
