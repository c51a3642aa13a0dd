//! 范围输入数据模型
//! 主机/URL匹配记录、IP段与CIDR裸字符串、排除列表
//! 以及单次编译产出的包含/排除集合

use regex::Captures;
use serde::{Deserialize, Serialize};

use crate::compiler::{CompiledPattern, PatternCompiler};

/// 旧式位置约定中的分组下标
const CAPTURE_FULL: usize = 0;
const CAPTURE_SCHEME: usize = 1;
const CAPTURE_PORT: usize = 5;

/// 主机/URL 匹配记录
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostMatch {
    /// 完整匹配文本
    pub target: String,
    /// URI 协议（空或缺省表示未指定）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// 端口，原样追加在目标之后（通常带冒号，如 `:8080`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl HostMatch {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            scheme: None,
            port: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// 从上游正则捕获结果构建（分组0=完整匹配，1=协议，5=端口）
    ///
    /// 未参与匹配的分组视为未指定；分组不足时同样视为未指定。
    pub fn from_captures(captures: &Captures<'_>) -> Self {
        let group = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            target: group(CAPTURE_FULL).unwrap_or_default(),
            scheme: group(CAPTURE_SCHEME),
            port: group(CAPTURE_PORT),
        }
    }

    /// 编译为范围模式
    pub fn compile(&self) -> CompiledPattern {
        PatternCompiler::compile(&self.target, self.scheme.as_deref(), self.port.as_deref())
    }
}

/// 一次编译的完整输入
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeInput {
    /// 主机/URL 匹配（除 IP段与 CIDR 之外的所有匹配）
    pub hosts: Vec<HostMatch>,
    /// IP段（单个地址或范围表达式）
    pub ip_ranges: Vec<String>,
    /// CIDR（地址/前缀）
    pub cidrs: Vec<String>,
    /// 排除列表
    pub excludes: Vec<String>,
}

impl ScopeInput {
    /// 从 JSON 文本解析
    pub fn from_json(json: &str) -> crate::ScopeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
            && self.ip_ranges.is_empty()
            && self.cidrs.is_empty()
            && self.excludes.is_empty()
    }
}

/// 单次编译产出：已打标签的包含/排除行，按输入顺序排列
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledScope {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl CompiledScope {
    /// 包含行在前、排除行在后
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().chain(self.excludes.iter()).map(String::as_str)
    }
}
