//! 范围模式编译器核心
//! 仅负责将单个目标（可选协议/端口）编译为锚定的正则字符串

use super::pattern::CompiledPattern;

/// 仅限 Web 协议的前缀（无协议、无端口时使用）
const WEB_SCHEME_PREFIX: &str = "http(s)?://";
/// 任意小写协议前缀（无协议、有端口时使用）
const ANY_SCHEME_PREFIX: &str = "[a-z]+://";
/// 通配符与尾部的非空白串，ZAP 需要它覆盖 URL 路径与参数
const NON_WHITESPACE_RUN: &str = r"[\S]*";

/// 范围模式编译器
pub struct PatternCompiler;

impl PatternCompiler {
    /// 编译单个目标
    ///
    /// 空字符串与 `None` 同样视为“未指定”。任何输入（包括空目标）都会生成模式，
    /// 不做主机/IP 合法性校验。
    pub fn compile(target: &str, scheme: Option<&str>, port: Option<&str>) -> CompiledPattern {
        let scheme = scheme.filter(|s| !s.is_empty());
        let port = port.filter(|p| !p.is_empty());

        // 1. 按协议/端口组合添加前缀
        let line = match (scheme, port) {
            (None, None) => format!("{WEB_SCHEME_PREFIX}{target}"),
            (None, Some(port)) => format!("{ANY_SCHEME_PREFIX}{target}{port}"),
            (Some(scheme), Some(port)) => format!("{scheme}://{target}{port}"),
            // 有协议无端口：不加前缀
            (Some(_), None) => target.to_string(),
        };

        // 2. 转义 '.' 与 '/'，再替换通配符（顺序不可调换，否则会转义通配符展开结果）
        let line = line
            .replace('.', r"\.")
            .replace('/', r"\/")
            .replace('*', NON_WHITESPACE_RUN);

        // 3. 锚定
        CompiledPattern::new(format!("^{line}{NON_WHITESPACE_RUN}$"))
    }

    /// 编译裸字符串目标（IP段、CIDR、排除项），协议与端口均未指定
    pub fn compile_bare(target: &str) -> CompiledPattern {
        Self::compile(target, None, None)
    }
}
