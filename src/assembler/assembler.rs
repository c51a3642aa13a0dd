//! 文档组装器核心：编译范围输入，并拼接进 ZAP Context 模板
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::compiler::PatternCompiler;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::ScopeResult;
use crate::scope::{CompiledScope, ExclusionFilter, HostMatch, ScopeInput};
use crate::template::{ContextTemplate, EmbeddedTemplateSource, FileTemplateSource, TemplateSource};

/// 范围文档组装器
///
/// 不持有任何跨调用的累积状态，可在多线程间共享。
#[derive(Clone)]
pub struct ScopeAssembler {
    config: GlobalConfig,
    source: Arc<dyn TemplateSource + Send + Sync>,
}

impl ScopeAssembler {
    /// 按配置创建组装器（未指定模板路径时使用内置模板）
    ///
    /// 指定路径时直接读取该文件，`template_name` 只用于日志与错误信息。
    pub fn new(config: GlobalConfig) -> Self {
        let source: Arc<dyn TemplateSource + Send + Sync> = match &config.template_path {
            Some(path) => Arc::new(FileTemplateSource::new(path.clone())),
            None => Arc::new(EmbeddedTemplateSource::default()),
        };
        Self { config, source }
    }

    /// 使用自定义模板资源创建组装器
    pub fn with_source<S>(config: GlobalConfig, source: S) -> Self
    where
        S: TemplateSource + Send + Sync + 'static,
    {
        Self {
            config,
            source: Arc::new(source),
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 读取并校验模板，读取失败直接返回错误
    pub fn load_template(&self) -> ScopeResult<ContextTemplate> {
        let data = self.source.read(&self.config.template_name)?;
        let template = ContextTemplate::from_bytes(data)?;
        debug!(
            "模板 [{}] 加载完成，共{}行",
            self.config.template_name,
            template.lines().len()
        );
        Ok(template)
    }

    /// 编译范围输入为包含/排除行（每次调用独立构建）
    pub fn compile_scope(&self, input: &ScopeInput) -> CompiledScope {
        let start = Instant::now();
        if input.is_empty() {
            warn!("范围输入为空，文档只替换名称行");
        }

        let filter = ExclusionFilter::new(&input.excludes, self.config.exclusion_match);
        let mut scope = CompiledScope::default();
        let mut excluded = 0usize;

        // 1. 主机/URL 匹配
        for host in &input.hosts {
            if Self::include(&mut scope, &filter, &host.target, host) {
                excluded += 1;
            }
        }

        // 2. IP段与 CIDR，协议与端口均未指定
        for bare in input.ip_ranges.iter().chain(&input.cidrs) {
            let record = HostMatch::new(bare.as_str());
            if Self::include(&mut scope, &filter, bare, &record) {
                excluded += 1;
            }
        }

        // 3. 排除列表按裸字符串编译
        scope.excludes = input
            .excludes
            .iter()
            .map(|item| PatternCompiler::compile_bare(item).to_exclude_line())
            .collect();

        debug!(
            "✅ 范围编译完成，耗时{:?}，包含{}条、排除{}条、被排除跳过{}条（比较基准：{:?}）",
            start.elapsed(),
            scope.includes.len(),
            scope.excludes.len(),
            excluded,
            filter.mode()
        );

        scope
    }

    /// 编译单条记录，未被排除则追加到包含集合；返回是否被排除
    fn include(
        scope: &mut CompiledScope,
        filter: &ExclusionFilter<'_>,
        raw: &str,
        record: &HostMatch,
    ) -> bool {
        if raw.is_empty() {
            warn!("范围目标为空，仍按原样编译");
        }

        let pattern = record.compile();
        if filter.is_excluded(raw, &pattern) {
            debug!("目标 [{}] 命中排除列表，跳过", raw);
            return true;
        }

        scope.includes.push(pattern.to_include_line());
        false
    }

    /// 组装完整文档：读取模板、替换名称、插入包含/排除行
    pub fn assemble(&self, input: &ScopeInput, scope_name: &str) -> ScopeResult<Vec<u8>> {
        let template = self.load_template()?;
        let scope = self.compile_scope(input);
        Ok(Self::render(&template, &scope, scope_name))
    }

    /// 将已编译的范围渲染进模板
    pub fn render(
        template: &ContextTemplate,
        scope: &CompiledScope,
        scope_name: &str,
    ) -> Vec<u8> {
        template.render(scope_name, scope.lines())
    }
}

/// 使用默认配置组装范围文档（内置模板、逐字比较排除项）
pub fn assemble(
    hosts: &[HostMatch],
    ip_ranges: &[String],
    cidrs: &[String],
    excludes: &[String],
    scope_name: &str,
) -> ScopeResult<Vec<u8>> {
    let input = ScopeInput {
        hosts: hosts.to_vec(),
        ip_ranges: ip_ranges.to_vec(),
        cidrs: cidrs.to_vec(),
        excludes: excludes.to_vec(),
    };
    ScopeAssembler::new(ConfigManager::get_default()).assemble(&input, scope_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use crate::scope::ExclusionMatch;

    const SEVEN_LINES: &str = "<a>\n<b>\n<c>\n<name>PLACEHOLDER</name>\n<d>\n<something/>\n</a>";

    /// 测试用内存模板
    struct StaticSource(&'static str);

    impl TemplateSource for StaticSource {
        fn read(&self, _name: &str) -> ScopeResult<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    /// 始终失败的模板资源
    struct FailingSource;

    impl TemplateSource for FailingSource {
        fn read(&self, name: &str) -> ScopeResult<Vec<u8>> {
            Err(ScopeError::TemplateRead {
                name: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            })
        }
    }

    fn assembler(mode: ExclusionMatch) -> ScopeAssembler {
        let config = ConfigManager::custom().exclusion_match(mode).build();
        ScopeAssembler::with_source(config, StaticSource(SEVEN_LINES))
    }

    fn output_lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes).unwrap().split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_end_to_end_single_host() {
        let input = ScopeInput {
            hosts: vec![HostMatch::new("example.com")],
            ..Default::default()
        };
        let output = assembler(ExclusionMatch::Verbatim)
            .assemble(&input, "MyScope")
            .unwrap();
        let lines = output_lines(output);

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3], "<name>MyScope</name>");
        assert_eq!(lines[5], "<something/>");
        assert_eq!(lines[6], r"<incregexes>^http(s)?:\/\/example\.com[\S]*$</incregexes>");
        assert_eq!(lines[7], "</a>");
    }

    #[test]
    fn test_empty_input_only_replaces_name() {
        let output = assembler(ExclusionMatch::Verbatim)
            .assemble(&ScopeInput::default(), "MyScope")
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            SEVEN_LINES.replace("PLACEHOLDER", "MyScope")
        );
    }

    #[test]
    fn test_ordering_hosts_then_ranges_then_cidrs_then_excludes() {
        let input = ScopeInput {
            hosts: vec![HostMatch::new("b.com"), HostMatch::new("a.com")],
            ip_ranges: vec!["10.0.0.1-5".to_string()],
            cidrs: vec!["10.1.0.0/16".to_string()],
            excludes: vec!["z.com".to_string(), "y.com".to_string()],
        };
        let scope = assembler(ExclusionMatch::Verbatim).compile_scope(&input);

        assert_eq!(
            scope.includes,
            vec![
                r"<incregexes>^http(s)?:\/\/b\.com[\S]*$</incregexes>",
                r"<incregexes>^http(s)?:\/\/a\.com[\S]*$</incregexes>",
                r"<incregexes>^http(s)?:\/\/10\.0\.0\.1-5[\S]*$</incregexes>",
                r"<incregexes>^http(s)?:\/\/10\.1\.0\.0\/16[\S]*$</incregexes>",
            ]
        );
        assert_eq!(
            scope.excludes,
            vec![
                r"<excregexes>^http(s)?:\/\/z\.com[\S]*$</excregexes>",
                r"<excregexes>^http(s)?:\/\/y\.com[\S]*$</excregexes>",
            ]
        );
    }

    #[test]
    fn test_verbatim_exclusion_of_compiled_pattern() {
        // 测试场景：排除项为编译后的模式，对应包含行不输出，但仍生成排除行
        let compiled = r"^http(s)?:\/\/example\.com[\S]*$".to_string();
        let input = ScopeInput {
            hosts: vec![HostMatch::new("example.com"), HostMatch::new("other.com")],
            excludes: vec![compiled.clone()],
            ..Default::default()
        };
        let scope = assembler(ExclusionMatch::Verbatim).compile_scope(&input);

        assert_eq!(scope.includes, vec![r"<incregexes>^http(s)?:\/\/other\.com[\S]*$</incregexes>"]);
        assert_eq!(
            scope.excludes,
            vec![format!("<excregexes>{}</excregexes>", PatternCompiler::compile_bare(&compiled))]
        );
    }

    #[test]
    fn test_verbatim_raw_exclusion_never_matches() {
        let input = ScopeInput {
            hosts: vec![HostMatch::new("example.com")],
            cidrs: vec!["10.0.0.0/8".to_string()],
            excludes: vec!["example.com".to_string(), "10.0.0.0/8".to_string()],
            ..Default::default()
        };
        let scope = assembler(ExclusionMatch::Verbatim).compile_scope(&input);
        assert_eq!(scope.includes.len(), 2);
    }

    #[test]
    fn test_raw_and_compiled_exclusion_modes() {
        let input = ScopeInput {
            hosts: vec![HostMatch::new("example.com"), HostMatch::new("keep.com")],
            cidrs: vec!["10.0.0.0/8".to_string()],
            excludes: vec!["example.com".to_string(), "10.0.0.0/8".to_string()],
            ..Default::default()
        };

        for mode in [ExclusionMatch::Raw, ExclusionMatch::Compiled] {
            let scope = assembler(mode).compile_scope(&input);
            assert_eq!(
                scope.includes,
                vec![r"<incregexes>^http(s)?:\/\/keep\.com[\S]*$</incregexes>"],
                "mode {:?}",
                mode
            );
            assert_eq!(scope.excludes.len(), 2);
        }
    }

    #[test]
    fn test_repeated_calls_do_not_accumulate() {
        // 测试场景：连续两次组装，结果完全一致
        let input = ScopeInput {
            hosts: vec![HostMatch::new("example.com")],
            excludes: vec!["x.com".to_string()],
            ..Default::default()
        };
        let assembler = assembler(ExclusionMatch::Verbatim);
        let first = assembler.assemble(&input, "S").unwrap();
        let second = assembler.assemble(&input, "S").unwrap();
        assert_eq!(first, second);
        assert_eq!(output_lines(second).len(), 9);
    }

    #[test]
    fn test_template_read_failure_propagates() {
        let assembler = ScopeAssembler::with_source(ConfigManager::get_default(), FailingSource);
        let err = assembler.assemble(&ScopeInput::default(), "S").unwrap_err();
        assert!(matches!(err, ScopeError::TemplateRead { .. }));
    }

    #[test]
    fn test_short_template_is_reported() {
        let assembler = ScopeAssembler::with_source(ConfigManager::get_default(), StaticSource("a\nb\nc"));
        let err = assembler.assemble(&ScopeInput::default(), "S").unwrap_err();
        assert!(matches!(err, ScopeError::TemplateTooShort { lines: 3, .. }));
    }

    #[test]
    fn test_scope_name_is_not_escaped() {
        let output = assembler(ExclusionMatch::Verbatim)
            .assemble(&ScopeInput::default(), "R&D <prod>")
            .unwrap();
        assert_eq!(output_lines(output)[3], "<name>R&D <prod></name>");
    }

    #[test]
    fn test_assemble_with_default_template() {
        let bytes = assemble(
            &[HostMatch::new("*.example.com").with_port(":8443")],
            &[],
            &["192.168.0.0/24".to_string()],
            &["admin.example.com".to_string()],
            "Bounty",
        )
        .unwrap();
        let lines = output_lines(bytes);

        assert_eq!(lines[3], "<name>Bounty</name>");
        assert_eq!(lines[5].trim(), "<inscope>true</inscope>");
        assert_eq!(lines[6], r"<incregexes>^[a-z]+:\/\/[\S]*\.example\.com:8443[\S]*$</incregexes>");
        assert_eq!(lines[7], r"<incregexes>^http(s)?:\/\/192\.168\.0\.0\/24[\S]*$</incregexes>");
        assert_eq!(lines[8], r"<excregexes>^http(s)?:\/\/admin\.example\.com[\S]*$</excregexes>");
        assert_eq!(lines.last().map(String::as_str), Some("</configuration>"));
    }
}
