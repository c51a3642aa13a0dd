//! 排除项过滤
//! 线性扫描排除列表，首个命中即返回

use crate::compiler::{CompiledPattern, PatternCompiler};

/// 排除项比较基准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExclusionMatch {
    /// 编译后的候选模式与排除项原文逐字比较
    #[default]
    Verbatim,
    /// 候选的原始目标文本与排除项原文比较
    Raw,
    /// 编译后的候选模式与编译后的排除项比较
    Compiled,
}

/// 排除项过滤器（每次编译构建一次）
#[derive(Debug, Clone)]
pub struct ExclusionFilter<'a> {
    mode: ExclusionMatch,
    entries: &'a [String],
    // 仅 Compiled 模式下填充
    compiled: Vec<CompiledPattern>,
}

impl<'a> ExclusionFilter<'a> {
    pub fn new(entries: &'a [String], mode: ExclusionMatch) -> Self {
        let compiled = match mode {
            ExclusionMatch::Compiled => entries
                .iter()
                .map(|e| PatternCompiler::compile_bare(e))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            mode,
            entries,
            compiled,
        }
    }

    pub fn mode(&self) -> ExclusionMatch {
        self.mode
    }

    /// 判断候选是否被排除
    ///
    /// `raw` 为候选的原始目标文本，`candidate` 为其编译结果（尚未打标签）。
    pub fn is_excluded(&self, raw: &str, candidate: &CompiledPattern) -> bool {
        match self.mode {
            ExclusionMatch::Verbatim => is_excluded(candidate.as_str(), self.entries),
            ExclusionMatch::Raw => is_excluded(raw, self.entries),
            ExclusionMatch::Compiled => self.compiled.iter().any(|exclude| exclude == candidate),
        }
    }
}

/// 精确字符串相等的成员判断
pub fn is_excluded(candidate: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| exclude == candidate)
}
