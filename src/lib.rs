//! zapscope - 将范围列表编译为 OWASP ZAP Context 文档

// 导出全局错误类型
pub use self::error::{ScopeError, ScopeResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, GlobalConfig};

// 导出编译模块核心接口
pub use self::compiler::{CompiledPattern, PatternCompiler};

// 导出范围模块核心接口
pub use self::scope::{
    CompiledScope, ExclusionFilter, ExclusionMatch, HostMatch, ScopeInput, is_excluded,
};

// 导出模板模块核心接口
pub use self::template::{
    ContextTemplate, DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_NAME, EmbeddedTemplateSource,
    FileTemplateSource, FsTemplateSource, TemplateSource,
};

// 导出组装模块核心接口
pub use self::assembler::{ScopeAssembler, assemble};

// 声明所有子模块
pub mod assembler;
pub mod compiler;
pub mod config;
pub mod error;
pub mod scope;
pub mod template;
