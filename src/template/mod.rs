//! 模板模块：模板资源读取与行模型
pub mod document;
pub mod source;

// 导出核心接口
pub use self::document::{ANCHOR_LINE, ContextTemplate, MIN_TEMPLATE_LINES, NAME_LINE};
pub use self::source::{
    DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_NAME, EmbeddedTemplateSource, FileTemplateSource,
    FsTemplateSource, TemplateSource,
};
