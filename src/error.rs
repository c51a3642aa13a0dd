//! 全局错误类型定义

use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    // 模板相关错误
    #[error("模板读取失败 [{name}]：{source}")]
    TemplateRead {
        name: String,
        #[source]
        source: IoError,
    },
    #[error("模板行数不足：共{lines}行，至少需要{required}行")]
    TemplateTooShort { lines: usize, required: usize },
    #[error("模板第{line}行缺少<name>占位元素")]
    MissingNamePlaceholder { line: usize },
    #[error("模板不是合法的UTF-8文本：{0}")]
    TemplateEncoding(#[from] FromUtf8Error),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 输入相关错误
    #[error("范围输入解析失败：{0}")]
    InputParseError(#[from] SerdeJsonError),
}

// 全局Result类型
pub type ScopeResult<T> = Result<T, ScopeError>;
