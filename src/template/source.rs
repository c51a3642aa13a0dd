//! 模板资源读取
//! 只提供“按名称读取资源字节”这一接口，读取失败直接向上传播

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ScopeError, ScopeResult};

/// 内置默认模板的资源名称
pub const DEFAULT_TEMPLATE_NAME: &str = "configs/default.context";

/// 内置默认 ZAP Context 模板
pub const DEFAULT_TEMPLATE: &str = include_str!("../../configs/default.context");

/// 按名称读取模板资源
pub trait TemplateSource {
    fn read(&self, name: &str) -> ScopeResult<Vec<u8>>;
}

/// 编译进二进制的模板，忽略资源名称
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTemplateSource {
    content: &'static str,
}

impl EmbeddedTemplateSource {
    pub fn new(content: &'static str) -> Self {
        Self { content }
    }
}

impl Default for EmbeddedTemplateSource {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl TemplateSource for EmbeddedTemplateSource {
    fn read(&self, name: &str) -> ScopeResult<Vec<u8>> {
        debug!("使用内置模板 [{}]，大小：{} 字节", name, self.content.len());
        Ok(self.content.as_bytes().to_vec())
    }
}

/// 文件系统模板，相对名称按根目录解析，绝对路径原样使用
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    root: PathBuf,
}

impl FsTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for FsTemplateSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TemplateSource for FsTemplateSource {
    fn read(&self, name: &str) -> ScopeResult<Vec<u8>> {
        let path = self.resolve(name);
        let data = fs::read(&path).map_err(|source| ScopeError::TemplateRead {
            name: path.display().to_string(),
            source,
        })?;

        debug!("模板文件读取成功 [{}]，大小：{} 字节", path.display(), data.len());
        Ok(data)
    }
}

/// 单个模板文件，资源名称仅用于日志
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSource for FileTemplateSource {
    fn read(&self, name: &str) -> ScopeResult<Vec<u8>> {
        let data = fs::read(&self.path).map_err(|source| ScopeError::TemplateRead {
            name: name.to_string(),
            source,
        })?;

        debug!("模板文件读取成功 [{}]，大小：{} 字节", self.path.display(), data.len());
        Ok(data)
    }
}
