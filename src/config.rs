//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

use crate::scope::ExclusionMatch;
use crate::template::DEFAULT_TEMPLATE_NAME;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 模板文件路径（None 表示使用内置默认模板）
    pub template_path: Option<PathBuf>,
    // 模板资源名称（用于日志与错误信息）
    pub template_name: String,
    // 排除项比较基准
    pub exclusion_match: ExclusionMatch,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            exclusion_match: ExclusionMatch::default(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    /// 指定磁盘模板；资源名称随之改为该路径（仅用于日志）
    pub fn template_path(mut self, path: PathBuf) -> Self {
        self.config.template_name = path.display().to_string();
        self.config.template_path = Some(path);
        self
    }

    pub fn exclusion_match(mut self, mode: ExclusionMatch) -> Self {
        self.config.exclusion_match = mode;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
