//! 范围模块：输入数据模型与排除项过滤
pub mod filter;
pub mod model;

// 导出核心接口
pub use self::filter::{ExclusionFilter, ExclusionMatch, is_excluded};
pub use self::model::{CompiledScope, HostMatch, ScopeInput};
