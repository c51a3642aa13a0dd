//! 组装模块：范围编译与文档拼接
pub mod assembler;

// 导出核心接口
pub use self::assembler::{ScopeAssembler, assemble};
