//! 编译模块：将范围目标编译为锚定的正则模式
pub mod compiler;
pub mod pattern;

pub use self::compiler::PatternCompiler;
pub use self::pattern::CompiledPattern;
