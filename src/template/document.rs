//! ZAP Context 模板的行模型
//! 固定形状：第3行（0起）为名称占位，第5行之后为插入点

use crate::error::{ScopeError, ScopeResult};

/// 名称占位所在行
pub const NAME_LINE: usize = 3;
/// 插入点：在该行之后插入包含/排除行
pub const ANCHOR_LINE: usize = 5;
/// 模板最少行数
pub const MIN_TEMPLATE_LINES: usize = ANCHOR_LINE + 1;

/// 已校验的模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTemplate {
    lines: Vec<String>,
}

impl ContextTemplate {
    /// 从原始字节解析并校验
    pub fn from_bytes(data: Vec<u8>) -> ScopeResult<Self> {
        let text = String::from_utf8(data)?;
        Self::parse(&text)
    }

    /// 按行切分并校验形状
    ///
    /// 行尾的 `\r` 会被去掉，末尾换行不会产生额外空行。
    pub fn parse(text: &str) -> ScopeResult<Self> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();

        if lines.len() < MIN_TEMPLATE_LINES {
            return Err(ScopeError::TemplateTooShort {
                lines: lines.len(),
                required: MIN_TEMPLATE_LINES,
            });
        }

        let name_line = lines[NAME_LINE].trim();
        if !(name_line.starts_with("<name>") && name_line.ends_with("</name>")) {
            return Err(ScopeError::MissingNamePlaceholder { line: NAME_LINE });
        }

        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 渲染最终文档：替换名称行，在插入点之后依次插入 `inserted`
    ///
    /// 各行以 `\n` 连接，末尾不追加换行；名称不做 XML 转义。
    pub fn render<'a, I>(&self, scope_name: &str, inserted: I) -> Vec<u8>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let name_line = format!("<name>{scope_name}</name>");
        let mut inserted = Some(inserted);
        let mut output: Vec<&str> = Vec::with_capacity(self.lines.len());

        for (index, line) in self.lines.iter().enumerate() {
            output.push(if index == NAME_LINE {
                name_line.as_str()
            } else {
                line.as_str()
            });

            if index == ANCHOR_LINE {
                for extra in inserted.take().into_iter().flatten() {
                    output.push(extra);
                }
            }
        }

        output.join("\n").into_bytes()
    }
}
