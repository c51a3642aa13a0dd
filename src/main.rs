//! # zapscope
//!
//! 将 JSON 范围输入编译为 ZAP Context 文档。
//!
//! ```bash
//! # 使用内置模板，输出到标准输出
//! zapscope --input scope.json --name Bounty
//!
//! # 指定模板与输出文件，排除项按原文比较
//! zapscope -i scope.json -n Bounty -t my.context -o bounty.context --exclusion-match raw
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use zapscope::{ConfigManager, ExclusionMatch, ScopeAssembler, ScopeInput};

/// 范围列表 → ZAP Context 编译工具
#[derive(Parser)]
#[command(name = "zapscope")]
#[command(version)]
#[command(about = "Compile a scope list into an OWASP ZAP context document")]
struct Cli {
    /// JSON 范围输入文件（hosts / ip_ranges / cidrs / excludes）
    #[arg(long, short = 'i', value_name = "PATH")]
    input: PathBuf,

    /// Context 名称
    #[arg(long, short = 'n', default_value = "Default Context")]
    name: String,

    /// 模板文件路径 (可选，默认使用内置模板)
    #[arg(long, short = 't', value_name = "PATH")]
    template: Option<PathBuf>,

    /// 输出文件路径 (可选，默认输出到标准输出)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// 排除项比较基准
    #[arg(long, value_enum, default_value_t = ExclusionMatch::Verbatim)]
    exclusion_match: ExclusionMatch,

    /// 显示调试信息
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// 日志输出到 stderr，stdout 只承载 XML 文档
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // 1. 构建配置
    let mut builder = ConfigManager::custom().exclusion_match(cli.exclusion_match);
    if let Some(path) = cli.template {
        builder = builder.template_path(path);
    }
    let config = builder.build();
    debug!("配置：{:?}", config);

    // 2. 读取范围输入
    let json = fs::read_to_string(&cli.input)
        .with_context(|| format!("无法读取范围输入 {}", cli.input.display()))?;
    let input = ScopeInput::from_json(&json)
        .with_context(|| format!("范围输入格式错误 {}", cli.input.display()))?;

    // 3. 组装文档
    let assembler = ScopeAssembler::new(config);
    let document = assembler.assemble(&input, &cli.name).with_context(|| {
        format!("组装 Context 失败（模板：{}）", assembler.config().template_name)
    })?;

    // 4. 输出（文件与标准输出写入相同字节）
    match cli.output {
        Some(path) => {
            let file = fs::File::create(&path)
                .with_context(|| format!("无法创建 {}", path.display()))?;
            write_document(file, &document)
                .with_context(|| format!("无法写入 {}", path.display()))?;
            info!("Context 已写入 {}，大小：{} 字节", path.display(), document.len());
        }
        None => write_document(io::stdout().lock(), &document).context("无法写入标准输出")?,
    }

    Ok(())
}

/// 原样写出文档，不追加换行
fn write_document<W: Write>(mut writer: W, document: &[u8]) -> io::Result<()> {
    writer.write_all(document)?;
    writer.flush()
}
