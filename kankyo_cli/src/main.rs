//! `kankyo_cli`：环境过滤 demo（交互式）。
//!
//! 按行输入候选（空白分隔，视为同一个 segment 的候选列表），
//! 输出过滤/归一化之后的候选与「是否有修改」。
//! capability 标签、归一化策略、平台方向都从命令行给定。

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use kankyo_charset::CapabilitySet;
use kankyo_core::model::Segment;
use kankyo_core::normalizer::{NormalizationPolicy, Platform};
use kankyo_core::rewriter::{EnvironmentFilter, Rewriter};

#[derive(Parser)]
#[command(name = "kankyo_cli", about = "候选环境过滤 demo（字符组 capability + 归一化策略）")]
struct Cli {
    /// 客户端声明可渲染的字符组标签（可重复），例如 KANA_SUPPLEMENT_6_0
    #[arg(long = "cap", value_name = "TAG")]
    caps: Vec<String>,

    /// 归一化策略
    #[arg(long, value_enum, default_value_t = PolicyArg::Default)]
    policy: PolicyArg,

    /// 覆盖平台默认方向（缺省取编译目标）
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// 跟随平台（Windows 替换，其余不替换）
    Default,
    /// 无条件替换
    All,
    /// 无条件不替换
    None,
}

impl From<PolicyArg> for NormalizationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Default => Self::PlatformDefault,
            PolicyArg::All => Self::ForceAll,
            PolicyArg::None => Self::ForceNone,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Windows,
    Other,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Windows => Self::Windows,
            PlatformArg::Other => Self::Other,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let capabilities = CapabilitySet::from_tags(cli.caps.iter().map(String::as_str));
    let platform = cli.platform.map(Platform::from).unwrap_or_else(Platform::current);

    let mut filter = EnvironmentFilter::with_platform(platform);
    filter.set_normalization_policy(cli.policy.into());

    repl(&filter, &capabilities)
}

fn repl(filter: &EnvironmentFilter, capabilities: &CapabilitySet) -> Result<()> {
    let mut out = io::stdout();
    writeln!(out, "kankyo demo | 空白分隔输入候选，:q 退出")?;

    let mut line = String::new();
    loop {
        line.clear();
        print!("候选>");
        out.flush()?;
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == ":q" || input == ":quit" {
            break;
        }

        let mut segment = Segment::with_values("cli", input.split_whitespace());
        let modified = filter.rewrite(capabilities, std::slice::from_mut(&mut segment));

        if segment.candidates.is_empty() {
            writeln!(out, "（候选全部被剔除）")?;
        }
        for (i, candidate) in segment.candidates.iter().enumerate() {
            writeln!(out, "{}) {}", i + 1, candidate.value)?;
        }
        writeln!(out, "modified: {modified}")?;
    }
    Ok(())
}
