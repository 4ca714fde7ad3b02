//! # Markdown 预览桥：命令行入口
//!
//! 读取 Markdown 文件，按与视图相同的流程生成预览调用并输出到标准输出。
//! 适合在没有 webview 的环境下检查页面脚本实际会收到什么。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use marked_view::error::AppError;
use marked_view::host::ScriptHost;
use marked_view::preview::{CapabilityTier, PreviewError};
use marked_view::settings::PreviewSettings;
use marked_view::view::MarkedView;

#[derive(Parser, Debug)]
#[command(name = "marked-view")]
#[command(version, about = "把 Markdown 转换为 webview 预览脚本调用", long_about = None)]
struct Cli {
    /// Markdown 文件路径
    file: PathBuf,

    /// 使用 Legacy 档（输出 javascript: 伪地址）
    #[arg(long)]
    legacy: bool,

    /// 宿主 API 级别，低于 19 时使用 Legacy 档
    #[arg(long)]
    api_level: Option<u32>,

    /// 禁用预览中代码块滚动
    #[arg(long)]
    disable_code_scroll: bool,

    /// 设置文件（JSON）
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// 把收到的调用直接打印出来的宿主。
struct StdoutHost;

impl ScriptHost for StdoutHost {
    fn navigate(&self, url: &str) -> Result<(), PreviewError> {
        println!("{}", url);
        Ok(())
    }

    fn evaluate_script(&self, script: &str) -> Result<(), PreviewError> {
        println!("{}", script);
        Ok(())
    }
}

fn resolve_tier(cli: &Cli, settings: &PreviewSettings) -> CapabilityTier {
    if cli.legacy {
        return CapabilityTier::Legacy;
    }
    match cli.api_level {
        Some(level) => CapabilityTier::from_api_level(level),
        None => settings.resolve_tier(),
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = match &cli.settings {
        Some(path) => PreviewSettings::load_from_path(path)?,
        None => PreviewSettings::default(),
    };

    let tier = resolve_tier(&cli, &settings);
    log::info!("▶️ 开始渲染 - 文件: {} 档位: {}", cli.file.display(), tier.as_str());

    let mut view = MarkedView::new(StdoutHost, tier);
    settings.apply_to(&mut view);
    if cli.disable_code_scroll {
        view.disable_code_scroll();
    }

    view.load_from_path(&cli.file)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 渲染失败: {err}");
            ExitCode::FAILURE
        }
    }
}
