//! cmsprint 命令行入口

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cmsprint::{DEFAULT_DATABASE, DEFAULT_USER_AGENT, FingerEngine, ScanConfig, SignatureLoader, Site};

/// CMS 指纹识别
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 目标站点，以 http:// 或 https:// 开头
    #[arg(short, long)]
    site: String,

    /// 指纹库文件
    #[arg(short, long, default_value = DEFAULT_DATABASE)]
    database: PathBuf,

    /// 并发检测的指纹条数（1 为顺序扫描）
    #[arg(short, long, default_value_t = 1)]
    concurrency: usize,

    /// 单次请求超时（秒）
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// 探测请求的 User-Agent
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// 最大重定向次数，0 表示不跟随
    #[arg(long, default_value_t = 10)]
    max_redirects: usize,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "cmsprint=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let site = Site::parse(&cli.site).context("目标站点无效")?;
    let config = ScanConfig::builder()
        .concurrency(cli.concurrency)
        .timeout_secs(cli.timeout)
        .user_agent(cli.user_agent)
        .max_redirects(cli.max_redirects)
        .build();

    info!("[-]start engine.");
    info!("[-]loading database from {}.", cli.database.display());
    let store = SignatureLoader::load(&cli.database)
        .await
        .with_context(|| format!("指纹库加载失败：{}", cli.database.display()))?;

    let engine = FingerEngine::new(store, config)?;
    info!(
        "[-]start finger print scan: {} records ({} active), concurrency {}.",
        engine.store().len(),
        engine.store().active_count(),
        engine.config().concurrency
    );
    let result = engine.scan(&site).await?;

    for remark in &result {
        info!("[+]fingerprint found: {}.", remark);
    }
    info!("[-]task finished.");
    Ok(())
}
