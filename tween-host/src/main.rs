//! # Tween Host (headless)
//!
//! 按帧回放内置演示场景，并以 JSON 输出各目标的最终状态。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p tween-host
//! cargo run -p tween-host -- --config config.json --frames 240
//! cargo run -p tween-host -- --log-level debug
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tween_host::{HostConfig, demo};

#[derive(Parser)]
#[command(name = "tween-host")]
#[command(about = "补间引擎 headless 演示")]
#[command(version)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 运行帧数（覆盖配置文件）
    #[arg(short, long)]
    frames: Option<u32>,

    /// 日志级别（覆盖配置文件）
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tween-host: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = HostConfig::load(&cli.config);
    if let Some(level) = cli.log_level {
        config.debug.log_level = level;
    }
    if let Some(frames) = cli.frames {
        config.demo.frames = frames;
    }
    config.validate().context("配置无效")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_target(false)
        .init();

    let report = demo::run(&config, config.demo.frames).context("演示场景运行失败")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
