//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 tween-runtime 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `config-check`: 检查宿主配置文件，并用它回放一次演示场景

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use tween_host::{HostConfig, demo};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 运行 tween-runtime 覆盖率报告
    CovRuntime,
    /// 运行 workspace 覆盖率报告
    CovWorkspace,
    /// 检查配置文件
    ConfigCheck {
        /// 配置文件路径
        #[arg(default_value = "config.json")]
        path: PathBuf,
    },
}

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    let status = cmd.status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Task::CheckAll => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        Task::CovRuntime => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "tween-runtime", "--html"]);
            run("cargo llvm-cov -p tween-runtime --html", &mut cov)?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Task::CovWorkspace => {
            ensure_cargo_llvm_cov_available()?;

            // 排除 xtask 以免稀释信号
            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "--workspace", "--exclude", "xtask", "--html"]);
            run(
                "cargo llvm-cov --workspace --exclude xtask --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Task::ConfigCheck { path } => config_check(&path)?,
    }

    Ok(())
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 严格加载并验证配置，然后按配置回放演示场景
fn config_check(path: &Path) -> anyhow::Result<()> {
    eprintln!("==> 检查配置文件: {}", path.display());

    let config = HostConfig::try_load(path)?;
    config.validate()?;
    eprintln!(
        "帧率 {} fps，时间缩放 {}，日志级别 {}",
        config.clock.frame_rate, config.clock.time_scale, config.debug.log_level
    );

    let report = demo::run(&config, config.demo.frames)?;
    let unfinished: Vec<_> = report
        .audio
        .iter()
        .filter(|a| a.playing && a.volume == 0.0)
        .map(|a| a.name.as_str())
        .collect();

    eprintln!(
        "回放 {} 帧（{:.2} 秒），{} 个补间结束",
        report.frames,
        report.elapsed,
        report.events.len()
    );
    if !unfinished.is_empty() {
        eprintln!("⚠️  以下音源仍在播放但音量为 0: {}", unfinished.join(", "));
    }
    if report.events.is_empty() {
        anyhow::bail!("演示帧数过少，没有任何补间结束");
    }

    eprintln!("{}", serde_json::to_string_pretty(&report.events)?);
    eprintln!("✅ 配置检查通过");
    Ok(())
}
