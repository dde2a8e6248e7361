//! # Tween Runtime
//!
//! 与引擎无关的补间执行核心。
//!
//! ## 架构概述
//!
//! `tween-runtime` 不依赖任何渲染或音频后端。宿主每帧调用一次 `tick`，
//! 运行器按经过的时间推进补间，并通过观察者把插值结果写回目标：
//!
//! ```text
//! Host                            Runtime
//!   │                                │
//!   │── begin_tween(target, ..) ───►│ TweenRegistry
//!   │                                │   └─ TweenRunner（每目标一个）
//!   │── tick(FrameDelta) ──────────►│
//!   │◄── observer(value) ───────────│
//!   │◄── Vec<TweenEvent> ───────────│
//!   │                                │
//! ```
//!
//! ## 核心类型
//!
//! - [`TweenDescriptor`]：起止值、时长、模式与观察者
//! - [`TweenRunner`]：单目标的协作式调度器
//! - [`TweenRegistry`]：按 [`TargetId`] 管理运行器
//! - [`TweenHandle`]：可等待的运行结果
//! - [`CancelToken`]：目标生命周期与外部取消信号
//!
//! ## 线程模型
//!
//! 全部类型基于 `Rc`/`Cell`，只能在更新线程上使用。
//!
//! ## 模块结构
//!
//! - [`value`]：可补间值与分量模式
//! - [`tween`]：补间描述符
//! - [`runner`]：运行器
//! - [`registry`]：注册表
//! - [`handle`]：句柄与结果
//! - [`cancel`]：取消令牌
//! - [`target`]：目标抽象
//! - [`frame`]：帧时间输入
//! - [`error`]：错误类型定义

pub mod cancel;
pub mod error;
pub mod frame;
pub mod handle;
pub mod registry;
pub mod runner;
pub mod target;
pub mod tween;
pub mod value;

// 重导出核心类型
pub use cancel::CancelToken;
pub use error::{TweenError, TweenResult};
pub use frame::FrameDelta;
pub use handle::{TweenHandle, TweenOutcome};
pub use registry::{PreparedTween, TweenEvent, TweenParams, TweenRegistry};
pub use runner::{FinishHook, RunnerTick, TweenRunner};
pub use target::{TargetId, TweenTarget};
pub use tween::{Observer, TweenDescriptor, TweenDriver};
pub use value::{
    Color, ColorTweenMode, Tweenable, Vec2, Vec3, VectorTweenMode, approximately, lerp,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _tween = TweenDescriptor::new(0.0_f32, 1.0, 0.5).on_changed(|_| {});

        let _runner = TweenRunner::new(TargetId::fresh(), Some(CancelToken::new()));

        let _registry = TweenRegistry::<Vec3>::new("position");

        let _params = TweenParams::new(Color::CLEAR, 1.0).mode(ColorTweenMode::Alpha);

        let _frame = FrameDelta::new(0.016, 1.0);
    }
}
