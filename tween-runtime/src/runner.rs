//! # Runner 模块
//!
//! 单目标的协作式补间调度器。
//!
//! ## 状态转换
//!
//! ```text
//! Idle ──start──► Running ──tick…──► Completed      ─┐
//!                    │                                │
//!                    ├──stop──────► Stopped          ├─► Idle（运行器复用）
//!                    ├──start─────► Superseded       │
//!                    ├──外部取消──► Cancelled        │
//!                    └──目标销毁──► OwnerDestroyed  ─┘
//! ```
//!
//! 每帧 tick 一次。两次 tick 之间就是让出点，每次恢复时先检查取消。

use futures::channel::oneshot;
use std::mem;
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::frame::FrameDelta;
use crate::handle::{TweenHandle, TweenOutcome};
use crate::target::TargetId;
use crate::tween::TweenDriver;

/// 完成回调，参数为目标 ID
pub type FinishHook = Box<dyn FnMut(TargetId)>;

/// 单次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerTick {
    /// 没有运行中的补间
    Idle,
    /// 仍在运行
    Running,
    /// 本次 tick 内结束
    Finished(TweenOutcome),
}

/// 一次运行的全部状态，结束后整体丢弃
struct ActiveRun {
    driver: Box<dyn TweenDriver>,
    elapsed: f32,
    /// 最近一次送达观察者的进度
    last_progress: Option<f32>,
    /// 本次运行的取消令牌（一次性）
    token: CancelToken,
    /// 外部取消令牌
    external: Option<CancelToken>,
    hooks: Vec<FinishHook>,
    completion: Option<oneshot::Sender<TweenOutcome>>,
}

enum RunnerState {
    Idle,
    Running(ActiveRun),
}

/// 补间运行器
///
/// 每个目标一个，跨多次补间复用。同一时刻最多驱动一个补间：
/// 开始新补间会先中止旧补间（结果为 `Superseded`，不触发完成回调）。
pub struct TweenRunner {
    target: TargetId,
    /// 目标生命周期令牌
    owner: Option<CancelToken>,
    state: RunnerState,
    /// 等待下一次 start 领取的完成回调
    pending_hooks: Vec<FinishHook>,
}

impl TweenRunner {
    /// 创建运行器
    ///
    /// `owner` 在目标销毁时被取消，运行器据此无条件中止当前运行。
    pub fn new(target: TargetId, owner: Option<CancelToken>) -> Self {
        Self {
            target,
            owner,
            state: RunnerState::Idle,
            pending_hooks: Vec::new(),
        }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunnerState::Running(_))
    }

    /// 当前运行已经过的时间
    pub fn elapsed(&self) -> Option<f32> {
        match &self.state {
            RunnerState::Running(run) => Some(run.elapsed),
            RunnerState::Idle => None,
        }
    }

    /// 当前运行的取消令牌
    ///
    /// 取消它等价于让当前运行在下一次 tick 时以 `Cancelled` 结束。
    pub fn run_token(&self) -> Option<CancelToken> {
        match &self.state {
            RunnerState::Running(run) => Some(run.token.clone()),
            RunnerState::Idle => None,
        }
    }

    /// 为下一次运行注册完成回调
    ///
    /// 回调在该次运行自然完成或目标销毁时调用一次。
    /// `stop()` 会清空尚未领取的回调。
    pub fn on_finished(&mut self, hook: impl FnMut(TargetId) + 'static) {
        self.pending_hooks.push(Box::new(hook));
    }

    pub(crate) fn on_finished_boxed(&mut self, hook: FinishHook) {
        self.pending_hooks.push(hook);
    }

    /// 开始补间（不等待结果）
    ///
    /// 描述符无效（没有观察者）时什么都不做并返回 `false`，当前运行不受影响。
    pub fn start(&mut self, driver: impl TweenDriver + 'static) -> bool {
        self.begin(Box::new(driver), None, None)
    }

    /// 开始补间并返回可等待的句柄
    ///
    /// `external` 与运行器自身的停止信号、目标生命周期信号取"或"。
    /// 描述符无效时返回已结束（`Stopped`）的句柄。
    pub fn start_async(
        &mut self,
        driver: impl TweenDriver + 'static,
        external: Option<CancelToken>,
    ) -> TweenHandle {
        self.start_boxed_async(Box::new(driver), external)
    }

    pub(crate) fn start_boxed(&mut self, driver: Box<dyn TweenDriver>) -> bool {
        self.begin(driver, None, None)
    }

    pub(crate) fn start_boxed_async(
        &mut self,
        driver: Box<dyn TweenDriver>,
        external: Option<CancelToken>,
    ) -> TweenHandle {
        let (sender, receiver) = oneshot::channel();
        if self.begin(driver, external, Some(sender)) {
            TweenHandle::waiting(receiver)
        } else {
            TweenHandle::resolved(TweenOutcome::Stopped)
        }
    }

    fn begin(
        &mut self,
        driver: Box<dyn TweenDriver>,
        external: Option<CancelToken>,
        completion: Option<oneshot::Sender<TweenOutcome>>,
    ) -> bool {
        if !driver.is_valid() {
            debug!(target_id = %self.target, "补间没有观察者，忽略");
            return false;
        }

        if self.is_running() {
            debug!(target_id = %self.target, "新补间替换运行中的补间");
            self.abort(TweenOutcome::Superseded);
        }

        let token = CancelToken::linked(self.owner.iter().chain(external.iter()).cloned());
        debug!(
            target_id = %self.target,
            duration = driver.duration(),
            ignore_time_scale = driver.ignores_time_scale(),
            "开始补间"
        );

        self.state = RunnerState::Running(ActiveRun {
            driver,
            elapsed: 0.0,
            last_progress: None,
            token,
            external,
            hooks: mem::take(&mut self.pending_hooks),
            completion,
        });
        true
    }

    /// 停止当前补间
    ///
    /// 不触发完成回调；空闲时调用是 no-op。
    pub fn stop(&mut self) {
        self.pending_hooks.clear();
        if self.is_running() {
            debug!(target_id = %self.target, "停止补间");
            self.abort(TweenOutcome::Stopped);
        }
    }

    /// 以 `Superseded` 中止当前运行，并丢弃尚未领取的完成回调
    pub(crate) fn supersede(&mut self) {
        self.pending_hooks.clear();
        if self.is_running() {
            debug!(target_id = %self.target, "补间被替换");
            self.abort(TweenOutcome::Superseded);
        }
    }

    /// 推进一帧
    ///
    /// 观察者 panic 会穿透本函数，该次运行随之作废。
    pub fn tick(&mut self, frame: FrameDelta) -> RunnerTick {
        let RunnerState::Running(mut run) = mem::replace(&mut self.state, RunnerState::Idle) else {
            return RunnerTick::Idle;
        };

        if run.token.is_cancelled() {
            let outcome = if self.owner.as_ref().is_some_and(CancelToken::is_cancelled) {
                TweenOutcome::OwnerDestroyed
            } else {
                TweenOutcome::Cancelled
            };
            return self.finish(run, outcome);
        }

        let duration = run.driver.duration();
        if run.elapsed < duration {
            run.elapsed += frame.delta(run.driver.ignores_time_scale());
            let progress = (run.elapsed / duration).clamp(0.0, 1.0);
            trace!(target_id = %self.target, elapsed = run.elapsed, progress, "补间推进");
            run.driver.tween_value(progress);
            run.last_progress = Some(progress);
        }

        if run.elapsed >= duration || duration.is_nan() {
            // 保证最终值精确送达；最后一帧已送达 1.0 时不再重复
            if run.last_progress != Some(1.0) {
                run.driver.tween_value(1.0);
            }
            return self.finish(run, TweenOutcome::Completed);
        }

        self.state = RunnerState::Running(run);
        RunnerTick::Running
    }

    /// 中止当前运行（不触发完成回调）
    fn abort(&mut self, outcome: TweenOutcome) {
        if let RunnerState::Running(run) = mem::replace(&mut self.state, RunnerState::Idle) {
            self.finish(run, outcome);
        }
    }

    fn finish(&mut self, mut run: ActiveRun, outcome: TweenOutcome) -> RunnerTick {
        // 令牌一次性使用，随运行一起作废
        run.token.cancel();

        if outcome.fires_finish_hooks() {
            for hook in &mut run.hooks {
                hook(self.target);
            }
        }
        if let Some(sender) = run.completion.take() {
            let _ = sender.send(outcome);
        }

        debug!(
            target_id = %self.target,
            outcome = ?outcome,
            external = run.external.is_some(),
            "补间结束"
        );
        RunnerTick::Finished(outcome)
    }
}

impl std::fmt::Debug for TweenRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenRunner")
            .field("target", &self.target)
            .field("running", &self.is_running())
            .field("elapsed", &self.elapsed())
            .field("pending_hooks", &self.pending_hooks.len())
            .finish()
    }
}
