//! # Registry 模块
//!
//! 按目标管理运行器：懒创建、复用、结束后回收。
//!
//! 同一目标在任意时刻最多只有一个运行中的补间。对已有补间的目标
//! 再次发起补间，旧补间被替换（`Superseded`），其完成回调不会触发。

use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{TweenError, TweenResult};
use crate::frame::FrameDelta;
use crate::handle::{TweenHandle, TweenOutcome};
use crate::runner::{FinishHook, RunnerTick, TweenRunner};
use crate::target::{TargetId, TweenTarget};
use crate::tween::TweenDescriptor;
use crate::value::Tweenable;

/// 补间请求参数
pub struct TweenParams<T: Tweenable> {
    pub end: T,
    pub duration: f32,
    pub mode: T::Mode,
    pub ignore_time_scale: bool,
    pub on_complete: Option<FinishHook>,
}

impl<T: Tweenable> TweenParams<T> {
    pub fn new(end: T, duration: f32) -> Self {
        Self {
            end,
            duration,
            mode: T::Mode::default(),
            ignore_time_scale: false,
            on_complete: None,
        }
    }

    pub fn mode(mut self, mode: T::Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn ignore_time_scale(mut self, ignore: bool) -> Self {
        self.ignore_time_scale = ignore;
        self
    }

    /// 完成回调，参数为目标 ID
    pub fn on_complete(mut self, hook: impl FnMut(TargetId) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }
}

impl<T: Tweenable> std::fmt::Debug for TweenParams<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenParams")
            .field("end", &self.end)
            .field("duration", &self.duration)
            .field("mode", &self.mode)
            .field("ignore_time_scale", &self.ignore_time_scale)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// 已准备好、尚未开始的补间
///
/// 调用方可以在开始前继续追加观察者。
#[must_use = "准备好的补间需要交给 start / start_async"]
pub struct PreparedTween<T: Tweenable> {
    target: TargetId,
    owner: Option<CancelToken>,
    descriptor: TweenDescriptor<T>,
    on_complete: Option<FinishHook>,
}

impl<T: Tweenable> PreparedTween<T> {
    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn descriptor(&self) -> &TweenDescriptor<T> {
        &self.descriptor
    }

    /// 追加观察者（在写回目标的观察者之后调用）
    pub fn on_changed(mut self, observer: impl FnMut(T) + 'static) -> Self {
        self.descriptor.add_observer(observer);
        self
    }
}

impl<T: Tweenable> std::fmt::Debug for PreparedTween<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedTween")
            .field("target", &self.target)
            .field("descriptor", &self.descriptor)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// `prepare` 的三种结果
enum Begin<T: Tweenable> {
    Prepared(PreparedTween<T>),
    /// 已在目标值，直接写入
    AtEnd,
    /// 目标已销毁，什么都不做
    OwnerGone,
}

/// 补间结束事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TweenEvent {
    pub target: TargetId,
    pub outcome: TweenOutcome,
}

/// 补间注册表
///
/// 一个注册表负责一种属性（如音量、位置、颜色），键为 [`TargetId`]，
/// 按键序 tick，保证每帧的调用顺序确定。
pub struct TweenRegistry<T: Tweenable> {
    name: &'static str,
    runners: BTreeMap<TargetId, TweenRunner>,
    _value: PhantomData<fn(T)>,
}

impl<T: Tweenable> TweenRegistry<T> {
    /// 创建注册表，`name` 仅用于日志
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            runners: BTreeMap::new(),
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 准备对目标的补间
    ///
    /// 会立即替换该目标上运行中的补间。当前值已与目标值近似相等时，
    /// 直接写入目标值并返回 `Ok(None)`，不创建任何运行。
    /// 目标已销毁时同样返回 `Ok(None)`，但不写入、不创建条目、不调用回调。
    pub fn begin_tween<A>(
        &mut self,
        target: &A,
        params: TweenParams<T>,
    ) -> TweenResult<Option<PreparedTween<T>>>
    where
        A: TweenTarget<T> + Clone + 'static,
    {
        Ok(match self.prepare(target, params)? {
            Begin::Prepared(prepared) => Some(prepared),
            Begin::AtEnd | Begin::OwnerGone => None,
        })
    }

    fn prepare<A>(&mut self, target: &A, params: TweenParams<T>) -> TweenResult<Begin<T>>
    where
        A: TweenTarget<T> + Clone + 'static,
    {
        let id = target.id();
        if !params.duration.is_finite() {
            return Err(TweenError::NonFiniteDuration {
                duration: params.duration,
            });
        }
        if !params.end.is_finite() {
            return Err(TweenError::NonFiniteValue { target: id });
        }

        let owner = target.lifetime();
        if owner.as_ref().is_some_and(CancelToken::is_cancelled) {
            debug!(registry = self.name, target_id = %id, "目标已销毁，忽略补间");
            return Ok(Begin::OwnerGone);
        }

        if let Some(runner) = self.runners.get_mut(&id) {
            runner.supersede();
        }

        let start = target.current();
        if T::approx_eq(start, params.end) {
            target.apply(params.end);
            if self.runners.remove(&id).is_some() {
                debug!(registry = self.name, target_id = %id, "已在目标值，回收运行器");
            }
            return Ok(Begin::AtEnd);
        }

        let writer = target.clone();
        let descriptor = TweenDescriptor::new(start, params.end, params.duration)
            .with_mode(params.mode)
            .with_ignore_time_scale(params.ignore_time_scale)
            .on_changed(move |value| writer.apply(value));

        self.runners
            .entry(id)
            .or_insert_with(|| TweenRunner::new(id, owner.clone()));

        Ok(Begin::Prepared(PreparedTween {
            target: id,
            owner,
            descriptor,
            on_complete: params.on_complete,
        }))
    }

    /// 开始已准备的补间
    pub fn start(&mut self, prepared: PreparedTween<T>) -> bool {
        let (runner, descriptor) = self.attach(prepared);
        runner.start_boxed(descriptor)
    }

    /// 开始已准备的补间并返回句柄
    pub fn start_async(
        &mut self,
        prepared: PreparedTween<T>,
        external: Option<CancelToken>,
    ) -> TweenHandle {
        let (runner, descriptor) = self.attach(prepared);
        runner.start_boxed_async(descriptor, external)
    }

    fn attach(
        &mut self,
        prepared: PreparedTween<T>,
    ) -> (&mut TweenRunner, Box<TweenDescriptor<T>>) {
        let PreparedTween {
            target,
            owner,
            descriptor,
            on_complete,
        } = prepared;

        // 准备与开始之间条目可能已被回收
        let runner = self
            .runners
            .entry(target)
            .or_insert_with(|| TweenRunner::new(target, owner));
        if let Some(hook) = on_complete {
            runner.on_finished_boxed(hook);
        }
        (runner, Box::new(descriptor))
    }

    /// 准备并立即开始
    ///
    /// 返回是否真正开始了一次运行（快速路径与已销毁目标返回 `false`）。
    pub fn tween<A>(&mut self, target: &A, params: TweenParams<T>) -> TweenResult<bool>
    where
        A: TweenTarget<T> + Clone + 'static,
    {
        Ok(match self.prepare(target, params)? {
            Begin::Prepared(prepared) => self.start(prepared),
            Begin::AtEnd | Begin::OwnerGone => false,
        })
    }

    /// 准备并立即开始，返回句柄
    ///
    /// 快速路径返回已完成的句柄，已销毁的目标返回 `OwnerDestroyed` 句柄。
    pub fn tween_async<A>(
        &mut self,
        target: &A,
        params: TweenParams<T>,
        external: Option<CancelToken>,
    ) -> TweenResult<TweenHandle>
    where
        A: TweenTarget<T> + Clone + 'static,
    {
        Ok(match self.prepare(target, params)? {
            Begin::Prepared(prepared) => self.start_async(prepared, external),
            Begin::AtEnd => TweenHandle::resolved(TweenOutcome::Completed),
            Begin::OwnerGone => TweenHandle::resolved(TweenOutcome::OwnerDestroyed),
        })
    }

    /// 停止目标上的补间并立即回收条目
    ///
    /// 不触发完成回调。返回是否存在条目。
    pub fn cancel_tween(&mut self, id: TargetId) -> bool {
        match self.runners.remove(&id) {
            Some(mut runner) => {
                runner.stop();
                debug!(registry = self.name, target_id = %id, "取消补间");
                true
            }
            None => false,
        }
    }

    /// 推进所有运行器一帧
    ///
    /// 本帧结束的运行（无论结果）会被回收，并以事件形式返回。
    pub fn tick(&mut self, frame: FrameDelta) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        let mut evicted = Vec::new();

        for (&id, runner) in self.runners.iter_mut() {
            match runner.tick(frame) {
                RunnerTick::Running => {}
                RunnerTick::Finished(outcome) => {
                    events.push(TweenEvent { target: id, outcome });
                    evicted.push(id);
                }
                RunnerTick::Idle => evicted.push(id),
            }
        }

        for id in evicted {
            self.runners.remove(&id);
            debug!(registry = self.name, target_id = %id, "回收运行器");
        }
        events
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.runners.contains_key(&id)
    }

    pub fn is_running(&self, id: TargetId) -> bool {
        self.runners.get(&id).is_some_and(TweenRunner::is_running)
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// 停止并回收全部条目
    pub fn clear(&mut self) {
        for runner in self.runners.values_mut() {
            runner.stop();
        }
        self.runners.clear();
    }
}

impl<T: Tweenable> std::fmt::Debug for TweenRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenRegistry")
            .field("name", &self.name)
            .field("targets", &self.runners.keys().collect::<Vec<_>>())
            .finish()
    }
}
