//! # Tween 模块
//!
//! 补间描述符：起始值、目标值、时长、时间缩放开关、分量模式，
//! 以及按注册顺序调用的观察者列表。
//!
//! 描述符自身不推进时间，只负责把进度映射为值并广播给观察者。

use std::fmt;

use crate::value::Tweenable;

/// 值观察者
pub type Observer<T> = Box<dyn FnMut(T)>;

/// 运行器可驱动的补间
///
/// 对值类型擦除，使同一个 [`TweenRunner`](crate::TweenRunner) 可以驱动任意 `T`。
pub trait TweenDriver {
    /// 时长（秒）
    fn duration(&self) -> f32;

    /// 是否忽略全局时间缩放
    fn ignores_time_scale(&self) -> bool;

    /// 按进度计算值并通知观察者
    fn tween_value(&mut self, progress: f32);

    /// 是否至少挂载了一个观察者
    fn is_valid(&self) -> bool;
}

/// 补间描述符
pub struct TweenDescriptor<T: Tweenable> {
    start: T,
    end: T,
    duration: f32,
    ignore_time_scale: bool,
    mode: T::Mode,
    observers: Vec<Observer<T>>,
}

impl<T: Tweenable> TweenDescriptor<T> {
    /// 创建描述符（默认模式、受时间缩放影响、无观察者）
    pub fn new(start: T, end: T, duration: f32) -> Self {
        Self {
            start,
            end,
            duration,
            ignore_time_scale: false,
            mode: T::Mode::default(),
            observers: Vec::new(),
        }
    }

    /// 设置分量模式
    pub fn with_mode(mut self, mode: T::Mode) -> Self {
        self.mode = mode;
        self
    }

    /// 设置是否忽略全局时间缩放
    pub fn with_ignore_time_scale(mut self, ignore: bool) -> Self {
        self.ignore_time_scale = ignore;
        self
    }

    /// 追加观察者（构建器形式）
    pub fn on_changed(mut self, observer: impl FnMut(T) + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// 追加观察者
    pub fn add_observer(&mut self, observer: impl FnMut(T) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn start_value(&self) -> T {
        self.start
    }

    pub fn end_value(&self) -> T {
        self.end
    }

    pub fn mode(&self) -> T::Mode {
        self.mode
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// 计算给定进度下的值
    ///
    /// `progress` 由调用方裁剪到 [0, 1]，这里不做裁剪。
    pub fn evaluate(&self, progress: f32) -> T {
        let interpolated = T::lerp(self.start, self.end, progress);
        T::apply_mode(self.mode, interpolated, self.start)
    }
}

impl<T: Tweenable> TweenDriver for TweenDescriptor<T> {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn ignores_time_scale(&self) -> bool {
        self.ignore_time_scale
    }

    fn tween_value(&mut self, progress: f32) {
        if self.observers.is_empty() {
            return;
        }
        let value = self.evaluate(progress);
        for observer in &mut self.observers {
            observer(value);
        }
    }

    fn is_valid(&self) -> bool {
        !self.observers.is_empty()
    }
}

impl<T: Tweenable> fmt::Debug for TweenDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenDescriptor")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("duration", &self.duration)
            .field("ignore_time_scale", &self.ignore_time_scale)
            .field("mode", &self.mode)
            .field("observers", &self.observers.len())
            .finish()
    }
}
