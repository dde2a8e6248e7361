//! # Tweener 模块
//!
//! 宿主侧的补间入口：每类属性一个注册表，外加淡入淡出、移动、
//! 颜色渐变等便捷操作。
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut tweener = Tweener::new();
//! let bgm = AudioSource::new("bgm", 0.0);
//! bgm.play();
//! tweener.fade(&bgm, 1.0, 2.0, TweenOptions::default())?;
//!
//! loop {
//!     let frame = clock.next_frame();
//!     for event in tweener.update(frame) {
//!         // 根据事件衔接下一段补间
//!     }
//! }
//! ```
//!
//! 对同一目标的同类属性再次发起补间，会替换正在运行的补间。

mod audio;
mod graphic;
mod transform;

use tracing::trace;
use tween_runtime::{
    Color, FinishHook, FrameDelta, TargetId, TweenEvent, TweenParams, TweenRegistry, Tweenable,
    Vec3,
};

/// 便捷操作的可选参数
#[derive(Default)]
pub struct TweenOptions {
    /// 是否忽略全局时间缩放
    pub ignore_time_scale: bool,
    /// 完成回调（自然完成或目标销毁时调用一次）
    pub on_complete: Option<FinishHook>,
}

impl TweenOptions {
    pub fn ignore_time_scale(mut self) -> Self {
        self.ignore_time_scale = true;
        self
    }

    pub fn on_complete(mut self, hook: impl FnMut(TargetId) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    fn into_params<T: Tweenable>(self, end: T, duration: f32, mode: T::Mode) -> TweenParams<T> {
        TweenParams {
            end,
            duration,
            mode,
            ignore_time_scale: self.ignore_time_scale,
            on_complete: self.on_complete,
        }
    }
}

impl std::fmt::Debug for TweenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenOptions")
            .field("ignore_time_scale", &self.ignore_time_scale)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// 补间管理器
#[derive(Debug)]
pub struct Tweener {
    volume: TweenRegistry<f32>,
    position: TweenRegistry<Vec3>,
    color: TweenRegistry<Color>,
}

impl Default for Tweener {
    fn default() -> Self {
        Self::new()
    }
}

impl Tweener {
    pub fn new() -> Self {
        Self {
            volume: TweenRegistry::new("volume"),
            position: TweenRegistry::new("position"),
            color: TweenRegistry::new("color"),
        }
    }

    /// 推进所有补间一帧
    ///
    /// 按音量、位置、颜色的固定顺序 tick，返回本帧结束的补间。
    pub fn update(&mut self, frame: FrameDelta) -> Vec<TweenEvent> {
        let mut events = self.volume.tick(frame);
        events.extend(self.position.tick(frame));
        events.extend(self.color.tick(frame));
        if !events.is_empty() {
            trace!(count = events.len(), "本帧补间结束");
        }
        events
    }

    /// 目标上是否有运行中的补间（任意属性）
    pub fn is_tweening(&self, id: TargetId) -> bool {
        self.volume.is_running(id) || self.position.is_running(id) || self.color.is_running(id)
    }

    /// 注册表条目总数
    pub fn active_count(&self) -> usize {
        self.volume.len() + self.position.len() + self.color.len()
    }

    /// 停止全部补间（不触发完成回调）
    pub fn clear(&mut self) {
        self.volume.clear();
        self.position.clear();
        self.color.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::{AudioSource, Graphic};

    #[test]
    fn test_clear_stops_all_families() {
        let mut tweener = Tweener::new();
        let bgm = AudioSource::new("bgm", 0.0);
        let panel = Graphic::new("panel", Color::WHITE);
        tweener.fade(&bgm, 1.0, 1.0, TweenOptions::default()).unwrap();
        tweener
            .alpha_fade(&panel, 0.0, 1.0, TweenOptions::default())
            .unwrap();
        assert!(tweener.is_tweening(bgm.id()));
        assert_eq!(tweener.active_count(), 2);

        tweener.clear();
        assert_eq!(tweener.active_count(), 0);
        assert!(tweener.update(FrameDelta::fixed(0.5)).is_empty());
        assert_eq!(bgm.volume(), 0.0);
    }
}
