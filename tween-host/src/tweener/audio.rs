//! # 音量补间
//!
//! 音源的淡入、淡出与交叉淡入淡出。

use tracing::debug;
use tween_runtime::{CancelToken, TargetId, TweenHandle, TweenResult};

use super::{TweenOptions, Tweener};
use crate::targets::AudioSource;

impl Tweener {
    /// 音量渐变到 `end`
    ///
    /// 返回是否开始了补间；当前音量已等于 `end` 时直接写入并返回 `false`。
    pub fn fade(
        &mut self,
        source: &AudioSource,
        end: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        debug!(source = %source.name(), end, duration, "音量渐变");
        self.volume
            .tween(source, options.into_params(end, duration, ()))
    }

    /// 音量渐变，返回可等待的句柄
    ///
    /// 音源销毁时句柄以 `OwnerDestroyed` 结束，无需额外传入取消令牌。
    pub fn fade_async(
        &mut self,
        source: &AudioSource,
        end: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        debug!(source = %source.name(), end, duration, "音量渐变（异步）");
        self.volume
            .tween_async(source, options.into_params(end, duration, ()), cancel)
    }

    /// 停止音量渐变，音量停在当前值
    pub fn fade_stop(&mut self, source: &AudioSource) -> bool {
        self.volume.cancel_tween(source.id())
    }

    /// 淡出到 0 后停止播放
    ///
    /// 音量已为 0 时立即停止播放，此时不调用完成回调。
    pub fn fade_out_and_stop(
        &mut self,
        source: &AudioSource,
        duration: f32,
        mut options: TweenOptions,
    ) -> TweenResult<bool> {
        let stopper = source.clone();
        let mut user_hook = options.on_complete.take();
        let options = TweenOptions {
            on_complete: Some(Box::new(move |id: TargetId| {
                stopper.stop();
                if let Some(hook) = user_hook.as_mut() {
                    hook(id);
                }
            })),
            ..options
        };

        let started = self.fade(source, 0.0, duration, options)?;
        if !started {
            source.stop();
        }
        Ok(started)
    }

    /// 交叉淡入淡出：`from` 淡出并停止，`to` 从静音开始淡入到 `volume`
    ///
    /// `options` 作用于淡入的一侧。
    pub fn crossfade(
        &mut self,
        from: &AudioSource,
        to: &AudioSource,
        volume: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        debug!(from = %from.name(), to = %to.name(), duration, "交叉淡入淡出");

        let fade_out = TweenOptions {
            ignore_time_scale: options.ignore_time_scale,
            on_complete: None,
        };
        self.fade_out_and_stop(from, duration, fade_out)?;

        if !to.is_playing() {
            self.fade_stop(to);
            to.set_volume(0.0);
            to.play();
        }
        self.fade(to, volume, duration, options)
    }
}
