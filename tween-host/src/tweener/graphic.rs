//! # 颜色补间

use tracing::debug;
use tween_runtime::{CancelToken, Color, ColorTweenMode, TweenHandle, TweenResult};

use super::{TweenOptions, Tweener};
use crate::targets::Graphic;

impl Tweener {
    fn color_with_mode(
        &mut self,
        graphic: &Graphic,
        end: Color,
        duration: f32,
        mode: ColorTweenMode,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        debug!(graphic = %graphic.name(), end = ?end, mode = ?mode, duration, "颜色渐变");
        self.color
            .tween(graphic, options.into_params(end, duration, mode))
    }

    fn color_with_mode_async(
        &mut self,
        graphic: &Graphic,
        end: Color,
        duration: f32,
        mode: ColorTweenMode,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        debug!(graphic = %graphic.name(), end = ?end, mode = ?mode, duration, "颜色渐变（异步）");
        self.color
            .tween_async(graphic, options.into_params(end, duration, mode), cancel)
    }

    /// RGBA 全部分量渐变
    pub fn color_fade(
        &mut self,
        graphic: &Graphic,
        end: Color,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        self.color_with_mode(graphic, end, duration, ColorTweenMode::All, options)
    }

    /// RGBA 渐变，返回可等待的句柄
    pub fn color_fade_async(
        &mut self,
        graphic: &Graphic,
        end: Color,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        self.color_with_mode_async(graphic, end, duration, ColorTweenMode::All, options, cancel)
    }

    /// 仅 RGB 渐变，alpha 保持不变
    pub fn rgb_fade(
        &mut self,
        graphic: &Graphic,
        end: Color,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = end.with_alpha(graphic.color().a);
        self.color_with_mode(graphic, end, duration, ColorTweenMode::Rgb, options)
    }

    pub fn rgb_fade_async(
        &mut self,
        graphic: &Graphic,
        end: Color,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = end.with_alpha(graphic.color().a);
        self.color_with_mode_async(graphic, end, duration, ColorTweenMode::Rgb, options, cancel)
    }

    /// 仅 alpha 渐变，RGB 保持不变
    pub fn alpha_fade(
        &mut self,
        graphic: &Graphic,
        alpha: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = graphic.color().with_alpha(alpha);
        self.color_with_mode(graphic, end, duration, ColorTweenMode::Alpha, options)
    }

    pub fn alpha_fade_async(
        &mut self,
        graphic: &Graphic,
        alpha: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = graphic.color().with_alpha(alpha);
        self.color_with_mode_async(graphic, end, duration, ColorTweenMode::Alpha, options, cancel)
    }

    /// 停止颜色渐变
    pub fn color_stop(&mut self, graphic: &Graphic) -> bool {
        self.color.cancel_tween(graphic.id())
    }
}
