//! # 位置补间
//!
//! 2D / 单轴 / 三维移动。单轴与 2D 操作通过分量模式保留其余分量，
//! 未参与补间的分量在补间期间保持起始值。

use tracing::debug;
use tween_runtime::{CancelToken, TweenHandle, TweenResult, Vec2, Vec3, VectorTweenMode};

use super::{TweenOptions, Tweener};
use crate::targets::Transform;

/// 轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn mode(self) -> VectorTweenMode {
        match self {
            Axis::X => VectorTweenMode::X,
            Axis::Y => VectorTweenMode::Y,
            Axis::Z => VectorTweenMode::Z,
        }
    }

    fn get(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    fn set(self, v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => v.with_x(value),
            Axis::Y => v.with_y(value),
            Axis::Z => v.with_z(value),
        }
    }

    fn offset(self, v: Vec3, delta: f32) -> Vec3 {
        self.set(v, self.get(v) + delta)
    }
}

impl Tweener {
    fn move_with_mode(
        &mut self,
        transform: &Transform,
        end: Vec3,
        duration: f32,
        mode: VectorTweenMode,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        debug!(transform = %transform.name(), end = ?end, mode = ?mode, duration, "移动");
        self.position
            .tween(transform, options.into_params(end, duration, mode))
    }

    fn move_with_mode_async(
        &mut self,
        transform: &Transform,
        end: Vec3,
        duration: f32,
        mode: VectorTweenMode,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        debug!(transform = %transform.name(), end = ?end, mode = ?mode, duration, "移动（异步）");
        self.position
            .tween_async(transform, options.into_params(end, duration, mode), cancel)
    }

    /// 在 XY 平面内移动到 `target`，z 保持不变
    pub fn move_2d(
        &mut self,
        transform: &Transform,
        target: Vec2,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = target.extend(transform.position().z);
        self.move_with_mode(transform, end, duration, VectorTweenMode::Xy, options)
    }

    /// 在 XY 平面内移动，返回可等待的句柄
    pub fn move_2d_async(
        &mut self,
        transform: &Transform,
        target: Vec2,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = target.extend(transform.position().z);
        self.move_with_mode_async(transform, end, duration, VectorTweenMode::Xy, options, cancel)
    }

    /// 在 XY 平面内相对移动
    pub fn add_2d(
        &mut self,
        transform: &Transform,
        delta: Vec2,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = transform.position().add(delta.extend(0.0));
        self.move_with_mode(transform, end, duration, VectorTweenMode::Xy, options)
    }

    pub fn add_2d_async(
        &mut self,
        transform: &Transform,
        delta: Vec2,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = transform.position().add(delta.extend(0.0));
        self.move_with_mode_async(transform, end, duration, VectorTweenMode::Xy, options, cancel)
    }

    /// 三维移动到 `target`
    pub fn move_to(
        &mut self,
        transform: &Transform,
        target: Vec3,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        self.move_with_mode(transform, target, duration, VectorTweenMode::Xyz, options)
    }

    pub fn move_to_async(
        &mut self,
        transform: &Transform,
        target: Vec3,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        self.move_with_mode_async(transform, target, duration, VectorTweenMode::Xyz, options, cancel)
    }

    pub fn move_x(
        &mut self,
        transform: &Transform,
        x: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = Axis::X.set(transform.position(), x);
        self.move_with_mode(transform, end, duration, Axis::X.mode(), options)
    }

    pub fn move_y(
        &mut self,
        transform: &Transform,
        y: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = Axis::Y.set(transform.position(), y);
        self.move_with_mode(transform, end, duration, Axis::Y.mode(), options)
    }

    pub fn move_z(
        &mut self,
        transform: &Transform,
        z: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = Axis::Z.set(transform.position(), z);
        self.move_with_mode(transform, end, duration, Axis::Z.mode(), options)
    }

    pub fn add_x(
        &mut self,
        transform: &Transform,
        dx: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = Axis::X.offset(transform.position(), dx);
        self.move_with_mode(transform, end, duration, Axis::X.mode(), options)
    }

    pub fn add_y(
        &mut self,
        transform: &Transform,
        dy: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = Axis::Y.offset(transform.position(), dy);
        self.move_with_mode(transform, end, duration, Axis::Y.mode(), options)
    }

    pub fn add_z(
        &mut self,
        transform: &Transform,
        dz: f32,
        duration: f32,
        options: TweenOptions,
    ) -> TweenResult<bool> {
        let end = Axis::Z.offset(transform.position(), dz);
        self.move_with_mode(transform, end, duration, Axis::Z.mode(), options)
    }

    /// 单轴移动，返回可等待的句柄
    pub fn move_x_async(
        &mut self,
        transform: &Transform,
        x: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = Axis::X.set(transform.position(), x);
        self.move_with_mode_async(transform, end, duration, Axis::X.mode(), options, cancel)
    }

    pub fn move_y_async(
        &mut self,
        transform: &Transform,
        y: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = Axis::Y.set(transform.position(), y);
        self.move_with_mode_async(transform, end, duration, Axis::Y.mode(), options, cancel)
    }

    pub fn move_z_async(
        &mut self,
        transform: &Transform,
        z: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = Axis::Z.set(transform.position(), z);
        self.move_with_mode_async(transform, end, duration, Axis::Z.mode(), options, cancel)
    }

    pub fn add_x_async(
        &mut self,
        transform: &Transform,
        dx: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = Axis::X.offset(transform.position(), dx);
        self.move_with_mode_async(transform, end, duration, Axis::X.mode(), options, cancel)
    }

    pub fn add_y_async(
        &mut self,
        transform: &Transform,
        dy: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = Axis::Y.offset(transform.position(), dy);
        self.move_with_mode_async(transform, end, duration, Axis::Y.mode(), options, cancel)
    }

    pub fn add_z_async(
        &mut self,
        transform: &Transform,
        dz: f32,
        duration: f32,
        options: TweenOptions,
        cancel: Option<CancelToken>,
    ) -> TweenResult<TweenHandle> {
        let end = Axis::Z.offset(transform.position(), dz);
        self.move_with_mode_async(transform, end, duration, Axis::Z.mode(), options, cancel)
    }

    /// 停止移动，位置停在当前值
    pub fn move_stop(&mut self, transform: &Transform) -> bool {
        self.position.cancel_tween(transform.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tween_runtime::{FrameDelta, TweenOutcome};

    fn run(tweener: &mut Tweener, frames: usize) {
        for _ in 0..frames {
            tweener.update(FrameDelta::fixed(0.25));
        }
    }

    #[test]
    fn test_move_2d_keeps_z() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("sprite", Vec3::new(0.0, 0.0, 5.0));

        tweener
            .move_2d(&transform, Vec2::new(4.0, -2.0), 1.0, TweenOptions::default())
            .unwrap();
        run(&mut tweener, 2);
        let mid = transform.position();
        assert_eq!((mid.x, mid.y, mid.z), (2.0, -1.0, 5.0));

        run(&mut tweener, 2);
        assert_eq!(transform.position(), Vec3::new(4.0, -2.0, 5.0));
    }

    #[test]
    fn test_add_x_only_moves_x() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("sprite", Vec3::new(1.0, 2.0, 3.0));

        tweener
            .add_x(&transform, 2.0, 0.5, TweenOptions::default())
            .unwrap();
        run(&mut tweener, 2);
        assert_eq!(transform.position(), Vec3::new(3.0, 2.0, 3.0));
    }

    #[test]
    fn test_add_2d() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("sprite", Vec3::new(1.0, 1.0, 1.0));

        tweener
            .add_2d(&transform, Vec2::new(1.0, 2.0), 0.25, TweenOptions::default())
            .unwrap();
        run(&mut tweener, 1);
        assert_eq!(transform.position(), Vec3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn test_move_to_and_stop() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("camera", Vec3::zero());

        tweener
            .move_to(&transform, Vec3::new(4.0, 4.0, 4.0), 1.0, TweenOptions::default())
            .unwrap();
        run(&mut tweener, 1);
        assert!(tweener.move_stop(&transform));
        run(&mut tweener, 3);

        assert_eq!(transform.position(), Vec3::new(1.0, 1.0, 1.0));
        assert!(!tweener.is_tweening(transform.id()));
    }

    #[test]
    fn test_move_to_current_is_fast_path() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("sprite", Vec3::new(1.0, 2.0, 3.0));

        let started = tweener
            .move_y(&transform, 2.0, 1.0, TweenOptions::default())
            .unwrap();
        assert!(!started);
        assert_eq!(tweener.active_count(), 0);
    }

    #[test]
    fn test_add_z_async_external_cancel() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("sprite", Vec3::new(1.0, 2.0, 0.0));
        let cancel = CancelToken::new();

        let handle = tweener
            .add_z_async(&transform, 4.0, 1.0, TweenOptions::default(), Some(cancel.clone()))
            .unwrap();
        run(&mut tweener, 2);
        cancel.cancel();
        run(&mut tweener, 2);

        assert_eq!(pollster::block_on(handle), TweenOutcome::Cancelled);
        assert_eq!(transform.position(), Vec3::new(1.0, 2.0, 2.0));
        assert!(!tweener.is_tweening(transform.id()));
    }

    #[test]
    fn test_move_to_async_completes() {
        let mut tweener = Tweener::new();
        let transform = Transform::new("camera", Vec3::zero());

        let handle = tweener
            .move_to_async(&transform, Vec3::new(2.0, 2.0, 2.0), 0.5, TweenOptions::default(), None)
            .unwrap();
        run(&mut tweener, 2);

        assert_eq!(pollster::block_on(handle), TweenOutcome::Completed);
        assert_eq!(transform.position(), Vec3::new(2.0, 2.0, 2.0));
    }
}
