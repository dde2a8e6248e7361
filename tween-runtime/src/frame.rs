//! # Frame 模块
//!
//! 帧时间输入。宿主每帧调用一次 tick，并给出距上一帧经过的时间。

/// 单帧时间增量（秒）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameDelta {
    /// 受全局时间缩放影响的增量
    pub scaled: f32,
    /// 真实经过的时间
    pub unscaled: f32,
}

impl FrameDelta {
    /// 由真实增量和时间缩放构造
    pub fn new(unscaled: f32, time_scale: f32) -> Self {
        Self {
            scaled: unscaled * time_scale,
            unscaled,
        }
    }

    /// 缩放与真实增量相同（时间缩放为 1）
    pub fn fixed(dt: f32) -> Self {
        Self::new(dt, 1.0)
    }

    /// 按补间的时间缩放设置选择增量
    pub fn delta(&self, ignore_time_scale: bool) -> f32 {
        if ignore_time_scale {
            self.unscaled
        } else {
            self.scaled
        }
    }
}
