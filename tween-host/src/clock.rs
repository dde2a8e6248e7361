//! # Clock 模块
//!
//! 帧时钟：把固定步长或真实时间转换为 [`FrameDelta`]。
//!
//! 全局时间缩放只影响 `scaled` 增量；暂停等价于缩放为 0，
//! 此时忽略时间缩放的补间仍会推进。

use std::time::Instant;
use tracing::{trace, warn};
use tween_runtime::FrameDelta;

use crate::config::ClockConfig;

/// 时间来源
#[derive(Debug, Clone, Copy)]
enum TimeSource {
    /// 每帧固定步长（headless 回放）
    Fixed { step: f32 },
    /// 真实时间
    Wall { last: Option<Instant> },
}

/// 帧时钟
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: TimeSource,
    time_scale: f32,
    max_delta: f32,
    paused: bool,
    frame: u64,
    /// 累计真实时间（秒）
    elapsed: f64,
}

impl FrameClock {
    /// 固定帧率时钟
    pub fn fixed(frame_rate: u32) -> Self {
        Self::with_source(TimeSource::Fixed {
            step: 1.0 / frame_rate.max(1) as f32,
        })
    }

    /// 真实时间时钟
    pub fn wall() -> Self {
        Self::with_source(TimeSource::Wall { last: None })
    }

    /// 由配置创建固定帧率时钟
    pub fn from_config(config: &ClockConfig) -> Self {
        let mut clock = Self::fixed(config.frame_rate);
        clock.max_delta = config.max_delta;
        clock.set_time_scale(config.time_scale);
        clock
    }

    fn with_source(source: TimeSource) -> Self {
        Self {
            source,
            time_scale: 1.0,
            max_delta: f32::INFINITY,
            paused: false,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// 设置全局时间缩放
    ///
    /// 负数或非有限值被忽略。
    pub fn set_time_scale(&mut self, time_scale: f32) {
        if !time_scale.is_finite() || time_scale < 0.0 {
            warn!(time_scale, "无效的时间缩放，保持原值");
            return;
        }
        self.time_scale = time_scale;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// 设置单帧最大增量
    pub fn set_max_delta(&mut self, max_delta: f32) {
        if max_delta > 0.0 {
            self.max_delta = max_delta;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 已产生的帧数
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// 累计真实时间（秒）
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// 推进到下一帧
    pub fn next_frame(&mut self) -> FrameDelta {
        let raw = match &mut self.source {
            TimeSource::Fixed { step } => *step,
            TimeSource::Wall { last } => {
                let now = Instant::now();
                let dt = last.map_or(0.0, |prev| (now - prev).as_secs_f32());
                *last = Some(now);
                dt
            }
        };

        let unscaled = raw.min(self.max_delta);
        let scale = if self.paused { 0.0 } else { self.time_scale };
        self.frame += 1;
        self.elapsed += f64::from(unscaled);

        trace!(frame = self.frame, unscaled, scale, "帧推进");
        FrameDelta::new(unscaled, scale)
    }
}
