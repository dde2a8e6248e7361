//! # Demo 模块
//!
//! 内置的 headless 演示场景：按帧回放一组补间，记录结束事件与最终状态。
//!
//! 场景内容：
//! - BGM 淡入，中途改为淡到一半音量（替换）
//! - 两条语音交叉淡入淡出
//! - 精灵在 XY 平面移动，完成后接一段 Y 轴上移
//! - 面板 alpha 淡出（忽略时间缩放）
//! - 特效颜色渐变途中被销毁

use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, info};
use tween_runtime::{Color, TargetId, TweenOutcome, TweenResult, Vec2, Vec3};

use crate::clock::FrameClock;
use crate::config::HostConfig;
use crate::targets::{AudioSnapshot, AudioSource, Graphic, GraphicSnapshot, Transform, TransformSnapshot};
use crate::tweener::{TweenOptions, Tweener};

/// 单个结束事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoEvent {
    pub frame: u64,
    pub target: String,
    pub outcome: TweenOutcome,
}

/// 演示结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    pub frames: u64,
    pub elapsed: f64,
    pub events: Vec<DemoEvent>,
    /// 完成回调被调用的次数
    pub finish_hooks: u32,
    pub audio: Vec<AudioSnapshot>,
    pub transforms: Vec<TransformSnapshot>,
    pub graphics: Vec<GraphicSnapshot>,
}

/// 替换 BGM 补间的帧
const RETARGET_FRAME: u64 = 10;
/// 销毁特效的帧
const DESTROY_FRAME: u64 = 20;

/// 运行演示场景
pub fn run(config: &HostConfig, frames: u32) -> TweenResult<DemoReport> {
    let fade = config.demo.fade_duration;
    let travel = config.demo.move_duration;

    let mut clock = FrameClock::from_config(&config.clock);
    let mut tweener = Tweener::new();
    let hooks = Rc::new(Cell::new(0u32));

    let bgm = AudioSource::new("bgm", 0.0);
    let voice_a = AudioSource::new("voice_a", 1.0);
    let voice_b = AudioSource::new("voice_b", 0.0);
    let sprite = Transform::new("sprite", Vec3::new(0.0, 0.0, 1.0));
    let panel = Graphic::new("panel", Color::WHITE);
    let spark = Graphic::new("spark", Color::rgba(1.0, 0.8, 0.2, 1.0));

    let names: BTreeMap<TargetId, &str> = [
        (bgm.id(), bgm.name()),
        (voice_a.id(), voice_a.name()),
        (voice_b.id(), voice_b.name()),
        (sprite.id(), sprite.name()),
        (panel.id(), panel.name()),
        (spark.id(), spark.name()),
    ]
    .into_iter()
    .collect();

    let counted = || {
        let hooks = hooks.clone();
        TweenOptions::default().on_complete(move |_| hooks.set(hooks.get() + 1))
    };

    bgm.play();
    voice_a.play();
    tweener.fade(&bgm, 1.0, fade, counted())?;
    tweener.crossfade(&voice_a, &voice_b, 0.8, fade, counted())?;
    tweener.move_2d(&sprite, Vec2::new(3.0, 4.0), travel, counted())?;
    tweener.alpha_fade(&panel, 0.0, fade, counted().ignore_time_scale())?;
    tweener.color_fade(&spark, Color::CLEAR, fade * 2.0, counted())?;

    let mut events = Vec::new();
    let mut chained = false;
    for _ in 0..frames {
        let frame = clock.next_frame();
        let index = clock.frame_count();

        for event in tweener.update(frame) {
            let name = names.get(&event.target).copied().unwrap_or("?");
            debug!(frame = index, target = name, outcome = ?event.outcome, "补间结束");

            if event.target == sprite.id() && event.outcome == TweenOutcome::Completed && !chained {
                chained = true;
                tweener.add_y(&sprite, 1.0, travel, counted())?;
            }
            events.push(DemoEvent {
                frame: index,
                target: name.to_string(),
                outcome: event.outcome,
            });
        }

        if index == RETARGET_FRAME {
            tweener.fade(&bgm, 0.5, fade, counted())?;
        }
        if index == DESTROY_FRAME {
            spark.destroy();
        }
    }

    info!(
        frames = clock.frame_count(),
        events = events.len(),
        active = tweener.active_count(),
        "演示结束"
    );

    Ok(DemoReport {
        frames: clock.frame_count(),
        elapsed: clock.elapsed(),
        events,
        finish_hooks: hooks.get(),
        audio: vec![bgm.snapshot(), voice_a.snapshot(), voice_b.snapshot()],
        transforms: vec![sprite.snapshot()],
        graphics: vec![panel.snapshot(), spark.snapshot()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let config = HostConfig::default();
        let report = run(&config, config.demo.frames).unwrap();

        assert_eq!(report.frames, 180);

        let bgm = &report.audio[0];
        assert_eq!(bgm.volume, 0.5);
        assert!(bgm.playing);
        assert!(!report.audio[1].playing);
        assert_eq!(report.audio[2].volume, 0.8);

        let sprite = &report.transforms[0];
        assert_eq!(sprite.position, Vec3::new(3.0, 5.0, 1.0));
        assert_eq!(report.graphics[0].color.a, 0.0);
        assert!(report.graphics[1].destroyed);

        let outcome_of = |name: &str| {
            report
                .events
                .iter()
                .filter(|e| e.target == name)
                .map(|e| e.outcome)
                .collect::<Vec<_>>()
        };
        assert_eq!(outcome_of("bgm"), vec![TweenOutcome::Completed]);
        assert_eq!(outcome_of("spark"), vec![TweenOutcome::OwnerDestroyed]);
        assert_eq!(
            outcome_of("sprite"),
            vec![TweenOutcome::Completed, TweenOutcome::Completed]
        );

        // bgm、voice_b、sprite ×2、panel、spark（销毁也触发）
        assert_eq!(report.finish_hooks, 6);
    }

    #[test]
    fn test_paused_clock_only_moves_unscaled() {
        let mut config = HostConfig::default();
        config.clock.time_scale = 0.0;
        let report = run(&config, 120).unwrap();

        assert_eq!(report.audio[0].volume, 0.0);
        assert_eq!(report.graphics[0].color.a, 0.0);
        assert_eq!(report.transforms[0].position, Vec3::new(0.0, 0.0, 1.0));
    }
}
