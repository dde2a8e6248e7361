//! # 补间流程集成测试
//!
//! 测试 FrameClock → Tweener → 目标对象 的完整链路。
//! 这些测试不依赖真实的渲染/音频设备。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tween_host::{AudioSource, FrameClock, Graphic, HostConfig, Transform, TweenOptions, Tweener};
use tween_runtime::{CancelToken, Color, TweenError, TweenEvent, TweenOutcome, Vec2, Vec3};

/// 记录完成回调次数
fn counting_options() -> (Rc<Cell<u32>>, TweenOptions) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    let options = TweenOptions::default().on_complete(move |_| inner.set(inner.get() + 1));
    (count, options)
}

/// 测试 0.25 秒帧长下的淡入序列
#[test]
fn test_quarter_second_fade() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let bgm = AudioSource::new("bgm", 0.0);
    let (finished, options) = counting_options();

    assert!(tweener.fade(&bgm, 1.0, 1.0, options).unwrap());

    let mut volumes = Vec::new();
    let mut events = Vec::new();
    for _ in 0..4 {
        events.extend(tweener.update(clock.next_frame()));
        volumes.push(bgm.volume());
    }

    assert_eq!(volumes, vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(finished.get(), 1);
    assert_eq!(
        events,
        vec![TweenEvent {
            target: bgm.id(),
            outcome: TweenOutcome::Completed
        }]
    );
    assert_eq!(tweener.active_count(), 0);
}

/// 测试帧长不均匀时的单调性与终值
#[test]
fn test_uneven_frames_monotone_and_exact() {
    let mut tweener = Tweener::new();
    let transform = Transform::new("sprite", Vec3::zero());
    tweener
        .move_x(&transform, 7.0, 0.9, TweenOptions::default())
        .unwrap();

    let mut xs = Vec::new();
    for dt in [0.016, 0.2, 0.033, 0.25, 0.1, 0.4, 0.1] {
        tweener.update(tween_runtime::FrameDelta::fixed(dt));
        xs.push(transform.position().x);
    }

    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*xs.last().unwrap(), 7.0);
    assert!(!tweener.is_tweening(transform.id()));
}

/// 测试时长为 0 的补间在第一帧直接到达终值
#[test]
fn test_zero_duration() {
    let mut clock = FrameClock::fixed(60);
    let mut tweener = Tweener::new();
    let panel = Graphic::new("panel", Color::WHITE);
    let (finished, options) = counting_options();

    assert!(tweener.color_fade(&panel, Color::BLACK, 0.0, options).unwrap());
    assert_eq!(panel.color(), Color::WHITE);

    tweener.update(clock.next_frame());
    assert_eq!(panel.color(), Color::BLACK);
    assert_eq!(finished.get(), 1);
    assert_eq!(tweener.active_count(), 0);
}

/// 测试已在目标值时不创建条目
#[test]
fn test_fast_path() {
    let mut tweener = Tweener::new();
    let bgm = AudioSource::new("bgm", 0.5);
    let (finished, options) = counting_options();

    assert!(!tweener.fade(&bgm, 0.5, 1.0, options).unwrap());
    assert_eq!(tweener.active_count(), 0);
    assert!(tweener.update(tween_runtime::FrameDelta::fixed(0.5)).is_empty());
    assert_eq!(finished.get(), 0);
}

/// 测试重复发起补间：只保留一个运行器，旧补间的回调不触发
#[test]
fn test_double_fade_supersedes() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let bgm = AudioSource::new("bgm", 0.0);
    let (first_finished, first) = counting_options();
    let (second_finished, second) = counting_options();

    let first_handle = tweener
        .fade_async(&bgm, 1.0, 1.0, first, None)
        .unwrap();
    tweener.update(clock.next_frame());

    tweener.fade(&bgm, 0.0, 0.5, second).unwrap();
    assert_eq!(tweener.active_count(), 1);

    for _ in 0..4 {
        tweener.update(clock.next_frame());
    }

    assert_eq!(pollster::block_on(first_handle), TweenOutcome::Superseded);
    assert_eq!(first_finished.get(), 0);
    assert_eq!(second_finished.get(), 1);
    assert_eq!(bgm.volume(), 0.0);
}

/// 测试停止后条目被回收且回调不触发
#[test]
fn test_stop_evicts() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let sprite = Transform::new("sprite", Vec3::zero());
    let (finished, options) = counting_options();

    tweener
        .move_2d(&sprite, Vec2::new(1.0, 1.0), 1.0, options)
        .unwrap();
    tweener.update(clock.next_frame());
    assert!(tweener.is_tweening(sprite.id()));

    assert!(tweener.move_stop(&sprite));
    assert!(!tweener.move_stop(&sprite));
    assert_eq!(tweener.active_count(), 0);

    tweener.update(clock.next_frame());
    assert_eq!(sprite.position(), Vec3::new(0.25, 0.25, 0.0));
    assert_eq!(finished.get(), 0);
}

/// 测试目标销毁：下一帧前中止，清理回调只调用一次
#[test]
fn test_destroyed_target() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let voice = AudioSource::new("voice", 1.0);
    voice.play();
    let cleaned = Rc::new(RefCell::new(Vec::new()));
    let sink = cleaned.clone();

    tweener
        .fade(
            &voice,
            0.0,
            1.0,
            TweenOptions::default().on_complete(move |id| sink.borrow_mut().push(id)),
        )
        .unwrap();
    tweener.update(clock.next_frame());
    assert_eq!(voice.volume(), 0.75);

    voice.destroy();
    let events = tweener.update(clock.next_frame());

    assert_eq!(voice.volume(), 0.75);
    assert_eq!(*cleaned.borrow(), vec![voice.id()]);
    assert_eq!(events[0].outcome, TweenOutcome::OwnerDestroyed);
    assert_eq!(tweener.active_count(), 0);

    for _ in 0..4 {
        tweener.update(clock.next_frame());
    }
    assert_eq!(cleaned.borrow().len(), 1);
}

/// 测试对已销毁目标发起补间：不写入、不建条目、不调用回调
#[test]
fn test_tween_on_destroyed_target_is_noop() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let voice = AudioSource::new("voice", 0.3);
    voice.play();
    voice.destroy();
    let (finished, options) = counting_options();

    assert!(!tweener.fade(&voice, 1.0, 1.0, options).unwrap());
    assert_eq!(tweener.active_count(), 0);

    let (stopped, options) = counting_options();
    assert!(!tweener.fade_out_and_stop(&voice, 1.0, options).unwrap());

    let se = AudioSource::new("se", 0.0);
    se.destroy();
    assert!(!tweener.fade(&se, 0.0, 1.0, TweenOptions::default()).unwrap());

    let handle = tweener
        .fade_async(&voice, 1.0, 1.0, TweenOptions::default(), None)
        .unwrap();
    assert_eq!(pollster::block_on(handle), TweenOutcome::OwnerDestroyed);

    assert!(tweener.update(clock.next_frame()).is_empty());
    assert_eq!(voice.volume(), 0.3);
    assert_eq!(finished.get(), 0);
    assert_eq!(stopped.get(), 0);
    assert_eq!(tweener.active_count(), 0);
}

/// 测试单轴移动的外部取消
#[test]
fn test_single_axis_external_cancel() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let sprite = Transform::new("sprite", Vec3::new(0.0, 3.0, 0.0));
    let cancel = CancelToken::new();
    let (finished, options) = counting_options();

    let handle = tweener
        .move_x_async(&sprite, 2.0, 0.5, options, Some(cancel.clone()))
        .unwrap();
    tweener.update(clock.next_frame());
    cancel.cancel();
    let events = tweener.update(clock.next_frame());

    assert_eq!(events[0].outcome, TweenOutcome::Cancelled);
    assert_eq!(pollster::block_on(handle), TweenOutcome::Cancelled);
    assert_eq!(sprite.position(), Vec3::new(1.0, 3.0, 0.0));
    assert_eq!(finished.get(), 0);
    assert_eq!(tweener.active_count(), 0);
}

/// 测试外部取消令牌
#[test]
fn test_external_cancel() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let sprite = Transform::new("sprite", Vec3::zero());
    let cancel = CancelToken::new();

    let handle = tweener
        .move_2d_async(
            &sprite,
            Vec2::new(4.0, 0.0),
            1.0,
            TweenOptions::default(),
            Some(cancel.clone()),
        )
        .unwrap();
    tweener.update(clock.next_frame());
    cancel.cancel();
    tweener.update(clock.next_frame());

    assert_eq!(pollster::block_on(handle), TweenOutcome::Cancelled);
    assert_eq!(sprite.position().x, 1.0);
    assert!(!tweener.is_tweening(sprite.id()));
}

/// 测试 RGB 模式下 alpha 位级不变
#[test]
fn test_rgb_mode_alpha_bit_exact() {
    let mut clock = FrameClock::fixed(30);
    let mut tweener = Tweener::new();
    let alpha = 0.618_034_f32;
    let panel = Graphic::new("panel", Color::rgba(0.1, 0.2, 0.3, alpha));

    tweener
        .rgb_fade(&panel, Color::rgb(0.9, 0.8, 0.7), 0.5, TweenOptions::default())
        .unwrap();
    while tweener.is_tweening(panel.id()) {
        tweener.update(clock.next_frame());
        assert_eq!(panel.color().a.to_bits(), alpha.to_bits());
    }
    assert_eq!(panel.color(), Color::rgba(0.9, 0.8, 0.7, alpha));
}

/// 测试暂停时忽略时间缩放的补间继续推进
#[test]
fn test_ignore_time_scale_while_paused() {
    let mut clock = FrameClock::fixed(4);
    clock.pause();
    let mut tweener = Tweener::new();
    let scaled = AudioSource::new("scaled", 0.0);
    let unscaled = AudioSource::new("unscaled", 0.0);

    tweener
        .fade(&scaled, 1.0, 0.5, TweenOptions::default())
        .unwrap();
    tweener
        .fade(&unscaled, 1.0, 0.5, TweenOptions::default().ignore_time_scale())
        .unwrap();
    for _ in 0..2 {
        tweener.update(clock.next_frame());
    }

    assert_eq!(scaled.volume(), 0.0);
    assert_eq!(unscaled.volume(), 1.0);
    assert!(tweener.is_tweening(scaled.id()));
}

/// 测试非有限参数被拒绝
#[test]
fn test_non_finite_rejected() {
    let mut tweener = Tweener::new();
    let sprite = Transform::new("sprite", Vec3::zero());

    let result = tweener.move_to(
        &sprite,
        Vec3::new(f32::NAN, 0.0, 0.0),
        1.0,
        TweenOptions::default(),
    );
    assert!(matches!(result, Err(TweenError::NonFiniteValue { .. })));

    let result = tweener.move_x(&sprite, 1.0, f32::INFINITY, TweenOptions::default());
    assert!(matches!(result, Err(TweenError::NonFiniteDuration { .. })));
    assert_eq!(tweener.active_count(), 0);
}

/// 测试不同属性互不干扰
#[test]
fn test_properties_are_independent() {
    let mut clock = FrameClock::fixed(4);
    let mut tweener = Tweener::new();
    let bgm = AudioSource::new("bgm", 0.0);
    let sprite = Transform::new("sprite", Vec3::zero());

    tweener.fade(&bgm, 1.0, 1.0, TweenOptions::default()).unwrap();
    tweener
        .move_y(&sprite, 2.0, 0.5, TweenOptions::default())
        .unwrap();
    assert_eq!(tweener.active_count(), 2);

    tweener.update(clock.next_frame());
    tweener.move_stop(&sprite);
    tweener.update(clock.next_frame());

    assert_eq!(bgm.volume(), 0.5);
    assert_eq!(sprite.position().y, 1.0);
}

/// 测试配置保存与读取
#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = HostConfig::default();
    config.clock.frame_rate = 30;
    config.demo.frames = 42;
    config.save(&path).unwrap();

    let loaded = HostConfig::load(&path);
    assert_eq!(loaded, config);
}

/// 测试配置缺失或损坏时回退到默认值
#[test]
fn test_config_fallback() {
    let dir = tempfile::tempdir().unwrap();

    let missing = HostConfig::load(dir.path().join("missing.json"));
    assert_eq!(missing, HostConfig::default());

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert_eq!(HostConfig::load(&broken), HostConfig::default());
    assert!(HostConfig::try_load(&broken).is_err());
}
