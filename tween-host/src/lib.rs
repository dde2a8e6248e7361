//! # Tween Host
//!
//! `tween-runtime` 的参考宿主实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 帧时钟（固定步长 / 真实时间、全局时间缩放、暂停）
//! - 可补间对象（音源、变换、图形）及其生命周期
//! - 淡入淡出、移动、颜色渐变等便捷操作
//! - 配置加载与 headless 演示
//!
//! Host 层不包含插值与调度逻辑，只负责提供帧时间和目标对象。

pub mod clock;
pub mod config;
pub mod demo;
pub mod targets;
pub mod tweener;

pub use clock::FrameClock;
pub use config::{ClockConfig, ConfigError, DebugConfig, DemoConfig, HostConfig};
pub use demo::{DemoEvent, DemoReport};
pub use targets::{
    AudioSnapshot, AudioSource, Graphic, GraphicSnapshot, Transform, TransformSnapshot,
};
pub use tweener::{TweenOptions, Tweener};
