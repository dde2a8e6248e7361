//! # Targets 模块
//!
//! 宿主侧的可补间对象。
//!
//! 每个对象是一个廉价可克隆的句柄（共享 `Rc` 状态），持有稳定的
//! [`TargetId`](tween_runtime::TargetId) 和生命周期令牌。
//! `destroy()` 取消令牌，运行中的补间在下一帧中止。

mod audio;
mod graphic;
mod transform;

pub use audio::{AudioSnapshot, AudioSource};
pub use graphic::{Graphic, GraphicSnapshot};
pub use transform::{Transform, TransformSnapshot};
