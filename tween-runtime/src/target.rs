//! # Target 模块
//!
//! 被补间对象的抽象：稳定的身份、属性读写、生命周期信号。

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cancel::CancelToken;
use crate::value::Tweenable;

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// 目标唯一标识符
///
/// 注册表以此为键，保证同一目标最多只有一个运行中的补间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(u64);

impl TargetId {
    /// 分配一个进程内唯一的新 ID
    pub fn fresh() -> Self {
        Self(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 由宿主已有的句柄构造
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

/// 可补间目标
///
/// 由宿主实现。读写通过 `&self` 进行，实现方使用内部可变性
/// （通常是 `Rc<RefCell<_>>`），这样观察者闭包可以持有目标的克隆。
pub trait TweenTarget<T: Tweenable> {
    /// 目标身份
    fn id(&self) -> TargetId;

    /// 读取属性当前值
    fn current(&self) -> T;

    /// 写入属性
    fn apply(&self, value: T);

    /// 目标销毁时被取消的令牌
    ///
    /// 返回 `None` 表示目标生命周期不受追踪。
    fn lifetime(&self) -> Option<CancelToken> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = TargetId::fresh();
        let b = TargetId::fresh();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn test_display() {
        assert_eq!(TargetId::from_raw(7).to_string(), "TargetId(7)");
    }
}
