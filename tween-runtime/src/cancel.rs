//! # Cancel 模块
//!
//! 单线程取消信号。
//!
//! 一个 [`CancelToken`] 可以链接到若干父令牌，任一父令牌被取消时子令牌视为已取消，
//! 反之不成立。运行器用它组合三种取消来源：
//!
//! - 目标生命周期结束（owner lifetime）
//! - 外部传入的取消令牌
//! - 运行器自身每次运行的令牌（一次性，运行结束即作废）

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

struct TokenState {
    cancelled: Cell<bool>,
    parents: Vec<CancelToken>,
}

/// 取消令牌
///
/// 克隆得到的是同一个令牌的句柄。
#[derive(Clone)]
pub struct CancelToken {
    state: Rc<TokenState>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// 创建独立的令牌
    pub fn new() -> Self {
        Self::linked(std::iter::empty())
    }

    /// 创建链接到父令牌的令牌
    pub fn linked(parents: impl IntoIterator<Item = CancelToken>) -> Self {
        Self {
            state: Rc::new(TokenState {
                cancelled: Cell::new(false),
                parents: parents.into_iter().collect(),
            }),
        }
    }

    /// 取消令牌（重复调用无副作用）
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
    }

    /// 自身或任一父令牌是否已被取消
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get() || self.state.parents.iter().any(CancelToken::is_cancelled)
    }

    /// 是否与另一个句柄指向同一令牌
    pub fn same_token(&self, other: &CancelToken) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .field("parents", &self.state.parents.len())
            .finish()
    }
}
