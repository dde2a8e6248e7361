//! # Error 模块
//!
//! 定义 tween-runtime 中使用的错误类型。
//!
//! 空描述符、被覆盖的运行、目标销毁、重复停止都不是错误，
//! 它们以 [`TweenOutcome`](crate::TweenOutcome) 或静默 no-op 的形式体现。

use thiserror::Error;

use crate::target::TargetId;

/// 补间请求错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// 时长为 NaN 或无穷大
    #[error("补间时长必须是有限值，实际为 {duration}")]
    NonFiniteDuration { duration: f32 },

    /// 目标值含有 NaN 或无穷大分量
    #[error("{target} 的补间目标值包含非有限分量")]
    NonFiniteValue { target: TargetId },
}

/// Result 类型别名
pub type TweenResult<T> = Result<T, TweenError>;
