//! # Handle 模块
//!
//! 可等待的补间句柄。

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// 一次运行的结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TweenOutcome {
    /// 自然完成，已送达目标值
    Completed,
    /// 被 `stop()` / `cancel_tween()` 中止
    Stopped,
    /// 被同一目标上的新补间替换
    Superseded,
    /// 外部取消令牌触发
    Cancelled,
    /// 目标已被销毁
    OwnerDestroyed,
}

impl TweenOutcome {
    /// 是否触发完成回调
    ///
    /// 自然完成与目标销毁会触发（后者保证清理一定发生），
    /// 主动停止、被替换、外部取消不会触发。
    pub fn fires_finish_hooks(&self) -> bool {
        matches!(self, Self::Completed | Self::OwnerDestroyed)
    }
}

enum HandleState {
    Ready(Option<TweenOutcome>),
    Waiting(oneshot::Receiver<TweenOutcome>),
}

/// 补间句柄
///
/// 作为 `Future` 在运行结束时给出 [`TweenOutcome`]。
/// 若运行器在运行途中被丢弃（或观察者 panic 导致运行中断），结果为 `Stopped`。
#[must_use = "补间句柄需要 await 或显式丢弃"]
pub struct TweenHandle {
    state: HandleState,
}

impl TweenHandle {
    pub(crate) fn waiting(receiver: oneshot::Receiver<TweenOutcome>) -> Self {
        Self {
            state: HandleState::Waiting(receiver),
        }
    }

    /// 已经结束的句柄
    pub fn resolved(outcome: TweenOutcome) -> Self {
        Self {
            state: HandleState::Ready(Some(outcome)),
        }
    }

    /// 不阻塞地查询结果
    ///
    /// 运行尚未结束时返回 `None`。结果被取走后再次调用也返回 `None`。
    pub fn try_outcome(&mut self) -> Option<TweenOutcome> {
        match &mut self.state {
            HandleState::Ready(outcome) => outcome.take(),
            HandleState::Waiting(receiver) => {
                let outcome = match receiver.try_recv() {
                    Ok(Some(outcome)) => outcome,
                    Ok(None) => return None,
                    Err(oneshot::Canceled) => TweenOutcome::Stopped,
                };
                self.state = HandleState::Ready(None);
                Some(outcome)
            }
        }
    }
}

impl Future for TweenHandle {
    type Output = TweenOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            HandleState::Ready(outcome) => match outcome.take() {
                Some(outcome) => Poll::Ready(outcome),
                None => panic!("TweenHandle polled after completion"),
            },
            HandleState::Waiting(receiver) => match Pin::new(receiver).poll(cx) {
                Poll::Ready(result) => {
                    this.state = HandleState::Ready(None);
                    Poll::Ready(result.unwrap_or(TweenOutcome::Stopped))
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl std::fmt::Debug for TweenHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            HandleState::Ready(Some(outcome)) => format!("Ready({outcome:?})"),
            HandleState::Ready(None) => "Taken".to_string(),
            HandleState::Waiting(_) => "Waiting".to_string(),
        };
        f.debug_struct("TweenHandle").field("state", &state).finish()
    }
}
