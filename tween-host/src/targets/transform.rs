//! 变换（位置）

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;
use tween_runtime::{CancelToken, TargetId, TweenTarget, Vec3};

/// 变换句柄
#[derive(Debug, Clone)]
pub struct Transform {
    id: TargetId,
    name: Rc<str>,
    position: Rc<Cell<Vec3>>,
    lifetime: CancelToken,
}

/// 变换状态快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformSnapshot {
    pub name: String,
    pub position: Vec3,
    pub destroyed: bool,
}

impl Transform {
    pub fn new(name: &str, position: Vec3) -> Self {
        Self {
            id: TargetId::fresh(),
            name: Rc::from(name),
            position: Rc::new(Cell::new(position)),
            lifetime: CancelToken::new(),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position.get()
    }

    pub fn set_position(&self, position: Vec3) {
        self.position.set(position);
    }

    pub fn destroy(&self) {
        self.lifetime.cancel();
        debug!(transform = %self.name, "变换已销毁");
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            name: self.name.to_string(),
            position: self.position(),
            destroyed: self.is_destroyed(),
        }
    }
}

impl TweenTarget<Vec3> for Transform {
    fn id(&self) -> TargetId {
        self.id
    }

    fn current(&self) -> Vec3 {
        self.position()
    }

    fn apply(&self, value: Vec3) {
        self.set_position(value);
    }

    fn lifetime(&self) -> Option<CancelToken> {
        Some(self.lifetime.clone())
    }
}
