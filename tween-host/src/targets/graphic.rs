//! 图形（颜色）

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;
use tween_runtime::{CancelToken, Color, TargetId, TweenTarget};

/// 图形句柄
#[derive(Debug, Clone)]
pub struct Graphic {
    id: TargetId,
    name: Rc<str>,
    color: Rc<Cell<Color>>,
    lifetime: CancelToken,
}

/// 图形状态快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphicSnapshot {
    pub name: String,
    pub color: Color,
    pub destroyed: bool,
}

impl Graphic {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            id: TargetId::fresh(),
            name: Rc::from(name),
            color: Rc::new(Cell::new(color)),
            lifetime: CancelToken::new(),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color.get()
    }

    pub fn set_color(&self, color: Color) {
        self.color.set(color);
    }

    pub fn destroy(&self) {
        self.lifetime.cancel();
        debug!(graphic = %self.name, "图形已销毁");
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn snapshot(&self) -> GraphicSnapshot {
        GraphicSnapshot {
            name: self.name.to_string(),
            color: self.color(),
            destroyed: self.is_destroyed(),
        }
    }
}

impl TweenTarget<Color> for Graphic {
    fn id(&self) -> TargetId {
        self.id
    }

    fn current(&self) -> Color {
        self.color()
    }

    fn apply(&self, value: Color) {
        self.set_color(value);
    }

    fn lifetime(&self) -> Option<CancelToken> {
        Some(self.lifetime.clone())
    }
}
