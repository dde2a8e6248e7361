//! 音源

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;
use tween_runtime::{CancelToken, TargetId, TweenTarget};

#[derive(Debug)]
struct AudioState {
    volume: Cell<f32>,
    playing: Cell<bool>,
}

/// 音源句柄
#[derive(Debug, Clone)]
pub struct AudioSource {
    id: TargetId,
    name: Rc<str>,
    state: Rc<AudioState>,
    lifetime: CancelToken,
}

/// 音源状态快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSnapshot {
    pub name: String,
    pub volume: f32,
    pub playing: bool,
    pub destroyed: bool,
}

impl AudioSource {
    /// 创建音源，音量裁剪到 [0, 1]
    pub fn new(name: &str, volume: f32) -> Self {
        Self {
            id: TargetId::fresh(),
            name: Rc::from(name),
            state: Rc::new(AudioState {
                volume: Cell::new(volume.clamp(0.0, 1.0)),
                playing: Cell::new(false),
            }),
            lifetime: CancelToken::new(),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> f32 {
        self.state.volume.get()
    }

    /// 设置音量 (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) {
        self.state.volume.set(volume.clamp(0.0, 1.0));
    }

    pub fn play(&self) {
        if !self.state.playing.replace(true) {
            debug!(source = %self.name, "开始播放");
        }
    }

    pub fn stop(&self) {
        if self.state.playing.replace(false) {
            debug!(source = %self.name, "停止播放");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing.get()
    }

    /// 销毁音源，运行中的补间随之中止
    pub fn destroy(&self) {
        self.stop();
        self.lifetime.cancel();
        debug!(source = %self.name, "音源已销毁");
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    pub fn snapshot(&self) -> AudioSnapshot {
        AudioSnapshot {
            name: self.name.to_string(),
            volume: self.volume(),
            playing: self.is_playing(),
            destroyed: self.is_destroyed(),
        }
    }
}

impl TweenTarget<f32> for AudioSource {
    fn id(&self) -> TargetId {
        self.id
    }

    fn current(&self) -> f32 {
        self.volume()
    }

    fn apply(&self, value: f32) {
        self.set_volume(value);
    }

    fn lifetime(&self) -> Option<CancelToken> {
        Some(self.lifetime.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_is_clamped() {
        let source = AudioSource::new("bgm", 2.0);
        assert_eq!(source.volume(), 1.0);
        source.set_volume(-0.5);
        assert_eq!(source.volume(), 0.0);
    }

    #[test]
    fn test_clones_share_state() {
        let source = AudioSource::new("bgm", 0.0);
        let other = source.clone();
        other.play();
        other.set_volume(0.4);

        assert!(source.is_playing());
        assert_eq!(source.volume(), 0.4);
        assert_eq!(source.id(), other.id());
    }

    #[test]
    fn test_destroy_stops_and_cancels_lifetime() {
        let source = AudioSource::new("voice", 1.0);
        source.play();
        let lifetime = TweenTarget::<f32>::lifetime(&source).unwrap();

        source.destroy();
        assert!(!source.is_playing());
        assert!(lifetime.is_cancelled());
        assert!(source.snapshot().destroyed);
    }
}
