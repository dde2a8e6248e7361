//! # Config 模块
//!
//! 宿主配置管理，集中管理帧时钟、日志与演示场景的配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{Level, debug, warn};

/// 宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HostConfig {
    /// 帧时钟配置
    #[serde(default)]
    pub clock: ClockConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,

    /// 演示场景配置
    #[serde(default)]
    pub demo: DemoConfig,
}

/// 帧时钟配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// 固定帧率（帧/秒）
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// 全局时间缩放（0 为暂停）
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,

    /// 单帧最大时间增量（秒），用于吸收卡顿
    #[serde(default = "default_max_delta")]
    pub max_delta: f32,
}

/// 调试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// 演示场景配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// 运行帧数
    #[serde(default = "default_demo_frames")]
    pub frames: u32,

    /// 淡入淡出时长（秒）
    #[serde(default = "default_fade_duration")]
    pub fade_duration: f32,

    /// 移动时长（秒）
    #[serde(default = "default_move_duration")]
    pub move_duration: f32,
}

// 默认值函数
fn default_frame_rate() -> u32 {
    60
}

fn default_time_scale() -> f32 {
    1.0
}

fn default_max_delta() -> f32 {
    0.1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_demo_frames() -> u32 {
    180
}

fn default_fade_duration() -> f32 {
    1.0
}

fn default_move_duration() -> f32 {
    0.5
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            time_scale: default_time_scale(),
            max_delta: default_max_delta(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: default_demo_frames(),
            fade_duration: default_fade_duration(),
            move_duration: default_move_duration(),
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => {
                debug!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 严格加载配置文件，失败时返回错误
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 解析日志级别
    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.debug.log_level).map_err(|_| {
            ConfigError::Validation(format!("无效的日志级别: {}", self.debug.log_level))
        })
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.frame_rate == 0 {
            return Err(ConfigError::Validation("帧率必须大于 0".to_string()));
        }

        if !self.clock.time_scale.is_finite() || self.clock.time_scale < 0.0 {
            return Err(ConfigError::Validation(
                "时间缩放必须是非负有限值".to_string(),
            ));
        }

        if !self.clock.max_delta.is_finite() || self.clock.max_delta <= 0.0 {
            return Err(ConfigError::Validation(
                "最大帧增量必须是正的有限值".to_string(),
            ));
        }

        // 检查演示时长
        for (name, duration) in [
            ("fade_duration", self.demo.fade_duration),
            ("move_duration", self.demo.move_duration),
        ] {
            if !duration.is_finite() || duration < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name} 必须是非负有限值"
                )));
            }
        }

        self.log_level()?;
        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析失败
    #[error("配置解析失败 {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    Serialize(#[source] serde_json::Error),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.clock.frame_rate, 60);
        assert_eq!(config.clock.time_scale, 1.0);
        assert_eq!(config.debug.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = HostConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();

        // 反序列化
        let loaded: HostConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let loaded: HostConfig =
            serde_json::from_str(r#"{ "clock": { "frame_rate": 30 } }"#).unwrap();
        assert_eq!(loaded.clock.frame_rate, 30);
        assert_eq!(loaded.clock.max_delta, 0.1);
        assert_eq!(loaded.demo, DemoConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = HostConfig::default();

        // 无效帧率
        config.clock.frame_rate = 0;
        assert!(config.validate().is_err());
        config.clock.frame_rate = 60;

        // 负时间缩放
        config.clock.time_scale = -1.0;
        assert!(config.validate().is_err());
        config.clock.time_scale = 0.0;
        assert!(config.validate().is_ok());

        // 非有限时长
        config.demo.fade_duration = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.demo.fade_duration = 1.0;

        // 无效日志级别
        config.debug.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        let mut config = HostConfig::default();
        config.debug.log_level = "debug".to_string();
        assert_eq!(config.log_level().unwrap(), Level::DEBUG);
    }
}
