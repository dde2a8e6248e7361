//! # Value 模块
//!
//! 可补间的数值类型：标量、三维向量、RGBA 颜色。
//!
//! 插值一律是逐分量线性插值（lerp），不做缓动。
//! `Mode` 决定哪些分量参与插值，未参与的分量保持起始值。

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// 近似相等判断（标量）
///
/// 容差取相对误差 `1e-6` 与 `f32::EPSILON * 8` 中较大者。
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// 标量线性插值（不裁剪 `t`）
///
/// `t == 1.0` 时精确返回 `b`。
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t == 1.0 { b } else { a + (b - a) * t }
}

/// 可补间的值
///
/// 补间描述符对 `T: Tweenable` 泛型，运行器本身不关心具体类型。
pub trait Tweenable: Copy + Debug + 'static {
    /// 分量选择模式
    type Mode: Copy + Debug + Default + PartialEq;

    /// 逐分量线性插值，`t` 不在内部裁剪
    fn lerp(start: Self, end: Self, t: f32) -> Self;

    /// 将未被 `mode` 选中的分量恢复为 `start` 的对应分量
    fn apply_mode(mode: Self::Mode, interpolated: Self, start: Self) -> Self;

    /// 是否在浮点容差内相等
    fn approx_eq(a: Self, b: Self) -> bool;

    /// 所有分量是否都是有限值
    fn is_finite(self) -> bool;
}

impl Tweenable for f32 {
    type Mode = ();

    fn lerp(start: Self, end: Self, t: f32) -> Self {
        lerp(start, end, t)
    }

    fn apply_mode(_mode: (), interpolated: Self, _start: Self) -> Self {
        interpolated
    }

    fn approx_eq(a: Self, b: Self) -> bool {
        approximately(a, b)
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

/// 三维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// 分量相加
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// 替换 x 分量
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// 替换 y 分量
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// 替换 z 分量
    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }
}

impl From<(f32, f32, f32)> for Vec3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

/// 二维向量
///
/// 2D 辅助函数使用，扩展为 [`Vec3`] 时 z 取当前位置的 z。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 以给定 z 扩展为三维向量
    pub fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

/// 向量补间模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VectorTweenMode {
    /// 全部分量
    #[default]
    Xyz,
    Xy,
    Xz,
    Yz,
    X,
    Y,
    Z,
}

impl VectorTweenMode {
    /// 返回 (x, y, z) 是否参与插值
    fn channels(self) -> (bool, bool, bool) {
        match self {
            Self::Xyz => (true, true, true),
            Self::Xy => (true, true, false),
            Self::Xz => (true, false, true),
            Self::Yz => (false, true, true),
            Self::X => (true, false, false),
            Self::Y => (false, true, false),
            Self::Z => (false, false, true),
        }
    }
}

impl Tweenable for Vec3 {
    type Mode = VectorTweenMode;

    fn lerp(start: Self, end: Self, t: f32) -> Self {
        Self {
            x: lerp(start.x, end.x, t),
            y: lerp(start.y, end.y, t),
            z: lerp(start.z, end.z, t),
        }
    }

    fn apply_mode(mode: VectorTweenMode, interpolated: Self, start: Self) -> Self {
        let (x, y, z) = mode.channels();
        Self {
            x: if x { interpolated.x } else { start.x },
            y: if y { interpolated.y } else { start.y },
            z: if z { interpolated.z } else { start.z },
        }
    }

    fn approx_eq(a: Self, b: Self) -> bool {
        approximately(a.x, b.x) && approximately(a.y, b.y) && approximately(a.z, b.z)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// RGBA 颜色（各分量 0.0 - 1.0）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// 创建颜色
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建不透明颜色
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// 替换 alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// 颜色补间模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorTweenMode {
    /// RGBA 全部
    #[default]
    All,
    /// 只插值 RGB，alpha 保持起始值
    Rgb,
    /// 只插值 alpha，RGB 保持起始值
    Alpha,
}

impl Tweenable for Color {
    type Mode = ColorTweenMode;

    fn lerp(start: Self, end: Self, t: f32) -> Self {
        Self {
            r: lerp(start.r, end.r, t),
            g: lerp(start.g, end.g, t),
            b: lerp(start.b, end.b, t),
            a: lerp(start.a, end.a, t),
        }
    }

    fn apply_mode(mode: ColorTweenMode, interpolated: Self, start: Self) -> Self {
        match mode {
            ColorTweenMode::All => interpolated,
            ColorTweenMode::Rgb => interpolated.with_alpha(start.a),
            ColorTweenMode::Alpha => start.with_alpha(interpolated.a),
        }
    }

    fn approx_eq(a: Self, b: Self) -> bool {
        approximately(a.r, b.r)
            && approximately(a.g, b.g)
            && approximately(a.b, b.b)
            && approximately(a.a, b.a)
    }

    fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}
