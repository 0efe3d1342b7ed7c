//! # Easing 模块
//!
//! 缓动函数库，用于动画的时间插值。

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EasingKind {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 三次缓出
    EaseOutCubic,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// 指数缓出
    EaseOutExpo,
    /// 指数缓入缓出
    EaseInOutExpo,
}

impl EasingKind {
    /// 由配置串解析缓动名，未识别时回退线性
    pub fn parse_or_linear(name: &str) -> Self {
        match name {
            "linear" => Self::Linear,
            "easeInQuad" => Self::EaseInQuad,
            "easeOutQuad" => Self::EaseOutQuad,
            "easeInOutQuad" => Self::EaseInOutQuad,
            "easeOutCubic" => Self::EaseOutCubic,
            "easeInOutSine" => Self::EaseInOutSine,
            "easeOutExpo" => Self::EaseOutExpo,
            "easeInOutExpo" => Self::EaseInOutExpo,
            _ => Self::Linear,
        }
    }

    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingKind::Linear => t,
            EasingKind::EaseInQuad => t * t,
            EasingKind::EaseOutQuad => t * (2.0 - t),
            EasingKind::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingKind::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingKind::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingKind::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            EasingKind::EaseInOutExpo => ease_in_out_expo(t),
        }
    }
}

/// 指数缓入缓出
fn ease_in_out_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2.0_f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = EasingKind::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_clamp() {
        let easing = EasingKind::Linear;
        // 超出范围应该被限制
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_ease_out_quad_endpoints() {
        let easing = EasingKind::EaseOutQuad;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        // 缓出：前半程快于线性
        assert!(easing.apply(0.25) > 0.25);
    }

    #[test]
    fn test_ease_in_out_expo_endpoints() {
        let easing = EasingKind::EaseInOutExpo;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        let mid = easing.apply(0.5);
        assert!((mid - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_parse_or_linear() {
        assert_eq!(EasingKind::parse_or_linear("easeOutQuad"), EasingKind::EaseOutQuad);
        assert_eq!(EasingKind::parse_or_linear("nope"), EasingKind::Linear);
    }
}
