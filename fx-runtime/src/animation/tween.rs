//! # Tween 模块
//!
//! 通用补间实例定义。
//!
//! 核心设计：补间只关注 f32 值的时间轴变化，不假设被驱动的对象类型。
//! 计数器、滚动劫持等都复用同一个实例类型。

use serde::{Deserialize, Serialize};

use super::EasingKind;

/// 补间状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TweenState {
    /// 正在播放
    #[default]
    Playing,
    /// 已暂停
    Paused,
    /// 已完成
    Completed,
}

/// 通用补间实例
///
/// 管理单个 f32 值从 `from` 到 `to` 在 `duration_ms` 内的变化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 时长（毫秒）
    pub duration_ms: f32,
    /// 缓动函数
    pub easing: EasingKind,
    /// 当前状态
    pub state: TweenState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    pub progress: f32,
    /// 已经过时间（毫秒）
    elapsed: f32,
}

impl Tween {
    /// 创建新补间
    ///
    /// 时长非正时直接视为已完成。
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: EasingKind) -> Self {
        let state = if duration_ms <= 0.0 {
            TweenState::Completed
        } else {
            TweenState::Playing
        };
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            easing,
            state,
            progress: if state == TweenState::Completed { 1.0 } else { 0.0 },
            elapsed: 0.0,
        }
    }

    /// 推进补间
    ///
    /// # 返回
    /// - `true`: 补间仍在进行中
    /// - `false`: 补间已结束
    pub fn update(&mut self, dt_ms: f32) -> bool {
        match self.state {
            TweenState::Playing => {
                self.elapsed += dt_ms;
                let raw = self.elapsed / self.duration_ms;
                if raw >= 1.0 {
                    self.progress = 1.0;
                    self.state = TweenState::Completed;
                    false
                } else {
                    self.progress = self.easing.apply(raw);
                    true
                }
            }
            TweenState::Paused => true,
            TweenState::Completed => false,
        }
    }

    /// 暂停
    pub fn pause(&mut self) {
        if self.state == TweenState::Playing {
            self.state = TweenState::Paused;
        }
    }

    /// 恢复
    pub fn resume(&mut self) {
        if self.state == TweenState::Paused {
            self.state = TweenState::Playing;
        }
    }

    /// 当前值
    pub fn current_value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress
    }

    /// 最终值
    pub fn final_value(&self) -> f32 {
        self.to
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Completed
    }

    /// 是否仍需逐帧推进
    pub fn is_active(&self) -> bool {
        self.state == TweenState::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_update() {
        let mut tween = Tween::new(0.0, 100.0, 1000.0, EasingKind::Linear);

        assert!(tween.update(400.0));
        assert!((tween.current_value() - 40.0).abs() < 0.001);

        // 完成
        assert!(!tween.update(700.0));
        assert_eq!(tween.state, TweenState::Completed);
        assert_eq!(tween.current_value(), 100.0);
    }

    #[test]
    fn test_tween_pause_resume() {
        let mut tween = Tween::new(0.0, 1.0, 1000.0, EasingKind::Linear);
        tween.update(500.0);
        tween.pause();

        // 暂停期间推进不改变进度
        let before = tween.progress;
        assert!(tween.update(300.0));
        assert_eq!(tween.progress, before);

        tween.resume();
        assert!(!tween.update(600.0));
        assert_eq!(tween.progress, 1.0);
    }

    #[test]
    fn test_zero_duration() {
        let tween = Tween::new(0.0, 1.0, 0.0, EasingKind::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.current_value(), 1.0);
    }
}
