//! # Timeline 模块
//!
//! 多步动画时间轴：有序的步骤组按各自时长依次生效。
//!
//! ## 设计说明
//!
//! - 时间轴在元素首次需要时**惰性构建一次**并缓存，之后只复用
//! - `pause` 不重置位置，恢复播放从暂停处继续
//! - 步骤激活时一次性产出该组属性，由引擎转成样式指令

use serde::{Deserialize, Serialize};

use crate::config::SequenceStep;

/// 时间轴状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimelineState {
    /// 构建完成，尚未播放
    #[default]
    Idle,
    /// 正在播放
    Playing,
    /// 已暂停
    Paused,
    /// 已完成
    Completed,
}

/// 单次推进的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineUpdate {
    /// 本次新生效的属性
    pub applied: Vec<(String, String)>,
    /// 本次推进中自然完成
    pub completed: bool,
}

/// 多步动画时间轴
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    steps: Vec<SequenceStep>,
    state: TimelineState,
    /// 当前步骤索引
    current: usize,
    /// 当前步骤内已经过时间（毫秒）
    elapsed_in_step: f32,
    /// 当前步骤的属性是否已产出
    step_emitted: bool,
}

impl Timeline {
    /// 由步骤组构建时间轴
    pub fn new(steps: Vec<SequenceStep>) -> Self {
        let state = if steps.is_empty() {
            TimelineState::Completed
        } else {
            TimelineState::Idle
        };
        Self {
            steps,
            state,
            current: 0,
            elapsed_in_step: 0.0,
            step_emitted: false,
        }
    }

    /// 当前状态
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// 步骤数量
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 当前步骤索引
    pub fn current_step(&self) -> usize {
        self.current
    }

    /// 播放：首次启动或从暂停处恢复
    pub fn play(&mut self) {
        match self.state {
            TimelineState::Idle | TimelineState::Paused => self.state = TimelineState::Playing,
            TimelineState::Playing | TimelineState::Completed => {}
        }
    }

    /// 暂停（保留位置，不重置）
    pub fn pause(&mut self) {
        if self.state == TimelineState::Playing {
            self.state = TimelineState::Paused;
        }
    }

    /// 是否仍需逐帧推进
    pub fn is_active(&self) -> bool {
        self.state == TimelineState::Playing
    }

    /// 推进时间轴
    pub fn update(&mut self, dt_ms: f32) -> TimelineUpdate {
        let mut result = TimelineUpdate::default();
        if self.state != TimelineState::Playing {
            return result;
        }

        // 新进入的步骤先产出属性
        if !self.step_emitted {
            result.applied.extend(self.steps[self.current].props.iter().cloned());
            self.step_emitted = true;
        }

        self.elapsed_in_step += dt_ms;

        // 跨过所有已结束的步骤（一次 dt 可能覆盖多个短步骤）
        while self.elapsed_in_step >= self.steps[self.current].duration_ms() {
            self.elapsed_in_step -= self.steps[self.current].duration_ms();
            if self.current + 1 >= self.steps.len() {
                self.state = TimelineState::Completed;
                result.completed = true;
                return result;
            }
            self.current += 1;
            result.applied.extend(self.steps[self.current].props.iter().cloned());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{build_steps, parse_sequence};

    fn timeline(raw: &str) -> Timeline {
        Timeline::new(build_steps(&parse_sequence(raw)))
    }

    #[test]
    fn test_timeline_steps_in_order() {
        let mut tl = timeline("duration:100;opacity:0;duration:200;opacity:1");
        tl.play();

        // 第一步立即生效
        let u = tl.update(50.0);
        assert_eq!(u.applied, vec![("opacity".to_string(), "0".to_string())]);
        assert!(!u.completed);

        // 跨过第一步边界，第二步生效
        let u = tl.update(100.0);
        assert_eq!(u.applied, vec![("opacity".to_string(), "1".to_string())]);

        // 第二步结束即完成
        let u = tl.update(200.0);
        assert!(u.completed);
        assert_eq!(tl.state(), TimelineState::Completed);
    }

    #[test]
    fn test_timeline_pause_preserves_position() {
        let mut tl = timeline("duration:100;opacity:0;duration:100;opacity:1");
        tl.play();
        tl.update(60.0);
        tl.pause();

        // 暂停期间不推进、不产出
        let u = tl.update(500.0);
        assert!(u.applied.is_empty());
        assert_eq!(tl.current_step(), 0);

        // 恢复后从暂停处继续
        tl.play();
        let u = tl.update(50.0);
        assert_eq!(u.applied, vec![("opacity".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_timeline_completed_play_is_noop() {
        let mut tl = timeline("duration:10;opacity:1");
        tl.play();
        assert!(tl.update(20.0).completed);

        tl.play();
        assert_eq!(tl.state(), TimelineState::Completed);
        assert!(tl.update(20.0).applied.is_empty());
    }

    #[test]
    fn test_empty_timeline() {
        let tl = Timeline::new(Vec::new());
        assert_eq!(tl.state(), TimelineState::Completed);
    }
}
