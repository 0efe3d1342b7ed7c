//! # SvgDraw 模块
//!
//! SVG 描边绘制动画：跨全部 path 子节点的前向绘制，
//! 各 path 的启动按索引成比例错开。
//!
//! ## 设计说明
//!
//! 每个元素维护**一个可变、可复用**的实例，而不是每次过渡重建：
//! 离开时已启动的实例**原地反转**，只有在尚无实例时才构建新的反向实例。
//! 引擎无法得知真实路径长度，因此产出的是每条 path 的归一化进度，
//! 由 Host 折算为 `stroke-dashoffset`。

use serde::{Deserialize, Serialize};

/// 描边方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawDirection {
    /// 正向绘制
    Forward,
    /// 反向擦除
    Reverse,
}

/// 单次推进的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgUpdate {
    /// 各 path 的归一化进度（与 path 索引一一对应）
    pub progress: Vec<f32>,
    /// 本次推进中完成
    pub completed: bool,
    /// 完成时的方向为反向（离开驱动）
    pub completed_reversed: bool,
}

/// SVG 描边动画实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgDraw {
    /// 单条 path 的绘制时长（毫秒）
    duration_ms: f32,
    /// path 数量
    path_count: usize,
    /// 主时间轴位置（0 .. span）
    position: f32,
    /// 当前方向
    direction: DrawDirection,
    /// 是否仍在推进
    playing: bool,
}

impl SvgDraw {
    /// 创建描边动画
    pub fn new(duration_ms: f32, path_count: usize, direction: DrawDirection) -> Self {
        let duration_ms = duration_ms.max(1.0);
        let span = Self::span_of(duration_ms, path_count);
        Self {
            duration_ms,
            path_count,
            position: match direction {
                DrawDirection::Forward => 0.0,
                DrawDirection::Reverse => span,
            },
            direction,
            playing: path_count > 0,
        }
    }

    fn span_of(duration_ms: f32, path_count: usize) -> f32 {
        if path_count == 0 {
            return 0.0;
        }
        // 末条 path 的错开延迟 + 单条时长
        duration_ms + Self::delay_of(duration_ms, path_count, path_count - 1)
    }

    fn delay_of(duration_ms: f32, path_count: usize, index: usize) -> f32 {
        index as f32 * duration_ms / path_count as f32
    }

    /// 总时长（含错开）
    pub fn span(&self) -> f32 {
        Self::span_of(self.duration_ms, self.path_count)
    }

    /// 是否已经开始推进过
    pub fn started(&self) -> bool {
        self.position > 0.0
    }

    /// 是否仍在推进
    pub fn is_active(&self) -> bool {
        self.playing
    }

    /// 当前方向
    pub fn direction(&self) -> DrawDirection {
        self.direction
    }

    /// 原地反转方向，保留当前位置
    pub fn reverse(&mut self) {
        self.direction = match self.direction {
            DrawDirection::Forward => DrawDirection::Reverse,
            DrawDirection::Reverse => DrawDirection::Forward,
        };
        self.playing = self.path_count > 0;
    }

    /// 推进动画
    pub fn update(&mut self, dt_ms: f32) -> SvgUpdate {
        let mut result = SvgUpdate::default();
        if !self.playing {
            return result;
        }

        let span = self.span();
        match self.direction {
            DrawDirection::Forward => {
                self.position = (self.position + dt_ms).min(span);
                if self.position >= span {
                    self.playing = false;
                    result.completed = true;
                }
            }
            DrawDirection::Reverse => {
                self.position = (self.position - dt_ms).max(0.0);
                if self.position <= 0.0 {
                    self.playing = false;
                    result.completed = true;
                    result.completed_reversed = true;
                }
            }
        }

        result.progress = (0..self.path_count)
            .map(|i| {
                let delay = Self::delay_of(self.duration_ms, self.path_count, i);
                ((self.position - delay) / self.duration_ms).clamp(0.0, 1.0)
            })
            .collect();
        result
    }
}
