//! # Viewport 模块
//!
//! 视口状态的进程级读模型与可见性谓词。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，不允许隐式全局状态
//! - 几何全部是纯数据：元素携带文档坐标，视口坐标由当前滚动偏移推导
//!
//! 可见性分为四级谓词：部分可见、完全可见、跨越某条百分比线、
//! 中心落在百分比带内。后两者是边界轮询（Boundary Poll）的判定基础，
//! 用来弥补粗粒度交叉信号只在视口边缘触发的不足。

use serde::{Deserialize, Serialize};

/// 滚动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    /// 向上
    Up,
    /// 向下
    Down,
}

/// 视口状态
///
/// 单实例由引擎持有，在每个交叉批次处理完成后与（防抖后的）
/// 尺寸变化时更新。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// 视口高度（像素）
    pub view_height: f32,
    /// 上一次记录的滚动偏移
    pub last_scroll_offset: f32,
    /// 最近一次判定的滚动方向
    pub direction: Option<ScrollDirection>,
}

impl ViewportState {
    /// 创建视口状态
    pub fn new(view_height: f32) -> Self {
        Self {
            view_height,
            last_scroll_offset: 0.0,
            direction: None,
        }
    }

    /// 根据新的滚动偏移推导方向
    ///
    /// 偏移不变时保持原方向。
    pub fn direction_towards(&self, scroll_offset: f32) -> Option<ScrollDirection> {
        if self.last_scroll_offset < scroll_offset {
            Some(ScrollDirection::Down)
        } else if self.last_scroll_offset > scroll_offset {
            Some(ScrollDirection::Up)
        } else {
            self.direction
        }
    }
}

/// 视口坐标下的矩形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// 上边（相对视口顶部）
    pub top: f32,
    /// 高度
    pub height: f32,
    /// 左边
    pub left: f32,
    /// 宽度
    pub width: f32,
}

impl Rect {
    /// 下边
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// 垂直中心
    pub fn center_y(&self) -> f32 {
        self.top + self.height * 0.5
    }
}

impl ViewportState {
    /// 元素是否部分可见（任一部分落在视口内）
    pub fn partially_visible(&self, rect: &Rect) -> bool {
        rect.top < self.view_height && rect.bottom() > 0.0
    }

    /// 元素是否完全可见
    pub fn fully_visible(&self, rect: &Rect) -> bool {
        rect.top >= 0.0 && rect.bottom() <= self.view_height
    }

    /// 元素是否跨越视口的某条百分比线
    ///
    /// `position` 以视口高度的百分比给出（如 50 表示中线）。
    pub fn crossing(&self, rect: &Rect, position: f32) -> bool {
        let line = self.view_height * (position * 0.01);
        rect.top < line && rect.bottom() > line
    }

    /// 元素中心是否落在百分比带内
    ///
    /// 带为 `[position*0.5% , 100% - position*0.5%]`：
    /// position 为 20 且视口 1000px 时，上下各留 100px。
    pub fn between(&self, rect: &Rect, position: f32) -> bool {
        let limit = self.view_height * (position * 0.005);
        let center = rect.center_y();
        center > limit && center < self.view_height - limit
    }
}
