//! # Scheduler 模块
//!
//! 帧循环的位置型效果分组。
//!
//! 视差与视频视差不走轮询链，而是按帧重算：元素进入视口时
//! 加入对应分组，离开时移除。每一帧用**一次**滚动偏移读取
//! 驱动所有成员；偏移与上一帧相同则整帧跳过位置计算，只要
//! 仍有成员就继续请求下一帧。

use std::collections::BTreeMap;

use crate::command::{Axis, Command};
use crate::element::ElementId;
use crate::registry::ElementStore;
use crate::viewport::ViewportState;

/// 视差分组成员
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxMember {
    /// 位移轴
    pub axis: Axis,
    /// 幅度系数
    pub level: f32,
    /// 速度系数
    pub speed: f32,
}

/// 视频视差分组成员
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMember {
    /// 视频总时长（秒）
    pub duration: f32,
}

/// 帧分组
#[derive(Debug, Default)]
pub struct FrameGroups {
    parallax: BTreeMap<ElementId, ParallaxMember>,
    video: BTreeMap<ElementId, VideoMember>,
}

impl FrameGroups {
    /// 创建空分组
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入视差分组（重复加入覆盖参数）
    pub fn insert_parallax(&mut self, id: ElementId, member: ParallaxMember) {
        self.parallax.insert(id, member);
    }

    /// 移出视差分组
    pub fn remove_parallax(&mut self, id: ElementId) {
        self.parallax.remove(&id);
    }

    /// 加入视频视差分组
    pub fn insert_video(&mut self, id: ElementId, member: VideoMember) {
        self.video.insert(id, member);
    }

    /// 移出视频视差分组
    pub fn remove_video(&mut self, id: ElementId) {
        self.video.remove(&id);
    }

    /// 移出全部分组（元素注销或 teardown）
    pub fn remove(&mut self, id: ElementId) {
        self.parallax.remove(&id);
        self.video.remove(&id);
    }

    /// 清空分组
    pub fn clear(&mut self) {
        self.parallax.clear();
        self.video.clear();
    }

    /// 两个分组是否都为空
    pub fn is_empty(&self) -> bool {
        self.parallax.is_empty() && self.video.is_empty()
    }

    /// 推进一帧
    ///
    /// 返回是否还需要下一帧。偏移与上一帧相同则不产生任何
    /// 位置指令，但分组非空时仍返回 `true` 维持循环。
    pub fn step(
        &mut self,
        elements: &ElementStore,
        viewport: &mut ViewportState,
        scroll_offset: f32,
        out: &mut Vec<Command>,
    ) -> bool {
        if self.is_empty() {
            return false;
        }
        if scroll_offset == viewport.last_scroll_offset {
            return true;
        }

        for (&id, member) in &self.parallax {
            let Some(el) = elements.get(id) else { continue };
            let rect = el.rect(scroll_offset);
            // 元素顶边越过视口底边后才开始位移
            let travelled = viewport.view_height - rect.top;
            if travelled > 0.0 {
                let offset_px = member.speed * member.level * travelled * -0.2;
                out.push(Command::SetTransform {
                    id,
                    axis: member.axis,
                    offset_px,
                });
            }
        }

        for (&id, member) in &self.video {
            let Some(el) = elements.get(id) else { continue };
            let rect = el.rect(scroll_offset);
            // 元素穿越两倍视口高度的行程映射到 [0, duration]
            let progress =
                1.0 - (rect.top + viewport.view_height) / (viewport.view_height * 2.0);
            let seconds = (progress * member.duration).clamp(0.0, member.duration);
            let seconds = (seconds * 100.0).round() / 100.0;
            out.push(Command::SetVideoTime { id, seconds });
        }

        viewport.last_scroll_offset = scroll_offset;
        true
    }
}
