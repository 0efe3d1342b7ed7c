//! # Context 模块
//!
//! 效果处理器的执行上下文。
//!
//! 把运行时的各个状态份额以**不相交的可变借用**打包，处理器
//! 只通过它读写元素、视口、帧分组、滚动锁和定时器，并把产出的
//! 指令追加到同一个输出缓冲。

use crate::command::Command;
use crate::element::{ElementId, ObservedElement};
use crate::registry::ElementStore;
use crate::runtime::lock::ScrollLockState;
use crate::runtime::scheduler::FrameGroups;
use crate::runtime::timers::TimerRegistry;
use crate::viewport::{Rect, ViewportState};

/// 处理器执行上下文
///
/// 生存期只覆盖单次分发。
pub struct EffectCx<'a> {
    /// 元素注册表
    pub elements: &'a mut ElementStore,
    /// 视口状态
    pub viewport: &'a mut ViewportState,
    /// 帧分组
    pub groups: &'a mut FrameGroups,
    /// 滚动锁
    pub lock: &'a mut ScrollLockState,
    /// 定时器登记簿
    pub timers: &'a mut TimerRegistry,
    /// 指令输出缓冲
    pub out: &'a mut Vec<Command>,
    /// 当前运行时时钟（毫秒）
    pub now_ms: u64,
}

impl EffectCx<'_> {
    /// 元素在当前滚动偏移下的视口坐标矩形
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements
            .get(id)
            .map(|el| el.rect(self.viewport.last_scroll_offset))
    }

    /// 元素是否与视口部分相交
    pub fn partially_visible(&self, el: &ObservedElement) -> bool {
        let rect = el.rect(self.viewport.last_scroll_offset);
        self.viewport.partially_visible(&rect)
    }

    /// 追加一条指令
    pub fn emit(&mut self, command: Command) {
        self.out.push(command);
    }
}
