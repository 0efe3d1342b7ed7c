//! # Poller 模块
//!
//! 边界轮询链。
//!
//! 等待带限可见性的效果（class 动画、序列、SVG 描边）不在每帧
//! 重查位置，而是走低频定时器链：每步重读几何，命中边界则执行
//! 动作并翻转链上的待定动作，元素仍与视口部分相交就预约下一步，
//! 完全离开视口时链自然断掉。
//!
//! ## 不变式
//!
//! 每元素同时最多一条在途链。新的过渡事件到达时若链已在途，
//! 直接忽略（链自己会读到最新几何）。到期回调先清 `poll_active`
//! 再进入处理器，处理器末尾的 [`continue_chain`] 才能重新预约。

use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::runtime::context::EffectCx;
use crate::runtime::timers::TimerPurpose;

/// 尝试开启一条新链
///
/// 已有在途链时返回 `false`，调用方应放弃本次过渡。
/// 返回 `true` 并不预约定时器——调用方先同步执行第一步，
/// 步末用 [`continue_chain`] 决定是否续链。
pub fn try_begin(cx: &mut EffectCx<'_>, id: ElementId) -> bool {
    match cx.elements.get(id) {
        Some(el) => !el.fx.poll_active && !el.fx.done,
        None => false,
    }
}

/// 步末续链
///
/// 元素仍与视口部分相交时置 `poll_active` 并预约下一步；
/// 否则确保标记清空，链到此为止。
pub fn continue_chain(cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
    let visible = {
        let Some(el) = cx.elements.get(id) else { return };
        !el.fx.done && cx.viewport.partially_visible(&el.rect(cx.viewport.last_scroll_offset))
    };
    let Some(el) = cx.elements.get_mut(id) else { return };
    if visible {
        el.fx.poll_active = true;
        cx.timers
            .schedule(TimerPurpose::Poll { id, action }, defaults::POLL_DELAY, cx.out);
    } else {
        el.fx.poll_active = false;
    }
}
