//! 滚动劫持处理器。
//!
//! 元素边缘进入视口且尚未对齐触发带时申请滚动锁，接管滚动
//! 把文档补间到元素顶边。锁的互斥与冷却在 [`crate::runtime::lock`]，
//! 补间由帧循环推进。被拒绝的申请不产生任何指令。

use crate::animation::EasingKind;
use crate::command::Command;
use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;
use crate::runtime::timers::TimerPurpose;

/// 最近一次接管的元素标记 class
pub(crate) const SCROLLED_CLASS: &str = "fx-last-scrolled";

/// 离开后撤销标记的延迟（毫秒）
const UNFLAG_DELAY: u64 = 500;

/// 滚动劫持
pub struct ScreenJackerHandler;

impl EffectHandler for ScreenJackerHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let scroll = cx.viewport.last_scroll_offset;
        let (rect, target, duration, band, easing, pinned) = {
            let Some(el) = cx.elements.get(id) else { return };
            (
                el.rect(scroll),
                el.node.geometry.offset_top,
                el.options.get_f32("duration", defaults::JACKER_DURATION),
                el.options.get_f32("intersection", defaults::JACKER_INTERSECTION),
                EasingKind::parse_or_linear(el.options.get_or("easing", "linear")),
                el.fx.pinned,
            )
        };

        if !pinned {
            cx.emit(Command::PinFullHeight { id });
            if let Some(el) = cx.elements.get_mut(id) {
                el.fx.pinned = true;
            }
        }

        if action == Action::Leave {
            cx.timers
                .schedule(TimerPurpose::UnflagScrolled { id }, UNFLAG_DELAY, cx.out);
            return;
        }

        // 已对齐触发带的元素不再接管
        if !cx.viewport.partially_visible(&rect) || cx.viewport.between(&rect, band) {
            return;
        }
        if cx.lock.claim(id, scroll, target, duration, easing, cx.now_ms) {
            cx.emit(Command::AddClass { id, class: SCROLLED_CLASS.to_string() });
            cx.emit(Command::LockWheel);
        }
    }
}
