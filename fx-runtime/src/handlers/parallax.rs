//! 视差处理器。
//!
//! 位置计算在帧循环里（[`crate::runtime::scheduler`]），
//! 这里只负责按过渡事件维护分组成员资格。

use crate::command::Axis;
use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;
use crate::runtime::scheduler::ParallaxMember;

/// 视差
pub struct ParallaxHandler;

impl EffectHandler for ParallaxHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        if action == Action::Leave {
            cx.groups.remove_parallax(id);
            return;
        }
        let Some(el) = cx.elements.get(id) else { return };
        let axis = match el.options.get_or("direction", defaults::PARALLAX_DIRECTION) {
            "X" | "x" => Axis::X,
            _ => Axis::Y,
        };
        let member = ParallaxMember {
            axis,
            level: el.options.get_f32("level", defaults::PARALLAX_LEVEL),
            speed: el.options.get_f32("speed", defaults::PARALLAX_SPEED),
        };
        cx.groups.insert_parallax(id, member);
    }
}
