//! 数字计数器处理器。
//!
//! 首次进入时把元素文本解析为目标整数，从 0 补间到目标。
//! 补间由帧循环推进并逐帧写回文本，结束时写入精确目标值，
//! 不带任何缓动残差。计数中的重复进入被幂等标记挡掉。

use tracing::warn;

use crate::animation::{EasingKind, Tween};
use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;

/// 数字计数器
pub struct CounterHandler;

impl EffectHandler for CounterHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        if action != Action::Enter {
            return;
        }
        let Some(el) = cx.elements.get_mut(id) else { return };
        if el.fx.counted {
            return;
        }
        let target = match el.node.text.as_deref().map(str::trim) {
            Some(text) => text.parse::<i64>().unwrap_or_else(|_| {
                warn!("元素 {id} 的计数目标 {text:?} 不是整数，回退为 {}", defaults::COUNTER_FALLBACK);
                defaults::COUNTER_FALLBACK
            }),
            None => defaults::COUNTER_FALLBACK,
        };
        let duration = el.options.get_f32("duration", defaults::COUNTER_DURATION);
        el.fx.count_target = target;
        el.fx.counting = Some(Tween::new(0.0, target as f32, duration, EasingKind::EaseOutQuad));
        el.fx.counted = true;
    }
}
