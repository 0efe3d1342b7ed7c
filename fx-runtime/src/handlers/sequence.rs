//! 多步序列处理器。
//!
//! 序列串首次需要时构建为时间轴并缓存在元素上，整个生命周期
//! 只构建一次。进入触发带播放、离开触发带暂停（位置保留），
//! 播放期间元素置锁、忽略交叉事件，由帧循环推进时间轴。
//! 完成后清除可见与锁定标记；`reiterate:false` 时不再武装。

use crate::animation::Timeline;
use crate::config::{self, defaults};
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;
use crate::runtime::poller;

/// 多步序列
pub struct SequenceHandler;

impl SequenceHandler {
    fn step(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let scroll = cx.viewport.last_scroll_offset;
        {
            // 惰性构建，最多一次
            let Some(el) = cx.elements.get_mut(id) else { return };
            if el.fx.timeline.is_none() {
                if let Some(raw) = el.node.sequence.clone() {
                    let steps = config::build_steps(&config::parse_sequence(&raw));
                    if !steps.is_empty() {
                        el.fx.timeline = Some(Timeline::new(steps));
                    }
                }
            }
            if el.fx.timeline.is_none() {
                // 没有可播放的序列，链没有意义
                el.fx.poll_active = false;
                return;
            }
        }

        let Some(el) = cx.elements.get_mut(id) else { return };
        let rect = el.rect(scroll);
        let in_band = cx.viewport.between(&rect, defaults::SEQUENCE_POSITION);
        let mut next = action;
        match action {
            Action::Enter if in_band => {
                if let Some(tl) = &mut el.fx.timeline {
                    tl.play();
                }
                el.locked = true;
                next = Action::Leave;
            }
            Action::Leave if !in_band => {
                if let Some(tl) = &mut el.fx.timeline {
                    tl.pause();
                }
                // 暂停态解锁，离开视口后还能重新进入续播
                el.locked = false;
                next = Action::Enter;
            }
            _ => {}
        }
        poller::continue_chain(cx, id, next);
    }
}

impl EffectHandler for SequenceHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        if action == Action::InViewport || !poller::try_begin(cx, id) {
            return;
        }
        self.step(cx, id, action);
    }

    fn on_poll(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        self.step(cx, id, action);
    }
}
