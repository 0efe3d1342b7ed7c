//! SVG 描边处理器。
//!
//! 首次接触时把元素隐藏并挂上过渡提示（避免未绘制的路径闪现）。
//! 进入触发带显形并正向描边，离开触发带就地反转把笔画擦回去。
//! 同一元素复用一个描边实例，反转保留当前进度。

use crate::animation::{DrawDirection, SvgDraw};
use crate::command::Command;
use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;
use crate::runtime::poller;

/// 显形/隐藏的过渡提示时长（毫秒）
const FADE_HINT_MS: u64 = 350;

/// SVG 描边
pub struct SvgPathHandler;

impl SvgPathHandler {
    fn step(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let scroll = cx.viewport.last_scroll_offset;
        let (rect, duration, paths, prepared) = {
            let Some(el) = cx.elements.get(id) else { return };
            (
                el.rect(scroll),
                el.options.get_f32("duration", defaults::SVG_DURATION),
                el.node.path_count,
                el.fx.svg_prepared,
            )
        };
        if !prepared {
            cx.emit(Command::SetOpacity { id, value: 0.0 });
            cx.emit(Command::SetTransitionHint { id, duration_ms: FADE_HINT_MS });
            if let Some(el) = cx.elements.get_mut(id) {
                el.fx.svg_prepared = true;
            }
        }

        let in_band = cx.viewport.between(&rect, defaults::SEQUENCE_POSITION);
        let mut next = action;
        match action {
            Action::Enter if in_band => {
                cx.emit(Command::SetOpacity { id, value: 1.0 });
                if let Some(el) = cx.elements.get_mut(id) {
                    match &mut el.fx.svg {
                        // 正在擦除：就地反转，从当前进度继续绘制
                        Some(draw) if draw.started() => {
                            if draw.direction() == DrawDirection::Reverse {
                                draw.reverse();
                            }
                        }
                        _ => {
                            el.fx.svg =
                                Some(SvgDraw::new(duration, paths, DrawDirection::Forward));
                        }
                    }
                }
                next = Action::Leave;
            }
            Action::Leave if !in_band => {
                if let Some(el) = cx.elements.get_mut(id) {
                    match &mut el.fx.svg {
                        Some(draw) if draw.started() => {
                            if draw.direction() == DrawDirection::Forward {
                                draw.reverse();
                            }
                        }
                        _ => {
                            el.fx.svg =
                                Some(SvgDraw::new(duration, paths, DrawDirection::Reverse));
                        }
                    }
                }
                next = Action::Enter;
            }
            _ => {}
        }
        poller::continue_chain(cx, id, next);
    }
}

impl EffectHandler for SvgPathHandler {
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
