//! class 切换动画处理器。
//!
//! 进入触发带时加动画 class，离开后撤销（或换成退出动画）。
//! 触发带判定走轮询链，动作在链上往复翻转。
//! class 语法沿用 animate.css：基础 class + `animate__<名称>`。

use crate::command::Command;
use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;
use crate::runtime::poller;

/// animate.css 的基础 class
const BASE_CLASS: &str = "animate__animated";

fn css_class(name: &str) -> String {
    format!("animate__{name}")
}

/// class 切换动画
pub struct AnimationHandler;

impl AnimationHandler {
    fn step(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let scroll = cx.viewport.last_scroll_offset;
        let (rect, band, enter, exit, reiterates) = {
            let Some(el) = cx.elements.get(id) else { return };
            (
                el.rect(scroll),
                el.options.get_f32("position", defaults::ANIMATION_POSITION),
                el.options
                    .get_or("animationEnter", defaults::ANIMATION_ENTER)
                    .to_string(),
                el.options.get("animationExit").map(str::to_string),
                el.reiterates(),
            )
        };

        let mut next = action;
        match action {
            Action::Enter if cx.viewport.between(&rect, band) => {
                if let Some(exit) = &exit {
                    cx.emit(Command::RemoveClass { id, class: css_class(exit) });
                }
                cx.emit(Command::AddClass { id, class: BASE_CLASS.to_string() });
                cx.emit(Command::AddClass { id, class: css_class(&enter) });
                if !reiterates {
                    if let Some(el) = cx.elements.get_mut(id) {
                        el.fx.done = true;
                    }
                }
                next = Action::Leave;
            }
            Action::Leave if !cx.viewport.between(&rect, band) => {
                cx.emit(Command::RemoveClass { id, class: css_class(&enter) });
                match &exit {
                    // 配置了退出动画则保留基础 class 播放退出
                    Some(exit) => cx.emit(Command::AddClass { id, class: css_class(exit) }),
                    None => cx.emit(Command::RemoveClass { id, class: BASE_CLASS.to_string() }),
                }
                next = Action::Enter;
            }
            _ => {}
        }
        poller::continue_chain(cx, id, next);
    }
}

impl EffectHandler for AnimationHandler {
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
