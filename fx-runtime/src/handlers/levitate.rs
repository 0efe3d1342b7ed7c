//! 悬浮处理器（占位）。
//!
//! 效果本体尚未定稿，目前只在进入时写一个肉眼可见的标记样式，
//! 方便在真实页面上确认触发路径。

use crate::command::Command;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;

/// 悬浮
pub struct LevitateHandler;

impl EffectHandler for LevitateHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        if action == Action::Enter {
            cx.emit(Command::ApplyStyle {
                id,
                property: "background-color".to_string(),
                value: "red".to_string(),
            });
        }
    }
}
