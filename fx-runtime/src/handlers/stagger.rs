//! 文字逐字错落处理器。
//!
//! 首次进入时让 Host 把文本拆成逐字母节点，然后启动循环的
//! 错落动画（帧循环逐帧写回每个字母的位移与透明度）。
//! 离开视口暂停、再进入续播，位置保留。

use tracing::warn;

use crate::animation::Stagger;
use crate::command::Command;
use crate::config::defaults;
use crate::element::{Action, ElementId};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;

/// 文字逐字错落
pub struct TextStaggerHandler;

impl EffectHandler for TextStaggerHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let Some(el) = cx.elements.get_mut(id) else { return };
        match action {
            Action::Enter | Action::InViewport => match &mut el.fx.stagger {
                Some(stagger) => stagger.resume(),
                None => {
                    let letters = el.node.letter_count();
                    if letters == 0 {
                        warn!("元素 {id} 没有可错落的文本");
                        return;
                    }
                    let duration = el.options.get_f32("duration", defaults::STAGGER_DURATION);
                    el.fx.stagger = Some(Stagger::new(letters, duration));
                    cx.out.push(Command::WrapLetters { id });
                }
            },
            Action::Leave => {
                if let Some(stagger) = &mut el.fx.stagger {
                    stagger.pause();
                }
            }
        }
    }
}
