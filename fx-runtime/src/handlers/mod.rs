//! # Handlers 模块
//!
//! 每种效果一个处理器。
//!
//! 处理器本身无状态（逐元素状态挂在 [`crate::element::EffectState`] 上），
//! 以 trait 对象注册到 [`HandlerRegistry`]，分发器按效果类型路由：
//!
//! - `on_transition`：观察器判定出的进入/离开/仍可见过渡
//! - `on_poll`：边界轮询链的一步（仅带限效果实现）
//! - `on_pointer` / `on_wheel`：Host 转发的交互输入（仅视频刷播类实现）

use std::collections::HashMap;

use crate::config::EffectKind;
use crate::element::{Action, ElementId};
use crate::runtime::context::EffectCx;

mod animate;
mod counter;
mod jacker;
mod levitate;
mod parallax;
mod sequence;
mod stagger;
mod svg_path;
mod video;

pub(crate) use jacker::SCROLLED_CLASS;

pub use animate::AnimationHandler;
pub use counter::CounterHandler;
pub use jacker::ScreenJackerHandler;
pub use levitate::LevitateHandler;
pub use parallax::ParallaxHandler;
pub use sequence::SequenceHandler;
pub use stagger::TextStaggerHandler;
pub use svg_path::SvgPathHandler;
pub use video::{Video360Handler, VideoFocusPlayHandler, VideoParallaxHandler, VideoScrollHandler};

/// 效果处理器
pub trait EffectHandler {
    /// 处理一次可见性过渡
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action);

    /// 处理轮询链的一步（链上携带的待定动作已由链自身维护）
    fn on_poll(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let _ = (cx, id, action);
    }

    /// 处理指针横向移动
    fn on_pointer(&mut self, cx: &mut EffectCx<'_>, id: ElementId, x: f32) {
        let _ = (cx, id, x);
    }

    /// 处理滚轮输入
    fn on_wheel(&mut self, cx: &mut EffectCx<'_>, id: ElementId, delta_y: f32) {
        let _ = (cx, id, delta_y);
    }
}

/// 处理器注册表
///
/// 效果类型 -> 处理器实例。未注册的类型由分发器记日志后跳过。
pub struct HandlerRegistry {
    handlers: HashMap<EffectKind, Box<dyn EffectHandler>>,
}

impl HandlerRegistry {
    /// 标准注册表：全部内建效果
    pub fn standard() -> Self {
        let mut handlers: HashMap<EffectKind, Box<dyn EffectHandler>> = HashMap::new();
        handlers.insert(EffectKind::Parallax, Box::new(ParallaxHandler));
        handlers.insert(EffectKind::Animation, Box::new(AnimationHandler));
        handlers.insert(EffectKind::Sequence, Box::new(SequenceHandler));
        handlers.insert(EffectKind::SvgPath, Box::new(SvgPathHandler));
        handlers.insert(EffectKind::Counter, Box::new(CounterHandler));
        handlers.insert(EffectKind::ScreenJacker, Box::new(ScreenJackerHandler));
        handlers.insert(EffectKind::VideoFocusPlay, Box::new(VideoFocusPlayHandler));
        handlers.insert(EffectKind::VideoParallax, Box::new(VideoParallaxHandler));
        handlers.insert(EffectKind::VideoScroll, Box::new(VideoScrollHandler));
        handlers.insert(EffectKind::Video360, Box::new(Video360Handler));
        handlers.insert(EffectKind::Levitate, Box::new(LevitateHandler));
        handlers.insert(EffectKind::TextStagger, Box::new(TextStaggerHandler));
        Self { handlers }
    }

    /// 按效果类型取处理器
    pub fn get_mut(&mut self, kind: &EffectKind) -> Option<&mut dyn EffectHandler> {
        match self.handlers.get_mut(kind) {
            Some(handler) => Some(handler.as_mut()),
            None => None,
        }
    }
}
