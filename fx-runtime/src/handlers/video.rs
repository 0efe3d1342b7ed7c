//! 视频类处理器。
//!
//! 四种视频效果共用“元素必须有 `<video>` 后代”这一前提，
//! 缺失时记日志并保持惰性。播放进度的逐帧映射（video-parallax）
//! 在帧循环里，这里维护成员资格与输入绑定。

use tracing::warn;

use crate::command::Command;
use crate::config::defaults;
use crate::element::{Action, ElementId, ObservedElement};
use crate::handlers::EffectHandler;
use crate::runtime::context::EffectCx;
use crate::runtime::scheduler::VideoMember;

fn require_video<'a>(el: &'a ObservedElement) -> Option<&'a ObservedElement> {
    if el.has_video() {
        Some(el)
    } else {
        warn!("元素 {} 标记了视频效果但没有 <video> 后代", el.id);
        None
    }
}

/// 可见即播放
pub struct VideoFocusPlayHandler;

impl EffectHandler for VideoFocusPlayHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, _action: Action) {
        let Some(el) = cx.elements.get_mut(id) else { return };
        if !el.has_video() {
            warn!("元素 {id} 标记了视频效果但没有 <video> 后代");
            return;
        }
        if el.visible {
            cx.out.push(Command::PlayVideo { id });
        } else if el.fx.video_ended {
            // 播完后离开：归零而不是停在结尾
            el.fx.video_ended = false;
            cx.out.push(Command::StopVideo { id });
        } else {
            cx.out.push(Command::PauseVideo { id });
        }
    }
}

/// 滚动位置映射播放进度
pub struct VideoParallaxHandler;

impl EffectHandler for VideoParallaxHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        if action == Action::Leave {
            cx.groups.remove_video(id);
            return;
        }
        let Some(el) = cx.elements.get(id) else { return };
        let Some(el) = require_video(el) else { return };
        cx.groups
            .insert_video(id, VideoMember { duration: el.video_duration() });
    }
}

/// 滚轮逐帧刷播
pub struct VideoScrollHandler;

impl EffectHandler for VideoScrollHandler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let Some(el) = cx.elements.get_mut(id) else { return };
        match action {
            Action::Enter if !el.fx.wheel_bound => {
                if !el.has_video() {
                    warn!("元素 {id} 标记了视频效果但没有 <video> 后代");
                    return;
                }
                el.fx.wheel_bound = true;
                el.fx.video_time = 0.0;
                cx.out.push(Command::PrepareVideoScrub { id });
                cx.out.push(Command::BindWheel { id });
            }
            Action::Leave if el.fx.wheel_bound => {
                el.fx.wheel_bound = false;
                cx.out.push(Command::UnbindWheel { id });
            }
            _ => {}
        }
    }

    fn on_wheel(&mut self, cx: &mut EffectCx<'_>, id: ElementId, delta_y: f32) {
        let Some(el) = cx.elements.get_mut(id) else { return };
        if !el.fx.wheel_bound {
            return;
        }
        let duration = el.video_duration();
        let step = if delta_y > 0.0 {
            defaults::WHEEL_FRAME_STEP
        } else {
            -defaults::WHEEL_FRAME_STEP
        };
        let next = el.fx.video_time + step;
        if next < 0.0 || next > duration {
            // 刷到头，交还滚轮给页面
            el.fx.video_time = next.clamp(0.0, duration);
            el.fx.wheel_bound = false;
            cx.out.push(Command::UnbindWheel { id });
            return;
        }
        el.fx.video_time = next;
        cx.out.push(Command::SetVideoTime { id, seconds: next });
    }
}

/// 指针横向位置映射播放进度（360 度查看）
pub struct Video360Handler;

impl EffectHandler for Video360Handler {
    fn on_transition(&mut self, cx: &mut EffectCx<'_>, id: ElementId, action: Action) {
        let Some(el) = cx.elements.get_mut(id) else { return };
        match action {
            Action::Enter if !el.fx.pointer_bound => {
                if !el.has_video() {
                    warn!("元素 {id} 标记了视频效果但没有 <video> 后代");
                    return;
                }
                el.fx.pointer_bound = true;
                cx.out.push(Command::PrepareVideoScrub { id });
                cx.out.push(Command::BindPointer { id });
            }
            Action::Leave if el.fx.pointer_bound => {
                el.fx.pointer_bound = false;
                cx.out.push(Command::UnbindPointer { id });
            }
            _ => {}
        }
    }

    fn on_pointer(&mut self, cx: &mut EffectCx<'_>, id: ElementId, x: f32) {
        let Some(el) = cx.elements.get(id) else { return };
        if !el.fx.pointer_bound {
            return;
        }
        let width = el.node.geometry.width.max(1.0);
        let progress = ((x - el.node.geometry.offset_left) / width).clamp(0.0, 1.0);
        let seconds = (progress * el.video_duration() * 100.0).round() / 100.0;
        cx.emit(Command::SetVideoTime { id, seconds });
    }
}
