//! # Element 模块
//!
//! 被观察元素及其运行时状态。
//!
//! ## 生命周期
//!
//! 元素在初始扫描或变更监视报告新子树时创建，
//! 在节点的文档生命周期内**不会销毁**；随效果启停变化的只有
//! 它在视差/视频组中的成员关系与瞬态标记。

use serde::{Deserialize, Serialize};

use crate::animation::{Stagger, SvgDraw, Timeline, Tween};
use crate::config::{self, EffectConfig, EffectKind};
use crate::input::NodeDescriptor;
use crate::viewport::{Rect, ScrollDirection};

/// 元素 ID
///
/// 注册时一次性分配的连续序号，在节点的文档生命周期内有效。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fx-{}", self.0)
    }
}

/// 可见性过渡动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// 从隐藏变为相交
    Enter,
    /// 从相交变为不相交
    Leave,
    /// 相交状态未变（仅做“仍可见”级别的维护）
    InViewport,
}

/// 效果相关的运行时状态
///
/// 全部是瞬态标记与缓存的动画实例，从不持久化。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    /// 缓存的序列时间轴（整个生命周期最多构建一次）
    pub timeline: Option<Timeline>,
    /// 可复用的 SVG 描边实例
    pub svg: Option<SvgDraw>,
    /// SVG 初始不可见准备是否已完成
    pub svg_prepared: bool,
    /// 循环的逐字错落实例
    pub stagger: Option<Stagger>,
    /// 计数器补间
    pub counting: Option<Tween>,
    /// 计数器目标值
    pub count_target: i64,
    /// “已在计数”幂等标记
    pub counted: bool,
    /// 刷播类效果跟踪的当前播放位置（秒）
    pub video_time: f32,
    /// Host 报告的“视频已播完”标记
    pub video_ended: bool,
    /// 指针移动是否已绑定
    pub pointer_bound: bool,
    /// 滚轮是否已绑定
    pub wheel_bound: bool,
    /// 是否已钉为整屏高度
    pub pinned: bool,
    /// 是否存在进行中的轮询链（单链不变式）
    pub poll_active: bool,
    /// 完成且不再重新武装
    pub done: bool,
}

/// 被观察元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedElement {
    /// 稳定 ID
    pub id: ElementId,
    /// 宿主节点描述
    pub node: NodeDescriptor,
    /// 效果类型
    pub kind: EffectKind,
    /// 解析后的选项映射
    pub options: EffectConfig,
    /// 校验后的场景负载
    pub scene: String,
    /// 当前是否相交
    pub visible: bool,
    /// 最近一次分发的动作
    pub last_action: Option<Action>,
    /// 元素出现的方向
    pub direction: Option<ScrollDirection>,
    /// 锁定标记：为真时完全忽略交叉事件
    pub locked: bool,
    /// 效果运行时状态
    pub fx: EffectState,
}

impl ObservedElement {
    /// 由节点描述构建元素
    ///
    /// 读取属性、解析配置、初始化全部瞬态标记。
    pub fn new(id: ElementId, node: NodeDescriptor) -> Self {
        let kind = node
            .effect
            .as_deref()
            .map(|raw| raw.parse().unwrap_or(EffectKind::Unknown(raw.to_string())))
            .unwrap_or_else(|| EffectKind::Unknown(String::new()));
        let options = node
            .options
            .as_deref()
            .map(config::parse_options)
            .unwrap_or_default();
        let scene = node
            .scene
            .as_deref()
            .map(config::sanitize_scene)
            .unwrap_or_default();
        Self {
            id,
            node,
            kind,
            options,
            scene,
            visible: false,
            last_action: None,
            direction: None,
            locked: false,
            fx: EffectState::default(),
        }
    }

    /// 给定滚动偏移下的视口坐标矩形
    pub fn rect(&self, scroll_offset: f32) -> Rect {
        Rect {
            top: self.node.geometry.offset_top - scroll_offset,
            height: self.node.geometry.height,
            left: self.node.geometry.offset_left,
            width: self.node.geometry.width,
        }
    }

    /// reiterate 标记：完成后是否重新武装（缺省为是）
    pub fn reiterates(&self) -> bool {
        self.node.reiterate.as_deref() != Some("false")
    }

    /// 是否存在 `<video>` 后代
    pub fn has_video(&self) -> bool {
        self.node.video_duration.is_some()
    }

    /// 视频时长（秒），无视频时为 0
    pub fn video_duration(&self) -> f32 {
        self.node.video_duration.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Geometry;

    fn descriptor(effect: &str, options: Option<&str>) -> NodeDescriptor {
        NodeDescriptor {
            node_key: 42,
            effect: Some(effect.to_string()),
            options: options.map(str::to_string),
            sequence: None,
            reiterate: None,
            scene: None,
            geometry: Geometry {
                offset_top: 1200.0,
                height: 300.0,
                offset_left: 0.0,
                width: 800.0,
            },
            video_duration: None,
            text: None,
            path_count: 0,
        }
    }

    #[test]
    fn test_element_initial_state() {
        let el = ObservedElement::new(ElementId(1), descriptor("parallax", Some("speed:2")));
        assert_eq!(el.kind, EffectKind::Parallax);
        assert!(!el.visible);
        assert!(!el.locked);
        assert_eq!(el.last_action, None);
        assert_eq!(el.options.get("speed"), Some("2"));
    }

    #[test]
    fn test_element_rect_follows_scroll() {
        let el = ObservedElement::new(ElementId(1), descriptor("parallax", None));
        let rect = el.rect(1000.0);
        assert_eq!(rect.top, 200.0);
        assert_eq!(rect.bottom(), 500.0);
    }

    #[test]
    fn test_unknown_effect_kind_kept() {
        let el = ObservedElement::new(ElementId(1), descriptor("wobble", None));
        assert_eq!(el.kind, EffectKind::Unknown("wobble".to_string()));
    }

    #[test]
    fn test_reiterate_default_true() {
        let mut node = descriptor("sequence", None);
        let el = ObservedElement::new(ElementId(1), node.clone());
        assert!(el.reiterates());

        node.reiterate = Some("false".to_string());
        let el = ObservedElement::new(ElementId(2), node);
        assert!(!el.reiterates());
    }
}
