//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入事件。
//!
//! ## 设计说明
//!
//! - Runtime 不直接接触 DOM、交叉观察器或定时器，只处理语义化输入
//! - Host 把交叉回调、动画帧、定时器到期、指针/滚轮事件翻译成
//!   [`RuntimeInput`] 并调用 `tick`
//! - 定时器与动画帧都由 Runtime 通过指令显式申请，Host 到期后回送，
//!   因此时间对 Runtime 完全确定

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// 定时器令牌
///
/// 由 Runtime 分配并随 `ScheduleTimer` 指令交给 Host；
/// Host 到期后以 [`RuntimeInput::TimerFired`] 回送。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

/// 元素的文档坐标几何
///
/// 注册时由 Host 提供；视口坐标由当前滚动偏移推导。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// 文档坐标下的顶部偏移
    pub offset_top: f32,
    /// 高度
    pub height: f32,
    /// 文档坐标下的左侧偏移
    pub offset_left: f32,
    /// 宽度
    pub width: f32,
}

/// 待注册节点的描述
///
/// 对应一个打了效果标记的宿主节点及其序列化配置属性。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Host 侧节点唯一键（注册幂等性依据）
    pub node_key: u64,
    /// 效果类型标记（缺失则不注册）
    #[serde(default)]
    pub effect: Option<String>,
    /// 选项串：`key:value` 对以 `;` 连接
    #[serde(default)]
    pub options: Option<String>,
    /// 序列串：有序 `property:value` 对，`duration` 作为步骤分隔符
    #[serde(default)]
    pub sequence: Option<String>,
    /// 完成后是否重新武装
    #[serde(default)]
    pub reiterate: Option<String>,
    /// 场景负载（不透明 JSON 文本）
    #[serde(default)]
    pub scene: Option<String>,
    /// 几何
    #[serde(default)]
    pub geometry: Geometry,
    /// `<video>` 后代的时长（秒）；无视频后代时缺失
    #[serde(default)]
    pub video_duration: Option<f32>,
    /// 渲染文本（计数器目标 / 错落字母来源）
    #[serde(default)]
    pub text: Option<String>,
    /// SVG path 子节点数量
    #[serde(default)]
    pub path_count: usize,
}

impl NodeDescriptor {
    /// 文本中的非空白字符数（错落动画的字母数）
    pub fn letter_count(&self) -> usize {
        self.text
            .as_deref()
            .map(|t| t.chars().filter(|c| !c.is_whitespace()).count())
            .unwrap_or(0)
    }
}

/// 单条交叉记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    /// 元素 ID
    pub id: ElementId,
    /// 当前是否与视口相交
    pub is_intersecting: bool,
}

/// Host 向 Runtime 传递的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeInput {
    /// 一个交叉观察批次
    ///
    /// Host 保证批次处理完成后才会送入下一批次或帧回调。
    Intersections {
        /// Host 时钟（毫秒）
        now_ms: u64,
        /// 当前滚动偏移
        scroll_offset: f32,
        /// 批次内的记录
        records: Vec<IntersectionRecord>,
    },

    /// 一个动画帧（仅在 Runtime 发出 `RequestFrame` 后送入）
    Frame {
        /// Host 时钟（毫秒）
        now_ms: u64,
        /// 当前滚动偏移
        scroll_offset: f32,
    },

    /// 先前申请的定时器到期
    ///
    /// 轮询链依赖到期时刻的实时滚动偏移做带限判定，
    /// 因此和帧一样携带时钟与偏移。
    TimerFired {
        /// Host 时钟（毫秒）
        now_ms: u64,
        /// 当前滚动偏移
        scroll_offset: f32,
        /// 申请时分配的令牌
        token: TimerToken,
    },

    /// 视口尺寸变化（Runtime 自行防抖）
    Resized {
        /// 新的视口高度
        view_height: f32,
    },

    /// 文档树新增了子树（变更监视）
    NodesAdded {
        /// 新增子树中的候选节点
        nodes: Vec<NodeDescriptor>,
    },

    /// 元素内的视频播放到了结尾
    ///
    /// 焦点播放效果据此在离开时归零而不是暂停。
    VideoEnded {
        /// 元素 ID
        id: ElementId,
    },

    /// 指针在已绑定元素上移动
    PointerMoved {
        /// 元素 ID
        id: ElementId,
        /// 指针横坐标（文档坐标）
        x: f32,
    },

    /// 滚轮事件落在已绑定元素上
    Wheel {
        /// 元素 ID
        id: ElementId,
        /// 滚轮纵向增量
        delta_y: f32,
    },
}
