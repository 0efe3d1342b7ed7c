//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的指令。
//!
//! ## 设计说明
//!
//! Runtime 是纯逻辑核心，所有对文档的副作用都以指令形式交给 Host 执行：
//! 样式写入、视频控制、滚动接管、定时器与动画帧的申请等。
//! 指令只携带语义化数据，Host 决定具体的 DOM 写法。

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::input::TimerToken;
use crate::viewport::ScrollDirection;

/// 位移轴向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// 横向
    X,
    /// 纵向
    Y,
}

/// Runtime 向 Host 发出的指令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // ========== 观察与调度 ==========
    /// 开始对元素做交叉观察
    Observe {
        /// 分配的元素 ID
        id: ElementId,
        /// Host 侧节点键（便于 Host 回查节点）
        node_key: u64,
    },
    /// 申请一个一次性定时器
    ScheduleTimer {
        /// 令牌（到期后随 `TimerFired` 回送）
        token: TimerToken,
        /// 延迟（毫秒）
        delay_ms: u64,
    },
    /// 取消先前申请的定时器
    CancelTimer {
        /// 要取消的令牌
        token: TimerToken,
    },
    /// 申请一个动画帧回调
    RequestFrame,

    // ========== 文档级标记 ==========
    /// 把滚动方向镜像到文档上
    MarkScrollDirection {
        /// 当前方向
        direction: ScrollDirection,
    },

    // ========== 样式写入 ==========
    /// 设置 3D 位移变换
    SetTransform {
        /// 元素 ID
        id: ElementId,
        /// 轴向
        axis: Axis,
        /// 位移量（像素）
        offset_px: f32,
    },
    /// 写入任意样式属性
    ApplyStyle {
        /// 元素 ID
        id: ElementId,
        /// 属性名
        property: String,
        /// 属性值（字符串，原样写入）
        value: String,
    },
    /// 设置不透明度
    SetOpacity {
        /// 元素 ID
        id: ElementId,
        /// 不透明度（0.0 - 1.0）
        value: f32,
    },
    /// 设置过渡时长提示
    SetTransitionHint {
        /// 元素 ID
        id: ElementId,
        /// 过渡时长（毫秒）
        duration_ms: u64,
    },
    /// 添加 class
    AddClass {
        /// 元素 ID
        id: ElementId,
        /// class 名
        class: String,
    },
    /// 移除 class
    RemoveClass {
        /// 元素 ID
        id: ElementId,
        /// class 名
        class: String,
    },
    /// 钉住元素为整屏高度（滚动劫持的落点）
    PinFullHeight {
        /// 元素 ID
        id: ElementId,
    },
    /// 写入元素文本
    SetText {
        /// 元素 ID
        id: ElementId,
        /// 新文本
        text: String,
    },

    // ========== 文字错落 ==========
    /// 把元素文本按字母拆成可独立定位的包裹节点
    WrapLetters {
        /// 元素 ID
        id: ElementId,
    },
    /// 写入单个字母的位移与透明度
    SetLetterStyle {
        /// 元素 ID
        id: ElementId,
        /// 字母索引
        index: usize,
        /// 纵向位移（像素）
        translate_y: f32,
        /// 透明度
        opacity: f32,
    },

    // ========== SVG ==========
    /// 写入单条 path 的归一化描边进度
    ///
    /// Host 按实测路径长度折算为 `stroke-dashoffset`。
    SetPathProgress {
        /// 元素 ID
        id: ElementId,
        /// path 索引
        path: usize,
        /// 进度（0.0 - 1.0）
        progress: f32,
    },

    // ========== 视频 ==========
    /// 播放视频
    PlayVideo {
        /// 元素 ID
        id: ElementId,
    },
    /// 暂停视频
    PauseVideo {
        /// 元素 ID
        id: ElementId,
    },
    /// 停止视频并回到开头
    StopVideo {
        /// 元素 ID
        id: ElementId,
    },
    /// 设置视频播放位置
    SetVideoTime {
        /// 元素 ID
        id: ElementId,
        /// 播放位置（秒）
        seconds: f32,
    },
    /// 为滚轮刷播准备视频（去控制条、静音、暂停）
    PrepareVideoScrub {
        /// 元素 ID
        id: ElementId,
    },

    // ========== 输入绑定 ==========
    /// 绑定指针移动事件
    BindPointer {
        /// 元素 ID
        id: ElementId,
    },
    /// 解绑指针移动事件
    UnbindPointer {
        /// 元素 ID
        id: ElementId,
    },
    /// 绑定滚轮事件
    BindWheel {
        /// 元素 ID
        id: ElementId,
    },
    /// 解绑滚轮事件
    UnbindWheel {
        /// 元素 ID
        id: ElementId,
    },

    // ========== 滚动接管 ==========
    /// 把文档滚动到指定偏移
    ScrollTo {
        /// 目标偏移
        offset: f32,
    },
    /// 抑制用户滚轮输入
    LockWheel,
    /// 恢复用户滚轮输入
    UnlockWheel,
}
