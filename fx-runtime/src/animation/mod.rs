//! # Animation 模块
//!
//! 效果用到的动画原语集合。
//!
//! ## 核心设计理念
//!
//! 动画原语只负责**时间轴管理**：知道某个值在 duration 内如何变化、
//! 维护当前进度，不假设被驱动的对象。名称到指令的映射由各 Handler
//! 和引擎的逐帧推进完成。
//!
//! ## 核心概念
//!
//! - [`Tween`]: 单个 f32 值的补间（计数器、滚动劫持）
//! - [`Timeline`]: 多步骤样式时间轴（序列效果）
//! - [`SvgDraw`]: 带 path 错开的描边动画
//! - [`Stagger`]: 循环的逐字错落动画
//! - [`EasingKind`]: 缓动函数

mod easing;
mod stagger;
mod svg;
mod timeline;
mod tween;

pub use easing::EasingKind;
pub use stagger::{LetterStyle, Stagger};
pub use svg::{DrawDirection, SvgDraw, SvgUpdate};
pub use timeline::{Timeline, TimelineState, TimelineUpdate};
pub use tween::{Tween, TweenState};
