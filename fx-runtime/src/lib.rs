//! # FX Runtime
//!
//! 滚动/视口触发视觉效果的核心运行时库。
//!
//! ## 架构概述
//!
//! `fx-runtime` 是纯逻辑核心，不依赖任何 DOM、时钟或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                          Runtime
//!   │                              │
//!   │──── RuntimeInput ──────────►│
//!   │                              │ tick()
//!   │◄─── Vec<Command> ───────────│
//!   │                              │
//! ```
//!
//! Host 负责交叉观察、帧回调、定时器和真实的样式写入；
//! Runtime 负责全部决策：谁进入了视口、哪个效果该做什么、
//! 下一帧/下一个定时器要不要继续。
//!
//! ## 核心类型
//!
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`RuntimeInput`]：Host 向 Runtime 传递的输入
//! - [`NodeDescriptor`]：待注册节点的快照（配置 + 几何）
//! - [`ScrollRuntime`]：运行时主体
//!
//! ## 使用示例
//!
//! ```ignore
//! use fx_runtime::{RuntimeInput, RuntimeOptions, ScrollRuntime};
//!
//! let mut runtime = ScrollRuntime::new(RuntimeOptions::default());
//!
//! // 扫描文档，开始观察带效果标记的节点
//! for cmd in runtime.register_document(nodes) {
//!     host.execute(cmd);
//! }
//!
//! // 主循环：按发生顺序喂输入、顺序执行指令
//! loop {
//!     let input = host.next_input();
//!     for cmd in runtime.tick(input)? {
//!         host.execute(cmd);
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`input`]：RuntimeInput 与节点描述
//! - [`config`]：效果类型与配置解析
//! - [`viewport`]：视口几何与可见性判定
//! - [`observer`]：可见性过渡状态机
//! - [`registry`]：元素注册表
//! - [`animation`]：补间、时间轴、描边、错落
//! - [`handlers`]：逐效果处理器
//! - [`runtime`]：编排层（帧循环、轮询链、滚动锁、定时器）
//! - [`error`]：错误类型定义

pub mod animation;
pub mod command;
pub mod config;
pub mod element;
pub mod error;
pub mod handlers;
pub mod input;
pub mod observer;
pub mod registry;
pub mod runtime;
pub mod viewport;

// 重导出核心类型
pub use command::{Axis, Command};
pub use config::EffectKind;
pub use element::{Action, ElementId};
pub use error::{FxResult, RuntimeError};
pub use input::{Geometry, IntersectionRecord, NodeDescriptor, RuntimeInput, TimerToken};
pub use runtime::{RuntimeOptions, ScrollRuntime};
pub use viewport::{Rect, ScrollDirection, ViewportState};
