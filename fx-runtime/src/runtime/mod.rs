//! # Runtime 模块
//!
//! 运行时编排层：输入路由、帧循环、定时器、滚动锁。
//!
//! - [`engine`]：运行时主体，`tick` 入口
//! - [`scheduler`]：帧循环的位置型效果分组
//! - [`poller`]：边界轮询链
//! - [`timers`]：定时器登记簿
//! - [`lock`]：滚动锁
//! - [`context`]：处理器执行上下文

pub mod context;
pub mod engine;
pub mod lock;
pub mod poller;
pub mod scheduler;
pub mod timers;

pub use engine::{RuntimeOptions, ScrollRuntime};
