//! # Error 模块
//!
//! 定义 fx-runtime 中使用的错误类型。
//!
//! ## 设计说明
//!
//! 本系统的失败策略是**按元素隔离**：配置缺失、子节点缺失、
//! 未知效果类型等都只记录日志并让该元素退化为惰性，不会返回错误。
//! 因此 `RuntimeError` 只覆盖 Host 协议层面的问题（引用了不存在的元素等）。

use thiserror::Error;

use crate::element::ElementId;

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Host 输入引用了未注册的元素
    #[error("元素 {id} 未注册")]
    UnknownElement { id: ElementId },
}

/// Result 类型别名
pub type FxResult<T> = Result<T, RuntimeError>;
