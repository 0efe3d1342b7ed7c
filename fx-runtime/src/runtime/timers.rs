//! # Timers 模块
//!
//! 定时器登记簿。
//!
//! Runtime 不持有真实时钟：所有延迟都通过 `ScheduleTimer` 指令
//! 委托给 Host，令牌到期后随 `TimerFired` 回送。登记簿记录每个
//! 未决令牌的**用途**，teardown 时可以逐一取消，避免定时器
//! 泄漏到已拆除的运行时上。

use std::collections::HashMap;

use crate::command::Command;
use crate::element::{Action, ElementId};
use crate::input::TimerToken;

/// 未决定时器的用途
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerPurpose {
    /// 边界轮询链的继续
    Poll {
        /// 元素 ID
        id: ElementId,
        /// 链上携带的（可能已翻转的）待定动作
        action: Action,
    },
    /// 视口尺寸变化防抖
    ResizeDebounce {
        /// 防抖结束后生效的视口高度
        view_height: f32,
    },
    /// 滚动劫持离开后撤销“最近滚动”标记
    UnflagScrolled {
        /// 元素 ID
        id: ElementId,
    },
}

/// 定时器登记簿
#[derive(Debug, Default)]
pub struct TimerRegistry {
    pending: HashMap<TimerToken, TimerPurpose>,
    next: u64,
}

impl TimerRegistry {
    /// 创建空登记簿
    pub fn new() -> Self {
        Self::default()
    }

    /// 申请一个定时器
    ///
    /// 分配令牌、登记用途，并把 `ScheduleTimer` 指令写入 `out`。
    pub fn schedule(
        &mut self,
        purpose: TimerPurpose,
        delay_ms: u64,
        out: &mut Vec<Command>,
    ) -> TimerToken {
        let token = TimerToken(self.next);
        self.next += 1;
        self.pending.insert(token, purpose);
        out.push(Command::ScheduleTimer { token, delay_ms });
        token
    }

    /// 消费到期令牌
    ///
    /// 已取消的令牌返回 `None`（取消与到期竞争时 Host 可能仍回送）。
    pub fn take(&mut self, token: TimerToken) -> Option<TimerPurpose> {
        self.pending.remove(&token)
    }

    /// 取消单个令牌
    pub fn cancel(&mut self, token: TimerToken, out: &mut Vec<Command>) {
        if self.pending.remove(&token).is_some() {
            out.push(Command::CancelTimer { token });
        }
    }

    /// 取消全部未决令牌（teardown 路径）
    pub fn cancel_all(&mut self, out: &mut Vec<Command>) {
        let mut tokens: Vec<TimerToken> = self.pending.keys().copied().collect();
        tokens.sort();
        for token in tokens {
            out.push(Command::CancelTimer { token });
        }
        self.pending.clear();
    }

    /// 未决令牌数量
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// 是否没有未决令牌
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_take() {
        let mut timers = TimerRegistry::new();
        let mut out = Vec::new();

        let token = timers.schedule(
            TimerPurpose::ResizeDebounce { view_height: 900.0 },
            250,
            &mut out,
        );
        assert_eq!(out, vec![Command::ScheduleTimer { token, delay_ms: 250 }]);

        assert_eq!(
            timers.take(token),
            Some(TimerPurpose::ResizeDebounce { view_height: 900.0 })
        );
        // 再次消费同一令牌是 None
        assert_eq!(timers.take(token), None);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = TimerRegistry::new();
        let mut out = Vec::new();
        timers.schedule(TimerPurpose::UnflagScrolled { id: ElementId(1) }, 500, &mut out);
        timers.schedule(TimerPurpose::UnflagScrolled { id: ElementId(2) }, 500, &mut out);

        let mut teardown = Vec::new();
        timers.cancel_all(&mut teardown);
        assert_eq!(teardown.len(), 2);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancelled_token_fires_harmlessly() {
        let mut timers = TimerRegistry::new();
        let mut out = Vec::new();
        let token = timers.schedule(TimerPurpose::UnflagScrolled { id: ElementId(1) }, 500, &mut out);
        timers.cancel(token, &mut out);

        assert_eq!(timers.take(token), None);
    }
}
