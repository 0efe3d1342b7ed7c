//! # Lock 模块
//!
//! 滚动锁状态。
//!
//! 任意时刻最多一个元素持有滚动锁（screen-jacker 的接管动画）。
//! 释放后进入冷却期，冷却结束前其它元素的申请一律拒绝，防止
//! 相邻的劫持区在边界上来回抢占。

use crate::animation::{EasingKind, Tween};
use crate::config::defaults;
use crate::element::ElementId;

/// 滚动锁状态
#[derive(Debug, Default)]
pub struct ScrollLockState {
    /// 当前持锁元素
    pub claimant: Option<ElementId>,
    /// 冷却截止时刻（毫秒）
    pub cooldown_until_ms: u64,
    /// 接管滚动的补间（from = 当前偏移，to = 目标偏移）
    pub tween: Option<Tween>,
}

impl ScrollLockState {
    /// 创建无人持锁的初始状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 此刻能否申请锁
    pub fn can_claim(&self, now_ms: u64) -> bool {
        self.claimant.is_none() && now_ms >= self.cooldown_until_ms
    }

    /// 申请锁并启动接管补间
    ///
    /// 申请被拒绝（已有持锁者或处于冷却期）时返回 `false`，
    /// 调用方不应产生任何指令。
    pub fn claim(
        &mut self,
        id: ElementId,
        from_offset: f32,
        to_offset: f32,
        duration_ms: f32,
        easing: EasingKind,
        now_ms: u64,
    ) -> bool {
        if !self.can_claim(now_ms) {
            return false;
        }
        self.claimant = Some(id);
        self.tween = Some(Tween::new(from_offset, to_offset, duration_ms, easing));
        true
    }

    /// 接管完成，释放锁并设置冷却
    ///
    /// 冷却期 = 动画时长 + 固定余量，跟随动画长度伸缩。
    pub fn release(&mut self, duration_ms: f32, now_ms: u64) {
        self.claimant = None;
        self.tween = None;
        self.cooldown_until_ms =
            now_ms + duration_ms.max(0.0) as u64 + defaults::JACKER_COOLDOWN_SLACK;
    }

    /// 接管动画是否在推进中
    pub fn is_animating(&self) -> bool {
        self.tween.as_ref().is_some_and(|t| t.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_claimant() {
        let mut lock = ScrollLockState::new();
        assert!(lock.claim(ElementId(1), 0.0, 600.0, 500.0, EasingKind::Linear, 0));
        // 持锁期间第二个元素申请失败
        assert!(!lock.claim(ElementId(2), 0.0, 1200.0, 500.0, EasingKind::Linear, 10));
        assert_eq!(lock.claimant, Some(ElementId(1)));
    }

    #[test]
    fn test_cooldown_blocks_reclaim() {
        let mut lock = ScrollLockState::new();
        assert!(lock.claim(ElementId(1), 0.0, 600.0, 500.0, EasingKind::Linear, 0));
        lock.release(500.0, 1000);

        // 冷却期内（500 + 100 毫秒）拒绝
        assert!(!lock.claim(ElementId(2), 600.0, 1200.0, 500.0, EasingKind::Linear, 1500));
        // 冷却期过后放行
        assert!(lock.claim(ElementId(2), 600.0, 1200.0, 500.0, EasingKind::Linear, 1600));
    }

    #[test]
    fn test_startup_grace() {
        let mut lock = ScrollLockState::new();
        lock.cooldown_until_ms = 2000;
        assert!(!lock.claim(ElementId(1), 0.0, 600.0, 500.0, EasingKind::Linear, 100));
        assert!(lock.claim(ElementId(1), 0.0, 600.0, 500.0, EasingKind::Linear, 2000));
    }
}
