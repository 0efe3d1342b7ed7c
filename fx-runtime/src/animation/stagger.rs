//! # Stagger 模块
//!
//! 文字逐字错落动画：每个字母按索引成比例延迟地做
//! 位移 + 透明度补间，整体循环播放。

use serde::{Deserialize, Serialize};

use super::EasingKind;

/// 单个字母在某一时刻的样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterStyle {
    /// 字母索引
    pub index: usize,
    /// 纵向位移（像素，从起始位移回落到 0）
    pub translate_y: f32,
    /// 透明度（0.0 - 1.0）
    pub opacity: f32,
}

/// 逐字错落动画实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// 字母数量（非空白字符数）
    letters: usize,
    /// 单字补间时长（毫秒）
    duration_ms: f32,
    /// 字母起始纵向位移
    rise_px: f32,
    /// 主时间轴位置
    position: f32,
    /// 是否在播放
    playing: bool,
}

impl Stagger {
    /// 创建错落动画
    pub fn new(letters: usize, duration_ms: f32) -> Self {
        Self {
            letters,
            duration_ms: duration_ms.max(1.0),
            rise_px: 40.0,
            position: 0.0,
            playing: letters > 0,
        }
    }

    /// 含错开的整体周期
    pub fn span(&self) -> f32 {
        if self.letters == 0 {
            return 0.0;
        }
        self.duration_ms + (self.letters as f32 - 1.0) * self.duration_ms / self.letters as f32
    }

    /// 暂停
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// 恢复
    pub fn resume(&mut self) {
        self.playing = self.letters > 0;
    }

    /// 是否仍需逐帧推进
    pub fn is_active(&self) -> bool {
        self.playing
    }

    /// 推进并产出每个字母的样式
    ///
    /// 循环播放：跨过周期末尾时回绕。
    pub fn update(&mut self, dt_ms: f32) -> Vec<LetterStyle> {
        if !self.playing {
            return Vec::new();
        }
        let span = self.span();
        self.position = (self.position + dt_ms) % span;

        (0..self.letters)
            .map(|i| {
                let delay = i as f32 * self.duration_ms / self.letters as f32;
                let raw = ((self.position - delay) / self.duration_ms).clamp(0.0, 1.0);
                let p = EasingKind::EaseOutExpo.apply(raw);
                LetterStyle {
                    index: i,
                    translate_y: self.rise_px * (1.0 - p),
                    opacity: p,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_delays_later_letters() {
        let mut stagger = Stagger::new(4, 1000.0);
        let styles = stagger.update(300.0);

        assert_eq!(styles.len(), 4);
        // 先出现的字母补间更靠前
        assert!(styles[0].opacity > styles[1].opacity);
        assert_eq!(styles[3].opacity, 0.0);
        assert!(styles[0].translate_y < styles[3].translate_y);
    }

    #[test]
    fn test_stagger_loops() {
        let mut stagger = Stagger::new(2, 100.0);
        let span = stagger.span();
        // 跨过周期末尾回绕
        let styles = stagger.update(span + 10.0);
        assert!(!styles.is_empty());
        assert!(stagger.is_active());
    }

    #[test]
    fn test_stagger_pause() {
        let mut stagger = Stagger::new(2, 100.0);
        stagger.pause();
        assert!(stagger.update(50.0).is_empty());
        stagger.resume();
        assert!(!stagger.update(50.0).is_empty());
    }
}
