//! # Config 模块
//!
//! 效果类型定义与配置解析。
//! 这是所有效果名称、默认值的**唯一来源**。
//!
//! ## 设计说明
//!
//! 配置由外部的编辑器/序列化协作方写入元素属性，对本系统只读：
//!
//! - 效果类型标记：枚举字符串，选择 [`EffectKind`]
//! - 选项串：`key:value` 对以 `;` 连接，例如 `direction:Y;level:1;speed:5`
//! - 序列串：有序的 `property:value` 对，`duration:<ms>` 作为步骤分隔符
//!
//! 解析是**尽力而为**的：缺失分隔符不会报错，缺失的键由各 Handler
//! 应用自己的默认值。所有值在解析阶段保持字符串，由 Handler 自行解释。

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// 效果类型
///
/// 标识一个滚动/视口触发效果的类型。
/// 未识别的字符串保留为 [`EffectKind::Unknown`]，由分发器记录日志后跳过，
/// 对应元素永久惰性（不崩溃、不重试）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// 视差位移（持续逐帧更新）
    Parallax,
    /// 进入/离开 class 切换动画
    Animation,
    /// 多步动画时间轴
    Sequence,
    /// SVG 描边绘制
    SvgPath,
    /// 数字计数器
    Counter,
    /// 滚动劫持（scroll-jack）
    ScreenJacker,
    /// 视频：可见即播放
    VideoFocusPlay,
    /// 视频：滚动位置映射播放进度
    VideoParallax,
    /// 视频：滚轮逐帧刷播
    VideoScroll,
    /// 视频：指针横向位置映射播放进度（360 度查看）
    Video360,
    /// 悬浮（占位效果）
    Levitate,
    /// 文字逐字错落动画
    TextStagger,
    /// 未识别的效果类型
    Unknown(String),
}

impl FromStr for EffectKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "parallax" => Self::Parallax,
            "animation" => Self::Animation,
            "sequence" => Self::Sequence,
            "svg-path" => Self::SvgPath,
            "counter" => Self::Counter,
            "screen-jacker" => Self::ScreenJacker,
            "video-focus-play" => Self::VideoFocusPlay,
            "video-parallax" => Self::VideoParallax,
            "video-scroll" => Self::VideoScroll,
            "video-360" => Self::Video360,
            "levitate" => Self::Levitate,
            "text-stagger" => Self::TextStagger,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// 各效果的默认参数
///
/// 这些常量是效果默认值的**唯一来源**，任何需要默认值的地方
/// 都应使用这些常量，而非硬编码数字。
pub mod defaults {
    /// 视差默认轴向
    pub const PARALLAX_DIRECTION: &str = "Y";
    /// 视差默认强度等级
    pub const PARALLAX_LEVEL: f32 = 1.0;
    /// 视差默认速度
    pub const PARALLAX_SPEED: f32 = 1.0;
    /// class 动画默认进入名
    pub const ANIMATION_ENTER: &str = "fadeIn";
    /// class 动画默认离开名
    pub const ANIMATION_EXIT: &str = "fadeOut";
    /// class 动画默认触发带（视口百分比）
    pub const ANIMATION_POSITION: f32 = 50.0;
    /// 序列/SVG 使用的触发带（视口百分比）
    pub const SEQUENCE_POSITION: f32 = 25.0;
    /// SVG 描边默认时长（毫秒）
    pub const SVG_DURATION: f32 = 5000.0;
    /// 计数器默认时长（毫秒）
    pub const COUNTER_DURATION: f32 = 5000.0;
    /// 计数器目标值解析失败时的回退值
    pub const COUNTER_FALLBACK: i64 = 100;
    /// 滚动劫持默认时长（毫秒）
    pub const JACKER_DURATION: f32 = 500.0;
    /// 滚动劫持默认触发带（视口百分比）
    pub const JACKER_INTERSECTION: f32 = 50.0;
    /// 滚动劫持完成后的冷却余量（毫秒）
    pub const JACKER_COOLDOWN_SLACK: u64 = 100;
    /// 文字错落默认时长（毫秒）
    pub const STAGGER_DURATION: f32 = 1500.0;
    /// 序列步骤缺省时长（毫秒）
    pub const STEP_DURATION: f32 = 1000.0;
    /// 边界轮询的继续间隔（毫秒）
    pub const POLL_DELAY: u64 = 100;
    /// 视口尺寸变化的防抖延迟（毫秒）
    pub const RESIZE_DEBOUNCE: u64 = 250;
    /// 滚轮刷播的单步步长（秒，约一帧）
    pub const WHEEL_FRAME_STEP: f32 = 1.0 / 29.7;
}

/// 效果选项映射
///
/// 保持插入顺序的 `(key, value)` 字符串对。
/// 解析阶段不做任何类型转换，由 Handler 通过类型化取值方法解释。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    pairs: Vec<(String, String)>,
}

impl EffectConfig {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 按键取原始字符串值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 按键取字符串值，缺失时使用默认值
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// 按键取 f32 值，缺失或不可解析时使用默认值
    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.get(key)
            .and_then(|v| v.trim().trim_end_matches("ms").parse().ok())
            .unwrap_or(default)
    }

    /// 键值对数量
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn push(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }
}

/// 解析选项串
///
/// 输入形如 `"direction:Y;level:1;speed:5"`。
/// 尽力而为：空片段被跳过，没有 `:` 的片段作为值为空的键保留。
pub fn parse_options(raw: &str) -> EffectConfig {
    let mut config = EffectConfig::new();
    for fragment in raw.split(';') {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        match fragment.split_once(':') {
            Some((key, value)) => config.push(key.trim(), value.trim()),
            None => config.push(fragment, ""),
        }
    }
    config
}

/// 序列串中的一个有序对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencePair {
    /// CSS-like 属性名
    pub property: String,
    /// 字符串值（不做类型转换）
    pub value: String,
}

/// 解析序列串为有序 `{property, value}` 对
///
/// 输入形如 `"duration:500;opacity:0;translateY:50px"`。
pub fn parse_sequence(raw: &str) -> Vec<SequencePair> {
    raw.split(';')
        .filter_map(|fragment| {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                return None;
            }
            let (property, value) = fragment.split_once(':').unwrap_or((fragment, ""));
            Some(SequencePair {
                property: property.trim().to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// 时间轴的一个步骤组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    /// 步骤时长（原始字符串，带 `ms` 后缀）
    pub duration: Option<String>,
    /// 该步骤要应用的属性
    pub props: Vec<(String, String)>,
}

impl SequenceStep {
    /// 步骤时长（毫秒），缺省为 [`defaults::STEP_DURATION`]
    pub fn duration_ms(&self) -> f32 {
        self.duration
            .as_deref()
            .and_then(|v| v.trim_end_matches("ms").parse().ok())
            .unwrap_or(defaults::STEP_DURATION)
    }
}

/// 由有序对构建步骤组
///
/// `duration` 对作为步骤分隔符：它开启一个新步骤组并把 `"<value>ms"`
/// 作为该组时长；其余属性累积到当前组；从未收到任何内容的首组被丢弃。
///
/// `"duration:500;opacity:0;duration:300;translateY:50px"` 产生两组：
/// `{duration:"500ms", opacity:"0"}`、`{duration:"300ms", translateY:"50px"}`。
pub fn build_steps(pairs: &[SequencePair]) -> Vec<SequenceStep> {
    let mut steps: Vec<SequenceStep> = Vec::new();
    let mut current = SequenceStep {
        duration: None,
        props: Vec::new(),
    };
    let mut touched = false;

    for pair in pairs {
        if pair.property == "duration" {
            if touched {
                steps.push(current);
            }
            current = SequenceStep {
                duration: Some(format!("{}ms", pair.value)),
                props: Vec::new(),
            };
            touched = true;
        } else {
            current.props.push((pair.property.clone(), pair.value.clone()));
            touched = true;
        }
    }
    if touched {
        steps.push(current);
    }
    steps
}

/// 校验场景负载（不透明 JSON 文本）
///
/// 负载原样传递给下游的时间轴子效果；解析失败时以空串替代，
/// 只记录日志、不向外传播。
pub fn sanitize_scene(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(_) => raw.to_string(),
        Err(err) => {
            warn!("场景负载不是合法 JSON，已替换为空串: {err}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_kind_from_str() {
        assert_eq!("parallax".parse::<EffectKind>().unwrap(), EffectKind::Parallax);
        assert_eq!(
            "screen-jacker".parse::<EffectKind>().unwrap(),
            EffectKind::ScreenJacker
        );
        assert_eq!(
            "whatever".parse::<EffectKind>().unwrap(),
            EffectKind::Unknown("whatever".to_string())
        );
    }

    #[test]
    fn test_parse_options() {
        let config = parse_options("direction:Y;level:1;speed:5");
        assert_eq!(config.get("direction"), Some("Y"));
        assert_eq!(config.get("level"), Some("1"));
        assert_eq!(config.get("speed"), Some("5"));
        // 不做类型转换
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn test_parse_options_malformed() {
        // 缺失分隔符不报错，键保留、值为空
        let config = parse_options("direction;;level:2");
        assert_eq!(config.get("direction"), Some(""));
        assert_eq!(config.get("level"), Some("2"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_config_typed_getters() {
        let config = parse_options("duration:350ms;speed:abc");
        assert_eq!(config.get_f32("duration", 500.0), 350.0);
        // 不可解析时回退默认值
        assert_eq!(config.get_f32("speed", 1.0), 1.0);
        assert_eq!(config.get_or("easing", "linear"), "linear");
    }

    #[test]
    fn test_parse_sequence_order() {
        let pairs = parse_sequence("opacity:0;translateY:50px");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].property, "opacity");
        assert_eq!(pairs[1].value, "50px");
    }

    #[test]
    fn test_build_steps_two_groups() {
        let pairs = parse_sequence("duration:500;opacity:0;duration:300;translateY:50px");
        let steps = build_steps(&pairs);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].duration.as_deref(), Some("500ms"));
        assert_eq!(steps[0].props, vec![("opacity".to_string(), "0".to_string())]);
        assert_eq!(steps[1].duration.as_deref(), Some("300ms"));
        assert_eq!(
            steps[1].props,
            vec![("translateY".to_string(), "50px".to_string())]
        );
    }

    #[test]
    fn test_build_steps_leading_props() {
        // duration 之前的属性构成一个无显式时长的首组
        let pairs = parse_sequence("opacity:1;duration:200;scale:2");
        let steps = build_steps(&pairs);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].duration, None);
        assert_eq!(steps[0].duration_ms(), defaults::STEP_DURATION);
        assert_eq!(steps[1].duration_ms(), 200.0);
    }

    #[test]
    fn test_build_steps_empty() {
        assert!(build_steps(&[]).is_empty());
    }

    #[test]
    fn test_sanitize_scene() {
        assert_eq!(sanitize_scene(r#"{"a":1}"#), r#"{"a":1}"#);
        // 解析失败替换为空串
        assert_eq!(sanitize_scene("{not json"), "");
        assert_eq!(sanitize_scene(""), "");
    }
}
