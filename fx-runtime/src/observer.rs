//! # Observer 模块
//!
//! 可见性观察的过渡状态机。
//!
//! ## 过渡规则（每条交叉记录）
//!
//! 1. 元素处于 `locked` 时完全忽略（不改状态、不分发）
//! 2. 由元素上边相对视口中线的位置判定出现方向
//! 3. 相交位与上次不同 → `Enter` / `Leave`；相同 → `InViewport`
//! 4. 把相交位写回 `visible`
//!
//! 批次处理完成后由引擎统一记录滚动偏移。由此保证任一元素的
//! 动作序列中不会出现未被相反动作隔开的连续 `Enter`（或 `Leave`）。

use crate::element::{Action, ObservedElement};
use crate::viewport::{ScrollDirection, ViewportState};

/// 计算一条交叉记录引发的过渡
///
/// 返回待分发的动作；元素锁定时返回 `None`。
pub fn evaluate(
    element: &mut ObservedElement,
    viewport: &ViewportState,
    scroll_offset: f32,
    is_intersecting: bool,
) -> Option<Action> {
    if element.locked {
        return None;
    }

    let rect = element.rect(scroll_offset);
    element.direction = Some(if viewport.view_height / 2.0 > rect.top {
        ScrollDirection::Up
    } else {
        ScrollDirection::Down
    });

    let action = if is_intersecting != element.visible {
        if is_intersecting {
            Action::Enter
        } else {
            Action::Leave
        }
    } else {
        Action::InViewport
    };

    element.visible = is_intersecting;
    element.last_action = Some(action);
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;
    use crate::input::{Geometry, NodeDescriptor};

    fn element(offset_top: f32) -> ObservedElement {
        ObservedElement::new(
            ElementId(0),
            NodeDescriptor {
                node_key: 1,
                effect: Some("parallax".to_string()),
                options: None,
                sequence: None,
                reiterate: None,
                scene: None,
                geometry: Geometry {
                    offset_top,
                    height: 100.0,
                    offset_left: 0.0,
                    width: 100.0,
                },
                video_duration: None,
                text: None,
                path_count: 0,
            },
        )
    }

    #[test]
    fn test_enter_then_leave() {
        let vp = ViewportState::new(1000.0);
        let mut el = element(500.0);

        assert_eq!(evaluate(&mut el, &vp, 0.0, true), Some(Action::Enter));
        assert!(el.visible);
        assert_eq!(evaluate(&mut el, &vp, 0.0, true), Some(Action::InViewport));
        assert_eq!(evaluate(&mut el, &vp, 0.0, false), Some(Action::Leave));
        assert!(!el.visible);
    }

    #[test]
    fn test_no_consecutive_enters() {
        // 任意相交序列下，两个 Enter 之间必有 Leave
        let vp = ViewportState::new(1000.0);
        let mut el = element(500.0);
        let feed = [true, true, false, true, false, false, true];

        let mut actions = Vec::new();
        for intersecting in feed {
            actions.push(evaluate(&mut el, &vp, 0.0, intersecting).unwrap());
        }

        let mut last_edge = None;
        for action in actions {
            match action {
                Action::Enter => {
                    assert_ne!(last_edge, Some(Action::Enter));
                    last_edge = Some(Action::Enter);
                }
                Action::Leave => {
                    assert_ne!(last_edge, Some(Action::Leave));
                    last_edge = Some(Action::Leave);
                }
                Action::InViewport => {}
            }
        }
    }

    #[test]
    fn test_locked_suppresses_everything() {
        let vp = ViewportState::new(1000.0);
        let mut el = element(500.0);
        el.locked = true;

        assert_eq!(evaluate(&mut el, &vp, 0.0, true), None);
        assert!(!el.visible);
        assert_eq!(el.last_action, None);
    }

    #[test]
    fn test_direction_from_midline() {
        let vp = ViewportState::new(1000.0);

        // 上边在中线之上 => Up
        let mut el = element(200.0);
        evaluate(&mut el, &vp, 0.0, true);
        assert_eq!(el.direction, Some(ScrollDirection::Up));

        // 上边在中线之下 => Down
        let mut el = element(800.0);
        evaluate(&mut el, &vp, 0.0, true);
        assert_eq!(el.direction, Some(ScrollDirection::Down));
    }
}
