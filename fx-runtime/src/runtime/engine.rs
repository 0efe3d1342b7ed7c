//! # Engine 模块
//!
//! 运行时主体：输入路由与指令产出。
//!
//! [`ScrollRuntime`] 不持有时钟、不触碰宿主节点，所有外界交互都
//! 通过 `tick(input) -> Vec<Command>` 往返。Host 的职责是把交叉
//! 批次、帧回调、定时器到期和交互输入按发生顺序喂进来，并顺序
//! 执行返回的指令。

use tracing::{debug, warn};

use crate::command::Command;
use crate::config::EffectKind;
use crate::element::{Action, ElementId};
use crate::error::{FxResult, RuntimeError};
use crate::handlers::{HandlerRegistry, SCROLLED_CLASS};
use crate::input::{IntersectionRecord, NodeDescriptor, RuntimeInput, TimerToken};
use crate::observer;
use crate::registry::ElementStore;
use crate::runtime::context::EffectCx;
use crate::runtime::lock::ScrollLockState;
use crate::runtime::scheduler::FrameGroups;
use crate::runtime::timers::{TimerPurpose, TimerRegistry};
use crate::viewport::ViewportState;

/// 运行时构造参数
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// 初始视口高度
    pub view_height: f32,
    /// 启动宽限期（毫秒）：期内滚动劫持不申请锁，
    /// 避免页面恢复滚动位置时被接管
    pub startup_grace_ms: u64,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            view_height: 800.0,
            startup_grace_ms: 2000,
        }
    }
}

/// 滚动效果运行时
pub struct ScrollRuntime {
    options: RuntimeOptions,
    elements: ElementStore,
    viewport: ViewportState,
    groups: FrameGroups,
    lock: ScrollLockState,
    timers: TimerRegistry,
    handlers: HandlerRegistry,
    /// 最近一次输入携带的时刻（毫秒）
    clock_ms: u64,
    /// 上一帧时刻，用于换算 dt
    last_frame_ms: Option<u64>,
    /// 是否已有未兑现的帧申请
    frame_armed: bool,
    /// 在途的尺寸防抖令牌（后到覆盖先到）
    resize_token: Option<TimerToken>,
    /// 是否已收到首个带时刻的输入
    started: bool,
}

impl ScrollRuntime {
    /// 创建运行时
    pub fn new(options: RuntimeOptions) -> Self {
        let viewport = ViewportState::new(options.view_height);
        Self {
            options,
            elements: ElementStore::new(),
            viewport,
            groups: FrameGroups::new(),
            lock: ScrollLockState::new(),
            timers: TimerRegistry::new(),
            handlers: HandlerRegistry::standard(),
            clock_ms: 0,
            last_frame_ms: None,
            frame_armed: false,
            resize_token: None,
            started: false,
        }
    }

    /// 注册一批候选节点
    ///
    /// 带效果标记的节点分配 ID 并产出 `Observe` 指令，其余忽略。
    /// 重复注册（按节点键）是 no-op。
    pub fn register_document(&mut self, nodes: Vec<NodeDescriptor>) -> Vec<Command> {
        let mut out = Vec::new();
        self.register_nodes(nodes, &mut out);
        out
    }

    /// 处理一条输入，返回要执行的指令
    pub fn tick(&mut self, input: RuntimeInput) -> FxResult<Vec<Command>> {
        let mut out = Vec::new();
        match input {
            RuntimeInput::Intersections { now_ms, scroll_offset, records } => {
                self.note_clock(now_ms);
                self.process_intersections(scroll_offset, records, &mut out);
            }
            RuntimeInput::Frame { now_ms, scroll_offset } => {
                self.note_clock(now_ms);
                self.process_frame(now_ms, scroll_offset, &mut out);
            }
            RuntimeInput::TimerFired { now_ms, scroll_offset, token } => {
                self.note_clock(now_ms);
                self.process_timer(scroll_offset, token, &mut out);
            }
            RuntimeInput::Resized { view_height } => {
                self.process_resize(view_height, &mut out);
            }
            RuntimeInput::NodesAdded { nodes } => {
                self.register_nodes(nodes, &mut out);
            }
            RuntimeInput::VideoEnded { id } => {
                let el = self
                    .elements
                    .get_mut(id)
                    .ok_or(RuntimeError::UnknownElement { id })?;
                el.fx.video_ended = true;
            }
            RuntimeInput::PointerMoved { id, x } => {
                out = self.route_input(id, |handler, cx, id| handler.on_pointer(cx, id, x))?;
            }
            RuntimeInput::Wheel { id, delta_y } => {
                out = self.route_input(id, |handler, cx, id| handler.on_wheel(cx, id, delta_y))?;
            }
        }
        self.arm_frame(&mut out);
        Ok(out)
    }

    /// 整体拆除
    ///
    /// 取消全部定时器、解除输入绑定、释放滚动锁。
    /// 之后的输入不再产生效果指令。
    pub fn teardown(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        self.timers.cancel_all(&mut out);
        self.resize_token = None;
        for id in self.elements.ids() {
            let Some(el) = self.elements.get_mut(id) else { continue };
            el.fx.poll_active = false;
            el.fx.done = true;
            if el.fx.pointer_bound {
                el.fx.pointer_bound = false;
                out.push(Command::UnbindPointer { id });
            }
            if el.fx.wheel_bound {
                el.fx.wheel_bound = false;
                out.push(Command::UnbindWheel { id });
            }
        }
        if self.lock.claimant.is_some() {
            out.push(Command::UnlockWheel);
            self.lock.claimant = None;
            self.lock.tween = None;
        }
        self.groups.clear();
        self.frame_armed = false;
        debug!("运行时已拆除");
        out
    }

    /// 当前视口高度（防抖后的值）
    pub fn view_height(&self) -> f32 {
        self.viewport.view_height
    }

    /// 已注册元素数量
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    // ========== 输入处理 ==========

    fn note_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
        if !self.started {
            self.started = true;
            // 启动宽限：恢复滚动位置阶段不允许滚动劫持
            self.lock.cooldown_until_ms = now_ms + self.options.startup_grace_ms;
        }
    }

    fn register_nodes(&mut self, nodes: Vec<NodeDescriptor>, out: &mut Vec<Command>) {
        for node in nodes {
            if node.effect.is_none() {
                continue;
            }
            let node_key = node.node_key;
            let registered = self.elements.register(node);
            if registered.newly {
                out.push(Command::Observe { id: registered.id, node_key });
            }
        }
    }

    fn process_intersections(
        &mut self,
        scroll_offset: f32,
        records: Vec<IntersectionRecord>,
        out: &mut Vec<Command>,
    ) {
        // 方向从上一批次的偏移推出，并镜像到文档
        if let Some(direction) = self.viewport.direction_towards(scroll_offset) {
            if self.viewport.direction != Some(direction) {
                out.push(Command::MarkScrollDirection { direction });
            }
            self.viewport.direction = Some(direction);
        }
        self.viewport.last_scroll_offset = scroll_offset;

        for record in records {
            let action = match self.elements.get_mut(record.id) {
                Some(el) => observer::evaluate(el, &self.viewport, scroll_offset, record.is_intersecting),
                None => {
                    warn!("交叉记录引用未注册元素 {}", record.id);
                    continue;
                }
            };
            if let Some(action) = action {
                self.dispatch_transition(record.id, action, out);
            }
        }
    }

    fn process_frame(&mut self, now_ms: u64, scroll_offset: f32, out: &mut Vec<Command>) {
        self.frame_armed = false;
        let dt_ms = now_ms.saturating_sub(self.last_frame_ms.unwrap_or(now_ms)) as f32;
        self.last_frame_ms = Some(now_ms);

        self.advance_animations(dt_ms, out);
        self.advance_lock(dt_ms, now_ms, out);
        self.groups
            .step(&self.elements, &mut self.viewport, scroll_offset, out);
    }

    fn process_timer(&mut self, scroll_offset: f32, token: TimerToken, out: &mut Vec<Command>) {
        // 轮询链的带限判定要看到期时刻的偏移，而不是上一批次的
        self.viewport.last_scroll_offset = scroll_offset;
        match self.timers.take(token) {
            // 取消与到期竞争时 Host 仍可能回送已取消的令牌
            None => {}
            Some(TimerPurpose::Poll { id, action }) => {
                if let Some(el) = self.elements.get_mut(id) {
                    el.fx.poll_active = false;
                }
                self.dispatch_poll(id, action, out);
            }
            Some(TimerPurpose::ResizeDebounce { view_height }) => {
                self.resize_token = None;
                self.viewport.view_height = view_height;
                debug!("视口高度防抖落定：{view_height}");
            }
            Some(TimerPurpose::UnflagScrolled { id }) => {
                out.push(Command::RemoveClass { id, class: SCROLLED_CLASS.to_string() });
            }
        }
    }

    fn process_resize(&mut self, view_height: f32, out: &mut Vec<Command>) {
        // 后到覆盖先到：只有最后一次尺寸在防抖结束后生效
        if let Some(token) = self.resize_token.take() {
            self.timers.cancel(token, out);
        }
        let token = self.timers.schedule(
            TimerPurpose::ResizeDebounce { view_height },
            crate::config::defaults::RESIZE_DEBOUNCE,
            out,
        );
        self.resize_token = Some(token);
    }

    // ========== 分发 ==========

    fn dispatch_transition(&mut self, id: ElementId, action: Action, out: &mut Vec<Command>) {
        let Some(kind) = self.kind_of(id) else { return };
        let Some(handler) = self.handlers.get_mut(&kind) else {
            warn!("元素 {id} 的效果类型 {kind:?} 没有对应的处理器，保持惰性");
            return;
        };
        let mut cx = EffectCx {
            elements: &mut self.elements,
            viewport: &mut self.viewport,
            groups: &mut self.groups,
            lock: &mut self.lock,
            timers: &mut self.timers,
            out,
            now_ms: self.clock_ms,
        };
        handler.on_transition(&mut cx, id, action);
    }

    fn dispatch_poll(&mut self, id: ElementId, action: Action, out: &mut Vec<Command>) {
        let Some(kind) = self.kind_of(id) else { return };
        let Some(handler) = self.handlers.get_mut(&kind) else { return };
        let mut cx = EffectCx {
            elements: &mut self.elements,
            viewport: &mut self.viewport,
            groups: &mut self.groups,
            lock: &mut self.lock,
            timers: &mut self.timers,
            out,
            now_ms: self.clock_ms,
        };
        handler.on_poll(&mut cx, id, action);
    }

    fn kind_of(&self, id: ElementId) -> Option<EffectKind> {
        self.elements.get(id).map(|el| el.kind.clone())
    }

    // ========== 帧推进 ==========

    fn advance_animations(&mut self, dt_ms: f32, out: &mut Vec<Command>) {
        for id in self.elements.ids() {
            let Some(el) = self.elements.get_mut(id) else { continue };

            if let Some(timeline) = &mut el.fx.timeline {
                if timeline.is_active() {
                    let update = timeline.update(dt_ms);
                    for (property, value) in update.applied {
                        out.push(Command::ApplyStyle { id, property, value });
                    }
                    if update.completed {
                        // 完成即清掉瞬态标记，下一次真实进入重新武装
                        el.locked = false;
                        el.visible = false;
                        if !el.reiterates() {
                            el.fx.done = true;
                        }
                    }
                }
            }

            if let Some(draw) = &mut el.fx.svg {
                if draw.is_active() {
                    let update = draw.update(dt_ms);
                    for (path, progress) in update.progress.into_iter().enumerate() {
                        out.push(Command::SetPathProgress { id, path, progress });
                    }
                    if update.completed_reversed {
                        // 擦除完毕，连元素一起隐掉
                        out.push(Command::SetOpacity { id, value: 0.0 });
                    }
                }
            }

            if let Some(stagger) = &mut el.fx.stagger {
                if stagger.is_active() {
                    for letter in stagger.update(dt_ms) {
                        out.push(Command::SetLetterStyle {
                            id,
                            index: letter.index,
                            translate_y: letter.translate_y,
                            opacity: letter.opacity,
                        });
                    }
                }
            }

            if let Some(tween) = &mut el.fx.counting {
                if tween.update(dt_ms) {
                    let value = tween.current_value().round() as i64;
                    out.push(Command::SetText { id, text: value.to_string() });
                } else {
                    // 终值必须精确，不留缓动残差
                    out.push(Command::SetText { id, text: el.fx.count_target.to_string() });
                    el.fx.counting = None;
                    el.fx.counted = false;
                }
            }
        }
    }

    fn advance_lock(&mut self, dt_ms: f32, now_ms: u64, out: &mut Vec<Command>) {
        let Some(tween) = &mut self.lock.tween else { return };
        if tween.update(dt_ms) {
            out.push(Command::ScrollTo { offset: tween.current_value() });
        } else {
            out.push(Command::ScrollTo { offset: tween.final_value() });
            out.push(Command::UnlockWheel);
            let duration_ms = tween.duration_ms;
            self.lock.release(duration_ms, now_ms);
        }
    }

    fn arm_frame(&mut self, out: &mut Vec<Command>) {
        if self.frame_armed || !self.needs_frames() {
            return;
        }
        self.frame_armed = true;
        out.push(Command::RequestFrame);
    }

    fn needs_frames(&self) -> bool {
        if !self.groups.is_empty() || self.lock.is_animating() {
            return true;
        }
        self.elements.iter().any(|el| {
            el.fx.timeline.as_ref().is_some_and(|t| t.is_active())
                || el.fx.svg.as_ref().is_some_and(|s| s.is_active())
                || el.fx.stagger.as_ref().is_some_and(|s| s.is_active())
                || el.fx.counting.as_ref().is_some_and(|t| t.is_active())
        })
    }

    // ========== 交互输入 ==========

    fn route_input<F>(&mut self, id: ElementId, f: F) -> FxResult<Vec<Command>>
    where
        F: FnOnce(&mut dyn crate::handlers::EffectHandler, &mut EffectCx<'_>, ElementId),
    {
        let mut out = Vec::new();
        let kind = self
            .kind_of(id)
            .ok_or(RuntimeError::UnknownElement { id })?;
        let Some(handler) = self.handlers.get_mut(&kind) else {
            return Ok(out);
        };
        let mut cx = EffectCx {
            elements: &mut self.elements,
            viewport: &mut self.viewport,
            groups: &mut self.groups,
            lock: &mut self.lock,
            timers: &mut self.timers,
            out: &mut out,
            now_ms: self.clock_ms,
        };
        f(handler, &mut cx, id);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Geometry;

    fn node(key: u64, effect: &str, top: f32, height: f32) -> NodeDescriptor {
        NodeDescriptor {
            node_key: key,
            effect: Some(effect.to_string()),
            geometry: Geometry {
                offset_top: top,
                height,
                offset_left: 0.0,
                width: 600.0,
            },
            ..Default::default()
        }
    }

    fn runtime() -> ScrollRuntime {
        ScrollRuntime::new(RuntimeOptions {
            view_height: 800.0,
            startup_grace_ms: 0,
        })
    }

    fn observe_ids(commands: &[Command]) -> Vec<ElementId> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Observe { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn intersect(
        rt: &mut ScrollRuntime,
        id: ElementId,
        now_ms: u64,
        scroll: f32,
        is_intersecting: bool,
    ) -> Vec<Command> {
        rt.tick(RuntimeInput::Intersections {
            now_ms,
            scroll_offset: scroll,
            records: vec![IntersectionRecord { id, is_intersecting }],
        })
        .unwrap()
    }

    fn frame(rt: &mut ScrollRuntime, now_ms: u64, scroll: f32) -> Vec<Command> {
        rt.tick(RuntimeInput::Frame { now_ms, scroll_offset: scroll }).unwrap()
    }

    #[test]
    fn test_register_document_observes_tagged_nodes() {
        let mut rt = runtime();
        let mut nodes = vec![node(1, "parallax", 0.0, 100.0)];
        nodes.push(NodeDescriptor { node_key: 2, ..Default::default() });
        let out = rt.register_document(nodes);

        assert_eq!(observe_ids(&out), vec![ElementId(0)]);
        assert_eq!(rt.element_count(), 1);

        // 重复注册同一节点键是 no-op
        let again = rt.register_document(vec![node(1, "parallax", 0.0, 100.0)]);
        assert!(again.is_empty());
        assert_eq!(rt.element_count(), 1);
    }

    #[test]
    fn test_unknown_effect_is_inert() {
        let mut rt = runtime();
        let out = rt.register_document(vec![node(1, "wobble", 0.0, 100.0)]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 0.0, true);
        assert!(out.is_empty());
    }

    #[test]
    fn test_parallax_frame_loop() {
        let mut rt = runtime();
        let out = rt.register_document(vec![node(1, "parallax", 1000.0, 200.0)]);
        let id = observe_ids(&out)[0];

        // 进入视差组后申请帧
        let out = intersect(&mut rt, id, 0, 400.0, true);
        assert!(out.contains(&Command::RequestFrame));

        // 偏移变化：产出位移并续帧
        let out = frame(&mut rt, 16, 450.0);
        assert!(out.iter().any(|c| matches!(c, Command::SetTransform { .. })));
        assert!(out.contains(&Command::RequestFrame));

        // 偏移不变：零条位置指令，仍续帧
        let out = frame(&mut rt, 32, 450.0);
        assert!(!out.iter().any(|c| matches!(c, Command::SetTransform { .. })));
        assert!(out.contains(&Command::RequestFrame));

        // 离开后分组排空，帧循环停止
        intersect(&mut rt, id, 48, 2000.0, false);
        let out = frame(&mut rt, 64, 2000.0);
        assert!(!out.contains(&Command::RequestFrame));
    }

    #[test]
    fn test_screen_jacker_mutual_exclusion() {
        let mut rt = runtime();
        let out = rt.register_document(vec![
            node(1, "screen-jacker", 1200.0, 400.0),
            node(2, "screen-jacker", 1290.0, 400.0),
        ]);
        let ids = observe_ids(&out);

        // 第一个元素边缘进入：接管
        let out = intersect(&mut rt, ids[0], 100, 500.0, true);
        assert!(out.contains(&Command::LockWheel));

        // 持锁期间第二个元素的申请无声被拒
        let out = intersect(&mut rt, ids[1], 120, 520.0, true);
        assert!(!out.contains(&Command::LockWheel));
        assert!(!out.iter().any(|c| matches!(c, Command::ScrollTo { .. })));
    }

    #[test]
    fn test_screen_jacker_scrolls_then_releases() {
        let mut rt = runtime();
        let out = rt.register_document(vec![node(1, "screen-jacker", 1200.0, 400.0)]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 500.0, true);
        assert!(out.contains(&Command::LockWheel));
        assert!(out.contains(&Command::RequestFrame));

        // 接管中逐帧滚动
        frame(&mut rt, 0, 500.0);
        let out = frame(&mut rt, 250, 500.0);
        assert!(out.iter().any(|c| matches!(c, Command::ScrollTo { .. })));

        // 时长（默认 500ms）用尽：落到精确目标并解锁
        let out = frame(&mut rt, 600, 900.0);
        assert!(out.contains(&Command::ScrollTo { offset: 1200.0 }));
        assert!(out.contains(&Command::UnlockWheel));

        // 冷却期内重新申请被拒
        intersect(&mut rt, id, 620, 1200.0, false);
        let out = intersect(&mut rt, id, 650, 500.0, true);
        assert!(!out.contains(&Command::LockWheel));
    }

    #[test]
    fn test_counter_lands_on_exact_target() {
        let mut rt = runtime();
        let mut n = node(1, "counter", 100.0, 100.0);
        n.text = Some("1234".to_string());
        n.options = Some("duration:1000".to_string());
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 0.0, true);
        assert!(out.contains(&Command::RequestFrame));

        frame(&mut rt, 0, 0.0);
        let mid = frame(&mut rt, 500, 0.0);
        let mid_text = mid.iter().find_map(|c| match c {
            Command::SetText { text, .. } => Some(text.clone()),
            _ => None,
        });
        let mid_value: i64 = mid_text.unwrap().parse().unwrap();
        assert!(mid_value > 0 && mid_value < 1234);

        // 终帧写入精确目标值
        let done = frame(&mut rt, 1100, 0.0);
        assert!(done.contains(&Command::SetText { id, text: "1234".to_string() }));

        // 计数结束后不再产出文本
        let idle = frame(&mut rt, 1200, 0.0);
        assert!(!idle.iter().any(|c| matches!(c, Command::SetText { .. })));
    }

    #[test]
    fn test_counter_non_numeric_falls_back() {
        let mut rt = runtime();
        let mut n = node(1, "counter", 100.0, 100.0);
        n.text = Some("많이".to_string());
        n.options = Some("duration:100".to_string());
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        intersect(&mut rt, id, 0, 0.0, true);
        frame(&mut rt, 0, 0.0);
        let done = frame(&mut rt, 200, 0.0);
        assert!(done.contains(&Command::SetText { id, text: "100".to_string() }));
    }

    #[test]
    fn test_sequence_timeline_built_once_and_steps_apply() {
        let mut rt = runtime();
        let mut n = node(1, "sequence", 300.0, 200.0);
        n.sequence = Some("duration:500;opacity:0;duration:300;translateY:50px".to_string());
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        // 中心在触发带内：直接开播并锁定
        let out = intersect(&mut rt, id, 0, 0.0, true);
        assert!(out.iter().any(|c| matches!(c, Command::ScheduleTimer { .. })));
        assert!(out.contains(&Command::RequestFrame));

        // 第一步属性在首帧落地
        let out = frame(&mut rt, 0, 0.0);
        assert!(out.contains(&Command::ApplyStyle {
            id,
            property: "opacity".to_string(),
            value: "0".to_string(),
        }));

        // 跨过第一步边界进入第二步
        let out = frame(&mut rt, 600, 0.0);
        assert!(out.contains(&Command::ApplyStyle {
            id,
            property: "translateY".to_string(),
            value: "50px".to_string(),
        }));

        // 播完后锁定与可见标记被清除，元素可以重新进入
        frame(&mut rt, 900, 0.0);
        let el = rt.elements.get(id).unwrap();
        assert!(el.fx.timeline.is_some());
        assert!(!el.locked);
        assert!(!el.visible);
    }

    #[test]
    fn test_animation_classes_toggle_in_band() {
        let mut rt = runtime();
        let mut n = node(1, "animation", 300.0, 200.0);
        n.options = Some("animationEnter:bounceIn".to_string());
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        // 中心 400 落在 [200, 600] 带内：立即加 class
        let out = intersect(&mut rt, id, 0, 0.0, true);
        assert!(out.contains(&Command::AddClass { id, class: "animate__animated".to_string() }));
        assert!(out.contains(&Command::AddClass { id, class: "animate__bounceIn".to_string() }));
    }

    #[test]
    fn test_poll_chain_single_inflight() {
        let mut rt = runtime();
        // 中心 800 在带外，链要等元素滚进触发带
        let out = rt.register_document(vec![node(1, "animation", 700.0, 200.0)]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 0.0, true);
        let token = out
            .iter()
            .find_map(|c| match c {
                Command::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap();

        // 链在途时新的过渡不会再开一条
        let out = intersect(&mut rt, id, 10, 0.0, false);
        assert!(!out.iter().any(|c| matches!(c, Command::ScheduleTimer { .. })));

        // 链的一步之后重新预约
        let out = rt
            .tick(RuntimeInput::TimerFired { now_ms: 110, scroll_offset: 0.0, token })
            .unwrap();
        assert!(out.iter().any(|c| matches!(c, Command::ScheduleTimer { .. })));
    }

    #[test]
    fn test_poll_chain_sees_scroll_between_batches() {
        let mut rt = runtime();
        let mut n = node(1, "animation", 1500.0, 200.0);
        n.options = Some("animationEnter:fadeIn".to_string());
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        // 进入视口时中心 850 在带外：不加 class，只预约轮询
        let out = intersect(&mut rt, id, 0, 750.0, true);
        assert!(!out.iter().any(|c| matches!(c, Command::AddClass { .. })));
        let token = out
            .iter()
            .find_map(|c| match c {
                Command::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap();

        // 两次交叉批次之间滚动继续前进，链的一步要看到期时刻的
        // 偏移：中心 300 已落入 [200, 600] 带内
        let out = rt
            .tick(RuntimeInput::TimerFired { now_ms: 100, scroll_offset: 1300.0, token })
            .unwrap();
        assert!(out.contains(&Command::AddClass { id, class: "animate__animated".to_string() }));
        assert!(out.contains(&Command::AddClass { id, class: "animate__fadeIn".to_string() }));
    }

    #[test]
    fn test_resize_debounce_latest_wins() {
        let mut rt = runtime();
        let first = rt.tick(RuntimeInput::Resized { view_height: 900.0 }).unwrap();
        let first_token = match first[0] {
            Command::ScheduleTimer { token, .. } => token,
            ref other => panic!("意外指令 {other:?}"),
        };

        let second = rt.tick(RuntimeInput::Resized { view_height: 1000.0 }).unwrap();
        assert!(second.contains(&Command::CancelTimer { token: first_token }));
        let second_token = second
            .iter()
            .find_map(|c| match c {
                Command::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap();

        // 防抖未落定前高度不变
        assert_eq!(rt.view_height(), 800.0);
        rt.tick(RuntimeInput::TimerFired { now_ms: 250, scroll_offset: 0.0, token: second_token })
            .unwrap();
        assert_eq!(rt.view_height(), 1000.0);

        // 已取消的令牌到期是无害的
        rt.tick(RuntimeInput::TimerFired { now_ms: 260, scroll_offset: 0.0, token: first_token })
            .unwrap();
        assert_eq!(rt.view_height(), 1000.0);
    }

    #[test]
    fn test_video_scroll_scrub_releases_at_bounds() {
        let mut rt = runtime();
        let mut n = node(1, "video-scroll", 100.0, 400.0);
        n.video_duration = Some(2.0);
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 0.0, true);
        assert!(out.contains(&Command::PrepareVideoScrub { id }));
        assert!(out.contains(&Command::BindWheel { id }));

        let out = rt.tick(RuntimeInput::Wheel { id, delta_y: 1.0 }).unwrap();
        assert!(out.iter().any(|c| matches!(c, Command::SetVideoTime { .. })));

        // 刷回起点再越界：交还滚轮
        rt.tick(RuntimeInput::Wheel { id, delta_y: -1.0 }).unwrap();
        let out = rt.tick(RuntimeInput::Wheel { id, delta_y: -1.0 }).unwrap();
        assert!(out.contains(&Command::UnbindWheel { id }));
    }

    #[test]
    fn test_video_360_pointer_maps_position() {
        let mut rt = runtime();
        let mut n = node(1, "video-360", 100.0, 400.0);
        n.video_duration = Some(10.0);
        n.geometry.offset_left = 100.0;
        n.geometry.width = 400.0;
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        intersect(&mut rt, id, 0, 0.0, true);
        let out = rt.tick(RuntimeInput::PointerMoved { id, x: 300.0 }).unwrap();
        assert!(out.contains(&Command::SetVideoTime { id, seconds: 5.0 }));
    }

    #[test]
    fn test_video_focus_play_resets_after_ended() {
        let mut rt = runtime();
        let mut n = node(1, "video-focus-play", 100.0, 400.0);
        n.video_duration = Some(2.0);
        let out = rt.register_document(vec![n]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 0.0, true);
        assert!(out.contains(&Command::PlayVideo { id }));

        // 未播完就离开：暂停
        let out = intersect(&mut rt, id, 10, 1000.0, false);
        assert!(out.contains(&Command::PauseVideo { id }));

        // 播完后离开：归零
        intersect(&mut rt, id, 20, 0.0, true);
        rt.tick(RuntimeInput::VideoEnded { id }).unwrap();
        let out = intersect(&mut rt, id, 30, 1000.0, false);
        assert!(out.contains(&Command::StopVideo { id }));
        assert!(!out.contains(&Command::PauseVideo { id }));
    }

    #[test]
    fn test_unknown_element_input_is_error() {
        let mut rt = runtime();
        let err = rt
            .tick(RuntimeInput::PointerMoved { id: ElementId(99), x: 0.0 })
            .unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownElement { id } if id == ElementId(99)));
    }

    #[test]
    fn test_teardown_cancels_and_unbinds() {
        let mut rt = runtime();
        let mut scrub = node(1, "video-scroll", 100.0, 400.0);
        scrub.video_duration = Some(2.0);
        let out = rt.register_document(vec![scrub, node(2, "animation", 700.0, 200.0)]);
        let ids = observe_ids(&out);

        intersect(&mut rt, ids[0], 0, 0.0, true);
        intersect(&mut rt, ids[1], 10, 0.0, true);

        let out = rt.teardown();
        assert!(out.iter().any(|c| matches!(c, Command::CancelTimer { .. })));
        assert!(out.contains(&Command::UnbindWheel { id: ids[0] }));
        assert!(rt.timers.is_empty());
    }

    #[test]
    fn test_direction_marked_on_change_only() {
        let mut rt = runtime();
        let out = rt.register_document(vec![node(1, "parallax", 1000.0, 200.0)]);
        let id = observe_ids(&out)[0];

        let out = intersect(&mut rt, id, 0, 400.0, true);
        assert!(out.contains(&Command::MarkScrollDirection {
            direction: crate::viewport::ScrollDirection::Down
        }));

        // 同方向继续滚动不再重复标记
        let out = intersect(&mut rt, id, 20, 500.0, true);
        assert!(!out.iter().any(|c| matches!(c, Command::MarkScrollDirection { .. })));
    }
}
