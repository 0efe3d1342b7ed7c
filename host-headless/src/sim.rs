//! # Sim 模块
//!
//! 脚本化滚动会话模拟器。
//!
//! 扮演一个最小 Host：维护模拟时钟、滚动偏移、交叉状态、
//! 定时器队列和帧申请标记，把运行时产出的调度类指令兑现，
//! 其余指令记入会话日志。整个会话是确定性的，同一页面
//! 描述与同一滚动脚本产出完全相同的日志。

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use anyhow::{Context, bail};
use tracing::{debug, info};

use fx_runtime::{
    Command, ElementId, IntersectionRecord, NodeDescriptor, RuntimeInput, RuntimeOptions,
    ScrollRuntime, TimerToken,
};

/// 滚动会话模拟器
pub struct Simulator {
    runtime: ScrollRuntime,
    /// 元素 ID -> 节点描述（交叉判定用）
    nodes: HashMap<ElementId, NodeDescriptor>,
    /// 元素当前的交叉状态
    intersecting: HashMap<ElementId, bool>,
    /// (到期时刻, 令牌) 最小堆
    timers: BinaryHeap<Reverse<(u64, TimerToken)>>,
    cancelled: HashSet<TimerToken>,
    frame_requested: bool,
    view_height: f32,
    scroll: f32,
    clock_ms: u64,
    /// 效果类指令的会话日志
    log: Vec<String>,
}

impl Simulator {
    /// 用页面描述创建模拟器并完成注册
    pub fn new(page: Vec<NodeDescriptor>, view_height: f32) -> anyhow::Result<Self> {
        let by_key: HashMap<u64, NodeDescriptor> =
            page.iter().map(|n| (n.node_key, n.clone())).collect();
        let mut runtime = ScrollRuntime::new(RuntimeOptions {
            view_height,
            ..RuntimeOptions::default()
        });
        let observed = runtime.register_document(page);

        let mut sim = Self {
            runtime,
            nodes: HashMap::new(),
            intersecting: HashMap::new(),
            timers: BinaryHeap::new(),
            cancelled: HashSet::new(),
            frame_requested: false,
            view_height,
            scroll: 0.0,
            clock_ms: 0,
            log: Vec::new(),
        };
        for command in observed {
            match command {
                Command::Observe { id, node_key } => {
                    let node = by_key
                        .get(&node_key)
                        .with_context(|| format!("Observe 指令引用未知节点键 {node_key}"))?;
                    sim.nodes.insert(id, node.clone());
                    sim.intersecting.insert(id, false);
                }
                other => sim.execute(other)?,
            }
        }
        info!("开始观察 {} 个元素", sim.nodes.len());
        Ok(sim)
    }

    /// 匀速滚动到目标偏移
    ///
    /// 每 `step_ms` 推进一步：先兑付到期定时器，再投递交叉
    /// 变化批次，最后兑付未决的帧申请。
    pub fn scroll_to(
        &mut self,
        target: f32,
        duration_ms: u64,
        step_ms: u64,
    ) -> anyhow::Result<()> {
        if step_ms == 0 {
            bail!("步长不能为 0");
        }
        let from = self.scroll;
        let steps = (duration_ms / step_ms).max(1);
        for i in 0..=steps {
            self.clock_ms += step_ms;
            self.scroll = from + (target - from) * (i as f32 / steps as f32);
            self.fire_due_timers()?;
            self.deliver_intersections()?;
            self.deliver_frame()?;
        }
        Ok(())
    }

    /// 原地等待（只推时钟，兑付定时器和帧）
    pub fn idle(&mut self, duration_ms: u64, step_ms: u64) -> anyhow::Result<()> {
        let deadline = self.clock_ms + duration_ms;
        while self.clock_ms < deadline {
            self.clock_ms += step_ms.max(1);
            self.fire_due_timers()?;
            self.deliver_frame()?;
        }
        Ok(())
    }

    /// 结束会话
    pub fn teardown(&mut self) -> anyhow::Result<()> {
        let commands = self.runtime.teardown();
        for command in commands {
            self.execute(command)?;
        }
        Ok(())
    }

    /// 会话日志（效果类指令的文本形式）
    pub fn log(&self) -> &[String] {
        &self.log
    }

    fn fire_due_timers(&mut self) -> anyhow::Result<()> {
        while let Some(&Reverse((due, token))) = self.timers.peek() {
            if due > self.clock_ms {
                break;
            }
            self.timers.pop();
            if self.cancelled.remove(&token) {
                continue;
            }
            let out = self.runtime.tick(RuntimeInput::TimerFired {
                now_ms: self.clock_ms,
                scroll_offset: self.scroll,
                token,
            })?;
            self.execute_all(out)?;
        }
        Ok(())
    }

    fn deliver_intersections(&mut self) -> anyhow::Result<()> {
        let mut records = Vec::new();
        let mut ids: Vec<ElementId> = self.nodes.keys().copied().collect();
        ids.sort();
        for id in ids {
            let node = &self.nodes[&id];
            let top = node.geometry.offset_top - self.scroll;
            let now = top < self.view_height && top + node.geometry.height > 0.0;
            let before = self.intersecting.insert(id, now).unwrap_or(false);
            if now != before {
                records.push(IntersectionRecord { id, is_intersecting: now });
            }
        }
        if records.is_empty() {
            return Ok(());
        }
        let out = self.runtime.tick(RuntimeInput::Intersections {
            now_ms: self.clock_ms,
            scroll_offset: self.scroll,
            records,
        })?;
        self.execute_all(out)
    }

    fn deliver_frame(&mut self) -> anyhow::Result<()> {
        if !self.frame_requested {
            return Ok(());
        }
        self.frame_requested = false;
        let out = self.runtime.tick(RuntimeInput::Frame {
            now_ms: self.clock_ms,
            scroll_offset: self.scroll,
        })?;
        self.execute_all(out)
    }

    fn execute_all(&mut self, commands: Vec<Command>) -> anyhow::Result<()> {
        for command in commands {
            self.execute(command)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::ScheduleTimer { token, delay_ms } => {
                self.timers.push(Reverse((self.clock_ms + delay_ms, token)));
            }
            Command::CancelTimer { token } => {
                self.cancelled.insert(token);
            }
            Command::RequestFrame => {
                self.frame_requested = true;
            }
            Command::ScrollTo { offset } => {
                // 接管滚动：偏移直接跳到运行时指定的位置
                self.scroll = offset;
                self.log.push(format!("ScrollTo {offset:.1}"));
            }
            other => {
                debug!("[{:>6}ms] {other:?}", self.clock_ms);
                self.log.push(format!("{other:?}"));
            }
        }
        Ok(())
    }
}
