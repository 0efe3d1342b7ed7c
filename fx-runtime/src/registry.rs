//! # Registry 模块
//!
//! 元素注册表：发现效果标记节点，分配稳定 ID，
//! 挂载解析后的配置与运行时状态。
//!
//! ## 契约
//!
//! - `register(node) -> ElementId`：分配下一个连续 ID 并开始观察
//! - 幂等：按 Host 节点键判断，重复注册同一节点是 no-op
//! - 元素从不销毁；注销只发生在整体 teardown

use std::collections::BTreeMap;
use std::collections::HashMap;

use tracing::debug;

use crate::element::{ElementId, ObservedElement};
use crate::input::NodeDescriptor;

/// 注册结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registered {
    /// 分配（或已存在）的元素 ID
    pub id: ElementId,
    /// 本次调用是否真的新建了元素
    pub newly: bool,
}

/// 元素注册表
///
/// 按 ID 有序存储，保证遍历与指令产出的确定性。
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: BTreeMap<ElementId, ObservedElement>,
    /// Host 节点键 -> 元素 ID（幂等注册索引）
    by_node_key: HashMap<u64, ElementId>,
    next_id: u64,
}

impl ElementStore {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个节点
    ///
    /// 已注册的节点键直接返回现有 ID（no-op）。
    pub fn register(&mut self, node: NodeDescriptor) -> Registered {
        if let Some(&id) = self.by_node_key.get(&node.node_key) {
            return Registered { id, newly: false };
        }
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.by_node_key.insert(node.node_key, id);
        let element = ObservedElement::new(id, node);
        debug!("注册元素 {id}，效果 {:?}", element.kind);
        self.elements.insert(id, element);
        Registered { id, newly: true }
    }

    /// 按 ID 取元素
    pub fn get(&self, id: ElementId) -> Option<&ObservedElement> {
        self.elements.get(&id)
    }

    /// 按 ID 取可变元素
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ObservedElement> {
        self.elements.get_mut(&id)
    }

    /// 已注册元素数量
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// 按 ID 升序收集全部 ID
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.keys().copied().collect()
    }

    /// 按 ID 升序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ObservedElement> {
        self.elements.values()
    }
}
