//! 方法树
//!
//! 把平面的方法行集合重建为树。节点放在索引稳定的竞技场
//! （arena）里，父子关系用下标表达，避免嵌套所有权；
//! 换发新标识只是对竞技场做一次重新编键的扫描。
//!
//! 树键（[`MethodTree::key`]）与节点携带的源方法 ID 是两套
//! 标识：克隆规划把树键当作目标侧的新方法 ID 使用，而
//! `data` 里的实体保留源侧 ID 供查找与删除。

use std::collections::HashMap;

use crate::domain::entities::{MakeMethod, MethodMaterial};
use crate::domain::value_objects::{MakeMethodId, MaterialId};

/// 一行待重建的方法数据
///
/// `parent_method_id` 由仓储在加载时通过父物料行反查得出，
/// 根行为空。
#[derive(Debug, Clone)]
pub struct MethodTreeRow {
    /// 父方法 ID，根为空
    pub parent_method_id: Option<MakeMethodId>,
    /// 方法节点
    pub method: MakeMethod,
    /// 节点下的物料行
    pub materials: Vec<MethodMaterial>,
}

/// 节点负载
#[derive(Debug, Clone)]
pub struct MethodNodeData {
    /// 方法节点（保留源侧 ID）
    pub method: MakeMethod,
    /// 节点下的物料行
    pub materials: Vec<MethodMaterial>,
}

/// 竞技场节点
///
/// `data` 为空表示悬挂引用产生的占位节点：某行引用的父键
/// 从未以行的形式出现。遍历方必须容忍无负载节点。
#[derive(Debug, Clone)]
struct MethodNode {
    key: MakeMethodId,
    parent: Option<usize>,
    children: Vec<usize>,
    data: Option<MethodNodeData>,
}

/// 方法树
#[derive(Debug, Clone, Default)]
pub struct MethodTree {
    nodes: Vec<MethodNode>,
    index: HashMap<MakeMethodId, usize>,
}

impl MethodTree {
    /// 从平面行集合重建树
    ///
    /// 行顺序无关：子行先于父行出现时先建占位节点，父行到达
    /// 后补上负载。行引用的父键若始终没有对应行，占位节点保持
    /// 无负载并成为根。
    pub fn from_rows(rows: Vec<MethodTreeRow>) -> Self {
        let mut tree = Self::default();
        for row in rows {
            let key = row.method.id().clone();
            let node_idx = tree.ensure_node(key);
            tree.nodes[node_idx].data = Some(MethodNodeData {
                method: row.method,
                materials: row.materials,
            });
            if let Some(parent_key) = row.parent_method_id {
                let parent_idx = tree.ensure_node(parent_key);
                tree.nodes[node_idx].parent = Some(parent_idx);
                if !tree.nodes[parent_idx].children.contains(&node_idx) {
                    tree.nodes[parent_idx].children.push(node_idx);
                }
            }
        }
        tree
    }

    fn ensure_node(&mut self, key: MakeMethodId) -> usize {
        if let Some(idx) = self.index.get(&key) {
            return *idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(MethodNode {
            key: key.clone(),
            parent: None,
            children: Vec::new(),
            data: None,
        });
        self.index.insert(key, idx);
        idx
    }

    /// 为每个节点换发全新的 UUIDv7 树键
    ///
    /// 每次扫描都重新生成，绝不复用上一次扫描发出的键，
    /// 同一棵源树因此可以安全地向多个目标克隆。
    pub fn reidentify(&mut self) {
        self.index.clear();
        for idx in 0..self.nodes.len() {
            let key = MakeMethodId::new();
            self.nodes[idx].key = key.clone();
            self.index.insert(key, idx);
        }
    }

    /// 根节点下标（含无负载的占位根）
    pub fn roots(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 节点的当前树键
    pub fn key(&self, idx: usize) -> &MakeMethodId {
        &self.nodes[idx].key
    }

    /// 节点负载，占位节点返回空
    pub fn data(&self, idx: usize) -> Option<&MethodNodeData> {
        self.nodes[idx].data.as_ref()
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].children
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].parent
    }

    /// 按树键查节点
    pub fn find_by_key(&self, key: &MakeMethodId) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// 按源方法 ID 查节点
    pub fn find_by_source_id(&self, method_id: &MakeMethodId) -> Option<usize> {
        self.nodes.iter().position(|node| {
            node.data
                .as_ref()
                .is_some_and(|data| data.method.id() == method_id)
        })
    }

    /// 在子节点中找以指定源物料行为父锚点的子方法
    pub fn child_for_material(&self, idx: usize, material_id: &MaterialId) -> Option<usize> {
        self.nodes[idx].children.iter().copied().find(|child_idx| {
            self.nodes[*child_idx].data.as_ref().is_some_and(|data| {
                data.method.parent_material_id() == Some(material_id)
            })
        })
    }

    /// 先序遍历下标序列（父先于子）
    pub fn preorder(&self, start: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            for child_idx in self.nodes[idx].children.iter().rev() {
                stack.push(*child_idx);
            }
        }
        out
    }

    /// 树中全部源方法 ID（跳过占位节点）
    pub fn source_method_ids(&self) -> Vec<MakeMethodId> {
        self.nodes
            .iter()
            .filter_map(|node| node.data.as_ref().map(|data| data.method.id().clone()))
            .collect()
    }
}
