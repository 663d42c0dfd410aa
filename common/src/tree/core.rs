use crate::db::indices::{NodeId, SchematicComponentId};
use crate::geom::point::Point;
use crate::util::config::LayoutConfig;

#[derive(Clone, Debug)]
pub struct GroupData {
    pub name: String,
    pub is_subcircuit: bool,
    pub layout: LayoutConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TraceHintData {
    pub port_selector: String,
    pub offsets: Vec<Point<f64>>,
}

#[derive(Clone, Debug)]
pub struct TraceData {
    pub name: String,
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug)]
pub struct ComponentData {
    pub name: String,
    pub schematic_component: Option<SchematicComponentId>,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Group(GroupData),
    TraceHint(TraceHintData),
    Trace(TraceData),
    Component(ComponentData),
}

impl NodeKind {
    pub fn as_group(&self) -> Option<&GroupData> {
        match self {
            NodeKind::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_trace_hint(&self) -> Option<&TraceHintData> {
        match self {
            NodeKind::TraceHint(h) => Some(h),
            _ => None,
        }
    }

    pub fn is_trace(&self) -> bool {
        matches!(self, NodeKind::Trace(_))
    }

    pub fn is_trace_hint(&self) -> bool {
        matches!(self, NodeKind::TraceHint(_))
    }

    /// Typed accessor for the schematic association of a node. Only
    /// `Component` nodes can carry one.
    pub fn schematic_component(&self) -> Option<SchematicComponentId> {
        match self {
            NodeKind::Component(c) => c.schematic_component,
            _ => None,
        }
    }
}

pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(1000),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn add_root(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn group(&self, id: NodeId) -> Option<&GroupData> {
        self.nodes[id.index()].kind.as_group()
    }

    /// All groups in the tree, in creation order.
    pub fn groups(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Group(_)))
            .map(|(i, _)| NodeId::new(i))
            .collect()
    }

    /// Preorder traversal of everything below `id`, excluding `id` itself.
    /// Child order is insertion order, so the result is stable across calls.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.index()]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            for &child in self.nodes[n.index()].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn traces_under(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.nodes[n.index()].kind.is_trace())
            .collect()
    }

    pub fn trace_hints_under(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.nodes[n.index()].kind.is_trace_hint())
            .collect()
    }
}
