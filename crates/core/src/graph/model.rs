use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("edge references unknown node: {0}")]
    UnknownEndpoint(String),
    #[error("layout produced non-finite coordinates")]
    Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Normal,
    Fraudster,
    Background,
    Subject,
    Feature,
    Contact,
    Device,
    Risk,
}

impl NodeCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NodeCategory::Normal => "正常用户",
            NodeCategory::Fraudster => "欺诈者",
            NodeCategory::Background => "背景节点",
            NodeCategory::Subject => "用户",
            NodeCategory::Feature => "特征",
            NodeCategory::Contact => "关联方",
            NodeCategory::Device => "设备",
            NodeCategory::Risk => "风险",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            NodeCategory::Normal | NodeCategory::Subject => "#165DFF",
            NodeCategory::Fraudster | NodeCategory::Risk => "#FF4D4F",
            NodeCategory::Background => "#8C8C8C",
            NodeCategory::Feature => "#36F1CD",
            NodeCategory::Contact | NodeCategory::Device => "#FF9F43",
        }
    }

    /// Nodes that the risk highlight lights up.
    #[must_use]
    pub fn is_risky(self) -> bool {
        matches!(self, NodeCategory::Fraudster | NodeCategory::Risk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeCategory {
    Normal,
    Abnormal,
    Suspicious,
    Link,
}

impl EdgeCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EdgeCategory::Normal => "正常交易",
            EdgeCategory::Abnormal => "异常交易",
            EdgeCategory::Suspicious => "可疑关联",
            EdgeCategory::Link => "关联",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            EdgeCategory::Normal => "#165DFF",
            EdgeCategory::Abnormal => "#FF9F43",
            EdgeCategory::Suspicious => "#FF4D4F",
            EdgeCategory::Link => "#E2E8F0",
        }
    }

    #[must_use]
    pub fn dashed(self) -> bool {
        matches!(self, EdgeCategory::Abnormal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub category: NodeCategory,
    /// Rendered radius in px.
    pub size: f64,
    pub status: Option<String>,
}

impl Node {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: NodeCategory,
        size: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            size,
            status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Hover text: the name, followed by the status when one is known.
    #[must_use]
    pub fn tooltip(&self) -> String {
        match &self.status {
            Some(status) => format!("{}: {status}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub category: EdgeCategory,
}

impl Edge {
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        weight: f64,
        category: EdgeCategory,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            category,
        }
    }

    #[must_use]
    pub fn tooltip(&self) -> String {
        format!("关系: {} 关联强度: {}", self.category.label(), self.weight)
    }
}

/// Validated node/edge list: ids are unique and every edge endpoint exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Edge endpoints resolved to node indices, parallel to `edges`.
    endpoints: Vec<(usize, usize)>,
}

impl Graph {
    /// # Errors
    ///
    /// Returns `GraphError::DuplicateNode` or `GraphError::UnknownEndpoint`.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id.as_str(), position).is_some() {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let lookup = |id: &str| {
            index
                .get(id)
                .copied()
                .ok_or_else(|| GraphError::UnknownEndpoint(id.to_string()))
        };
        let endpoints = edges
            .iter()
            .map(|edge| Ok((lookup(&edge.source)?, lookup(&edge.target)?)))
            .collect::<Result<Vec<_>, GraphError>>()?;

        Ok(Self {
            nodes,
            edges,
            endpoints,
        })
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
