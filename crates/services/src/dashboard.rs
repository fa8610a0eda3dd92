//! Static content for the overview page and laid-out graph scenes.

use tracing::warn;

use graphguard_core::graph::{
    Graph, GraphError, Layout, LayoutParams, force_layout, knowledge_graph, subject_graph,
};
use graphguard_core::model::SubjectId;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: &'static str,
    pub trend: Trend,
    pub trend_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub headline: &'static str,
    pub detail: &'static str,
}

/// A graph together with its computed positions.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphScene {
    pub graph: Graph,
    pub layout: Layout,
}

#[must_use]
pub fn metric_cards() -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "图谱总节点数",
            value: "3,728,541",
            trend: Trend::Up,
            trend_label: "↑ 2.3%",
        },
        MetricCard {
            title: "今日风控预警数",
            value: "127",
            trend: Trend::Down,
            trend_label: "↓ 15.6%",
        },
        MetricCard {
            title: "模型识别准确率",
            value: "98.7%",
            trend: Trend::Flat,
            trend_label: "→ 持平",
        },
        MetricCard {
            title: "欺诈拦截成功率",
            value: "92.5%",
            trend: Trend::Up,
            trend_label: "↑ 3.2%",
        },
    ]
}

#[must_use]
pub fn capabilities() -> Vec<Capability> {
    vec![
        Capability {
            headline: "超大规模关系发现",
            detail: "Neo4j原生存储，支持千万级节点实时关联挖掘。",
        },
        Capability {
            headline: "109维动态特征矩阵",
            detail: "不仅包含用户基本画像，更深度挖掘时序行为、地理重合及社交团伙特征。",
        },
        Capability {
            headline: "自研图模型架构",
            detail: "融合GraphSAGE与注意力机制，在样本极度不平衡的情况下仍保持98%以上的识别率。",
        },
        Capability {
            headline: "闭环风控链路",
            detail: "从特征自动生成到模型自动调优，实现端到端的自动化风控决策。",
        },
    ]
}

/// Overview knowledge graph, laid out for the large canvas.
///
/// # Errors
///
/// Returns `DashboardError::GraphUnavailable` if the graph cannot be built or
/// laid out.
pub fn knowledge_scene() -> Result<GraphScene, DashboardError> {
    scene(knowledge_graph(), LayoutParams::overview())
}

/// Relation graph for one subject.
///
/// # Errors
///
/// Returns `DashboardError::GraphUnavailable` if the graph cannot be built or
/// laid out.
pub fn subject_scene(subject: &SubjectId) -> Result<GraphScene, DashboardError> {
    scene(subject_graph(subject), LayoutParams::subject())
}

fn scene(
    graph: Result<Graph, GraphError>,
    params: LayoutParams,
) -> Result<GraphScene, DashboardError> {
    let build = || -> Result<GraphScene, GraphError> {
        let graph = graph?;
        let layout = force_layout(&graph, params)?;
        Ok(GraphScene { graph, layout })
    };
    build().map_err(|err| {
        warn!(error = %err, "graph scene unavailable");
        DashboardError::GraphUnavailable(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_has_four_metrics() {
        let cards = metric_cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[1].trend, Trend::Down);
    }

    #[test]
    fn knowledge_scene_positions_every_node() {
        let scene = knowledge_scene().unwrap();
        assert_eq!(scene.layout.positions.len(), scene.graph.nodes().len());
    }

    #[test]
    fn subject_scene_uses_subject_label() {
        let subject = SubjectId::parse("USER_001").unwrap();
        let scene = subject_scene(&subject).unwrap();
        assert_eq!(scene.graph.nodes()[0].name, "用户: USER_001");
    }

    #[test]
    fn broken_graph_maps_to_unavailable() {
        let err = scene(Err(GraphError::Layout), LayoutParams::overview()).unwrap_err();
        assert!(matches!(err, DashboardError::GraphUnavailable(GraphError::Layout)));
    }
}
