use super::model::{Edge, EdgeCategory, Graph, Node};

const ZOOM_IN: f64 = 1.2;
const ZOOM_OUT: f64 = 0.8;
const MIN_ZOOM: f64 = 0.25;
const MAX_ZOOM: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphCommand {
    ZoomIn,
    ZoomOut,
    ToggleRiskHighlight,
    ToggleFraudPatterns,
    Reset,
}

impl GraphCommand {
    /// Whether the command has anything to act on in `graph`. Highlighting
    /// needs risky nodes; fraud patterns need suspicious edges.
    #[must_use]
    pub fn applies_to(self, graph: &Graph) -> bool {
        match self {
            GraphCommand::ToggleRiskHighlight => {
                graph.nodes().iter().any(|node| node.category.is_risky())
            }
            GraphCommand::ToggleFraudPatterns => graph
                .edges()
                .iter()
                .any(|edge| edge.category == EdgeCategory::Suspicious),
            GraphCommand::ZoomIn | GraphCommand::ZoomOut | GraphCommand::Reset => true,
        }
    }
}

/// Presentation toggles applied on top of a laid-out graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphView {
    zoom: f64,
    highlight_risk: bool,
    show_patterns: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: &'static str,
    pub glow: f64,
    pub glow_color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub width: f64,
    pub opacity: f64,
    pub dashed: bool,
}

impl Default for GraphView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            highlight_risk: false,
            show_patterns: false,
        }
    }
}

impl GraphView {
    pub fn apply(&mut self, command: GraphCommand) {
        match command {
            GraphCommand::ZoomIn => self.zoom = (self.zoom * ZOOM_IN).min(MAX_ZOOM),
            GraphCommand::ZoomOut => self.zoom = (self.zoom * ZOOM_OUT).max(MIN_ZOOM),
            GraphCommand::ToggleRiskHighlight => self.highlight_risk = !self.highlight_risk,
            GraphCommand::ToggleFraudPatterns => self.show_patterns = !self.show_patterns,
            GraphCommand::Reset => *self = Self::default(),
        }
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn highlight_risk(&self) -> bool {
        self.highlight_risk
    }

    #[must_use]
    pub fn show_patterns(&self) -> bool {
        self.show_patterns
    }

    #[must_use]
    pub fn node_style(&self, node: &Node) -> NodeStyle {
        let flagged = self.highlight_risk && node.category.is_risky();
        NodeStyle {
            fill: node.category.color(),
            glow: if flagged { 40.0 } else { 10.0 },
            glow_color: if flagged {
                "rgba(255, 77, 79, 1)"
            } else {
                "rgba(0, 0, 0, 0.1)"
            },
        }
    }

    #[must_use]
    pub fn edge_style(&self, edge: &Edge) -> EdgeStyle {
        let suspicious = edge.category == EdgeCategory::Suspicious;
        let (width, opacity) = match (self.show_patterns, suspicious) {
            (true, true) => (8.0, 1.0),
            (true, false) => (3.0, 0.1),
            (false, _) => (3.0, 0.8),
        };
        EdgeStyle {
            stroke: edge.category.color(),
            width,
            opacity,
            dashed: edge.category.dashed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NodeCategory, knowledge_graph, subject_graph};
    use crate::model::SubjectId;

    #[test]
    fn zoom_is_clamped() {
        let mut view = GraphView::default();
        for _ in 0..50 {
            view.apply(GraphCommand::ZoomIn);
        }
        assert!((view.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        for _ in 0..50 {
            view.apply(GraphCommand::ZoomOut);
        }
        assert!((view.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut view = GraphView::default();
        view.apply(GraphCommand::ZoomIn);
        view.apply(GraphCommand::ToggleRiskHighlight);
        view.apply(GraphCommand::ToggleFraudPatterns);
        view.apply(GraphCommand::Reset);
        assert_eq!(view, GraphView::default());
    }

    #[test]
    fn risk_highlight_touches_fraudsters_and_risk_nodes() {
        let mut view = GraphView::default();
        let risk = Node::new("r", "R", NodeCategory::Risk, 40.0);
        assert!((view.node_style(&risk).glow - 10.0).abs() < f64::EPSILON);

        view.apply(GraphCommand::ToggleRiskHighlight);
        let fraudster = Node::new("f", "F", NodeCategory::Fraudster, 40.0);
        let normal = Node::new("n", "N", NodeCategory::Normal, 30.0);
        assert!((view.node_style(&fraudster).glow - 40.0).abs() < f64::EPSILON);
        assert!((view.node_style(&risk).glow - 40.0).abs() < f64::EPSILON);
        assert!((view.node_style(&normal).glow - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn commands_apply_only_where_the_graph_has_targets() {
        let overview = knowledge_graph().unwrap();
        let subject = subject_graph(&SubjectId::parse("USER_001").unwrap()).unwrap();

        assert!(GraphCommand::ToggleFraudPatterns.applies_to(&overview));
        assert!(GraphCommand::ToggleRiskHighlight.applies_to(&overview));
        assert!(!GraphCommand::ToggleFraudPatterns.applies_to(&subject));
        assert!(GraphCommand::ToggleRiskHighlight.applies_to(&subject));
        assert!(GraphCommand::Reset.applies_to(&subject));
    }

    #[test]
    fn fraud_patterns_dim_other_edges() {
        let mut view = GraphView::default();
        view.apply(GraphCommand::ToggleFraudPatterns);
        let suspicious = Edge::new("a", "b", 1.0, EdgeCategory::Suspicious);
        let normal = Edge::new("a", "c", 1.0, EdgeCategory::Normal);
        assert!((view.edge_style(&suspicious).width - 8.0).abs() < f64::EPSILON);
        assert!((view.edge_style(&normal).opacity - 0.1).abs() < f64::EPSILON);
        assert!(!view.edge_style(&normal).dashed);
    }
}
