use crate::model::SubjectId;

use super::model::{Edge, EdgeCategory, Graph, GraphError, Node, NodeCategory};

/// Credit anti-fraud knowledge graph shown on the overview page.
///
/// # Errors
///
/// Returns `GraphError` if the fixture is inconsistent.
pub fn knowledge_graph() -> Result<Graph, GraphError> {
    use EdgeCategory::{Abnormal, Normal, Suspicious};

    let nodes = vec![
        Node::new("fraud_1", "欺诈者A", NodeCategory::Fraudster, 55.0).with_status("逾期未还且失联"),
        Node::new("fraud_2", "欺诈者B", NodeCategory::Fraudster, 45.0).with_status("逾期未还且失联"),
        Node::new("normal_1", "用户A", NodeCategory::Normal, 32.0).with_status("按时还款"),
        Node::new("normal_2", "用户B", NodeCategory::Normal, 32.0).with_status("按时还款"),
        Node::new("normal_3", "用户C", NodeCategory::Normal, 30.0).with_status("按时还款"),
        Node::new("bg_1", "设备节点1", NodeCategory::Background, 22.0).with_status("共用同一设备"),
        Node::new("bg_2", "IP节点2", NodeCategory::Background, 22.0).with_status("共用同一IP"),
        Node::new("bg_4", "地理节点4", NodeCategory::Background, 22.0).with_status("地理位置重合"),
    ];
    let edges = vec![
        Edge::new("fraud_1", "fraud_2", 8.5, Suspicious),
        Edge::new("fraud_1", "normal_1", 6.2, Abnormal),
        Edge::new("fraud_2", "normal_2", 5.8, Abnormal),
        Edge::new("normal_1", "normal_2", 2.0, Normal),
        Edge::new("normal_2", "normal_3", 1.8, Normal),
        Edge::new("bg_1", "fraud_1", 3.0, Suspicious),
        Edge::new("bg_1", "normal_1", 1.5, Normal),
        Edge::new("bg_2", "normal_3", 1.2, Normal),
        Edge::new("bg_4", "normal_2", 1.0, Normal),
        Edge::new("fraud_2", "fraud_1", 2.5, Suspicious),
    ];
    Graph::new(nodes, edges)
}

/// Relation graph around one analysed account.
///
/// # Errors
///
/// Returns `GraphError` if the fixture is inconsistent.
pub fn subject_graph(subject: &SubjectId) -> Result<Graph, GraphError> {
    let nodes = vec![
        Node::new("user", format!("用户: {subject}"), NodeCategory::Subject, 38.0)
            .with_status("中等"),
        Node::new("basic", "多头借贷特征", NodeCategory::Feature, 28.0),
        Node::new("behavior", "非常规登录", NodeCategory::Feature, 28.0),
        Node::new("social", "团伙核心关联", NodeCategory::Feature, 28.0),
        Node::new("contact1", "疑似黑中介", NodeCategory::Contact, 28.0),
        Node::new("device", "设备共享指纹", NodeCategory::Device, 28.0),
        Node::new("risk1", "异常提现路径", NodeCategory::Risk, 28.0),
    ];
    let edges = ["basic", "behavior", "social", "contact1", "device"]
        .into_iter()
        .map(|target| Edge::new("user", target, 1.0, EdgeCategory::Link))
        .chain(std::iter::once(Edge::new(
            "behavior",
            "risk1",
            1.0,
            EdgeCategory::Link,
        )))
        .collect();
    Graph::new(nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knowledge_graph_is_consistent() {
        let graph = knowledge_graph().unwrap();
        assert_eq!(graph.nodes().len(), 8);
        assert_eq!(graph.edges().len(), 10);
        let fraudsters = graph
            .nodes()
            .iter()
            .filter(|node| node.category == NodeCategory::Fraudster)
            .count();
        assert_eq!(fraudsters, 2);
    }

    #[test]
    fn subject_graph_names_the_subject() {
        let subject = SubjectId::parse("USER_001").unwrap();
        let graph = subject_graph(&subject).unwrap();
        assert_eq!(graph.nodes()[0].name, "用户: USER_001");
        assert_eq!(graph.edges().len(), 6);
    }
}
