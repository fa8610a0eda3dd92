use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

/// Graph models offered in the inference stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    GraphSage,
    Gat,
    Gsa,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::GraphSage, Algorithm::Gat, Algorithm::Gsa];

    /// Stable identifier used in logs and element ids.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::GraphSage => "GraphSAGE",
            Algorithm::Gat => "GAT",
            Algorithm::Gsa => "GSA",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::GraphSage => "GraphSAGE 算法",
            Algorithm::Gat => "GAT (图注意力网络)",
            Algorithm::Gsa => "GSA 结构异常检测",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::GraphSage => {
                "归纳式图表示学习算法，能够利用节点属性信息高效生成未知节点的嵌入向量，特别适用于大规模动态变化的银行交易网络场景。"
            }
            Algorithm::Gat => {
                "引入多头注意力机制，能够自动为邻居节点分配不同权重，从而精准捕捉欺诈团伙中作为“首脑”的关键核心节点。"
            }
            Algorithm::Gsa => {
                "专注于挖掘图结构层面的畸变，通过分析全局拓扑特征识别潜在的集群性协同攻击，对白领结欺诈具有极高的敏感度。"
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphsage" => Ok(Algorithm::GraphSage),
            "gat" | "gat2" => Ok(Algorithm::Gat),
            "gsa" => Ok(Algorithm::Gsa),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_case_insensitively() {
        assert_eq!("GraphSAGE".parse::<Algorithm>(), Ok(Algorithm::GraphSage));
        assert_eq!("graphsage".parse::<Algorithm>(), Ok(Algorithm::GraphSage));
        assert_eq!("GAT2".parse::<Algorithm>(), Ok(Algorithm::Gat));
        assert_eq!(" gsa ".parse::<Algorithm>(), Ok(Algorithm::Gsa));
    }

    #[test]
    fn rejects_unknown_ids() {
        let err = "GCN".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.to_string(), "unknown algorithm: GCN");
    }

    #[test]
    fn ids_round_trip_through_display() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }
}
