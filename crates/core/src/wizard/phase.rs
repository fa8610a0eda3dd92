use super::progress::Progress;

/// Named sub-phases of the feature-engineering pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelinePhase {
    Cleaning,
    Extraction,
    Transform,
    Selection,
    Generation,
}

/// Inclusive upper progress bound for each phase. Must stay sorted.
const PHASE_UPPER_BOUNDS: [(u8, PipelinePhase); 5] = [
    (20, PipelinePhase::Cleaning),
    (40, PipelinePhase::Extraction),
    (60, PipelinePhase::Transform),
    (80, PipelinePhase::Selection),
    (100, PipelinePhase::Generation),
];

impl PipelinePhase {
    pub const ALL: [PipelinePhase; 5] = [
        PipelinePhase::Cleaning,
        PipelinePhase::Extraction,
        PipelinePhase::Transform,
        PipelinePhase::Selection,
        PipelinePhase::Generation,
    ];

    /// Phase shown for the given progress; `None` before the pipeline starts.
    #[must_use]
    pub fn for_progress(progress: Progress) -> Option<Self> {
        let value = progress.value();
        if value == 0 {
            return None;
        }
        PHASE_UPPER_BOUNDS
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map(|(_, phase)| *phase)
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            PipelinePhase::Cleaning => 0,
            PipelinePhase::Extraction => 1,
            PipelinePhase::Transform => 2,
            PipelinePhase::Selection => 3,
            PipelinePhase::Generation => 4,
        }
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            PipelinePhase::Cleaning => "清洗",
            PipelinePhase::Extraction => "提取",
            PipelinePhase::Transform => "转换",
            PipelinePhase::Selection => "选择",
            PipelinePhase::Generation => "生成",
        }
    }

    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            PipelinePhase::Cleaning => "Data Cleaning",
            PipelinePhase::Extraction => "Extraction",
            PipelinePhase::Transform => "Transform",
            PipelinePhase::Selection => "Selection",
            PipelinePhase::Generation => "Generation",
        }
    }

    #[must_use]
    pub fn running_title(self) -> &'static str {
        match self {
            PipelinePhase::Cleaning => "正在执行: 数据清洗",
            PipelinePhase::Extraction => "正在执行: 基础特征提取",
            PipelinePhase::Transform => "正在执行: 图结构特征转换",
            PipelinePhase::Selection => "正在执行: 核心特征选择",
            PipelinePhase::Generation => "正在执行: 衍生特征生成",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            PipelinePhase::Cleaning => {
                "利用标准化流水处理算法，自动识别并修正数据中的缺失值、异常噪声及逻辑冲突，确保底层信贷数据的真实性与可用性。"
            }
            PipelinePhase::Extraction => {
                "深度挖掘用户行为模式，从设备指纹、地理位置偏移、多头借贷历史等维度初步构建100+项基础风险指标。"
            }
            PipelinePhase::Transform => {
                "将交易关联映射至高维空间，通过拉普拉斯变换提取网络拓扑特征，量化用户在团伙中的关联权重。"
            }
            PipelinePhase::Selection => {
                "应用随机森林特征选择器，从海量维度中筛选出IV值最高、区分度最强的关键反欺诈特征子集。"
            }
            PipelinePhase::Generation => {
                "基于图卷积网络预训练生成的Embedding向量，构建复杂衍生特征，识别传统手段难以察觉的隐蔽关联。"
            }
        }
    }
}
