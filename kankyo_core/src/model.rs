//! `model`：segment/candidate 数据模型。
//!
//! 约定：
//! - `Segment` 由上游流水线创建与销毁；本 crate 只就地增删/改写其候选
//! - 候选在 segment 内保持相对顺序（过滤只删不重排）

use bitflags::bitflags;

bitflags! {
    /// 候选属性标志位（与转换流水线约定）。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CandidateAttributes: u32 {
        /// 来自用户词典的候选
        const USER_DICTIONARY = 1 << 0;
        /// 后处理不得改写该候选的文本
        const NO_MODIFICATION = 1 << 1;
    }
}

/// 候选词（可被 UI 展示与用户选择）。
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    /// 展示/提交文本
    pub value: String,
    /// 内容文本（value 去掉修饰部分；最简场景下与 value 相同）
    pub content_value: String,
    /// 字形备注（例如「[全]波ダッシュ」）；描述的是当前 value 的字形
    pub description: Option<String>,
    /// 属性标志位
    pub attributes: CandidateAttributes,
}

impl Candidate {
    /// 以同一文本初始化 value 与 content_value。
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            content_value: value.clone(),
            value,
            ..Self::default()
        }
    }
}

/// 段：一个输入跨度（key）下的候选列表。
#[derive(Debug, Clone, Default)]
pub struct Segment {
    /// 查找 key（该段对应的输入串）
    pub key: String,
    /// 候选列表（降权排序由上游决定；这里只保持顺序）
    pub candidates: Vec<Candidate>,
}

impl Segment {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            candidates: Vec::new(),
        }
    }

    /// 便捷构造：一批同 key 的纯文本候选。
    pub fn with_values<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segment = Self::new(key);
        for value in values {
            segment.candidates.push(Candidate::new(value));
        }
        segment
    }
}
