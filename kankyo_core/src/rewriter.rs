//! `rewriter`：环境过滤（控制字符剔除 / 可渲染性过滤 / 字形归一化）。
//!
//! 这是流水线里的一趟后处理：对每个 segment 的每个候选，
//! 先判剔除（含控制字符、含客户端未声明可渲染的码点），
//! 幸存者再按策略做字形归一化；返回「是否有任何修改」，
//! 供上游决定要不要重排或重跑后续趟次。

use kankyo_charset::{CapabilitySet, CharsetTable};
use tracing::debug;

use crate::model::{CandidateAttributes, Segment};
use crate::normalizer::{NormalizationPolicy, Platform, TextNormalizer};

/// Rewriter：对 segments 做一趟就地改写（剔除/编辑候选）。
///
/// segment 本身只清空不删除——其生命周期归上游流水线管。
pub trait Rewriter: Send + Sync {
    /// 返回 true 表示至少有一个候选被剔除或被改写。
    fn rewrite(&self, capabilities: &CapabilitySet, segments: &mut [Segment]) -> bool;
}

/// 候选里不允许出现的控制字符（TAB/LF/CR）。
/// 与 capability 协商无关，恒生效。
pub fn has_disallowed_control(value: &str) -> bool {
    value.chars().any(|c| matches!(c, '\t' | '\n' | '\r'))
}

/// 环境过滤器。
///
/// 持有不可变的字符组表与归一化器；唯一的可变配置是归一化策略
/// （[`EnvironmentFilter::set_normalization_policy`]）。
/// 可渲染性判定只看候选自身的码点与本次传入的 capability 集合，
/// 不依赖其他候选或 segment 顺序。
pub struct EnvironmentFilter {
    table: CharsetTable,
    normalizer: TextNormalizer,
    policy: NormalizationPolicy,
}

impl EnvironmentFilter {
    pub fn new() -> Self {
        Self::with_platform(Platform::current())
    }

    /// 显式指定平台（决定 `PlatformDefault` 策略的方向）；
    /// 测试与宿主注入用，不必重新编译。
    pub fn with_platform(platform: Platform) -> Self {
        Self {
            table: CharsetTable::builtin(),
            normalizer: TextNormalizer::new(platform),
            policy: NormalizationPolicy::default(),
        }
    }

    /// 替换内置字符组表（构造后表不再变化）。
    pub fn with_table(mut self, table: CharsetTable) -> Self {
        self.table = table;
        self
    }

    pub fn set_normalization_policy(&mut self, policy: NormalizationPolicy) {
        self.policy = policy;
    }
}

impl Default for EnvironmentFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Rewriter for EnvironmentFilter {
    fn rewrite(&self, capabilities: &CapabilitySet, segments: &mut [Segment]) -> bool {
        let mut modified = false;
        for segment in segments.iter_mut() {
            let key = &segment.key;
            // retain_mut：边遍历边删改，候选保持相对顺序，
            // 连续剔除也不会漏判（不靠下标自己挪）。
            segment.candidates.retain_mut(|candidate| {
                // 1) 控制字符：无条件剔除，不再归一化
                if has_disallowed_control(&candidate.value) {
                    debug!(key = %key, value = %candidate.value.escape_debug(), "剔除含控制字符的候选");
                    modified = true;
                    return false;
                }
                // 2) 可渲染性：任一码点要求未声明的字符组即剔除
                if !self.table.value_admissible(&candidate.value, capabilities) {
                    debug!(key = %key, value = %candidate.value, "剔除客户端无法渲染的候选");
                    modified = true;
                    return false;
                }
                // 3) 归一化：带豁免属性的候选原样保留
                if candidate
                    .attributes
                    .intersects(CandidateAttributes::NO_MODIFICATION | CandidateAttributes::USER_DICTIONARY)
                {
                    return true;
                }
                if let Some(normalized) = self.normalizer.normalize(self.policy, &candidate.value) {
                    candidate.value = normalized;
                    // 原 description 描述的是替换前的字形，已失效
                    candidate.description = None;
                    modified = true;
                }
                true
            });
        }
        modified
    }
}
