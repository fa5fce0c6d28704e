//! `normalizer`：候选文本的字形归一化（平台相关的字符替换）。
//!
//! 目前的替换表只处理「同一字形在不同平台渲染不一致」的几个兼容字符：
//! Windows 侧按 CP932 习惯取全角形（波ダッシュ U+301C -> 全角チルダ U+FF5E 等），
//! 其他平台直接渲染原字符，无需替换。

/// 目标平台（决定 `PlatformDefault` 策略下替换是否生效）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    /// 编译目标平台。构造时解析一次；测试可显式注入另一侧。
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

/// 归一化策略（三态），由调用方通过 setter 设置，默认跟随平台。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationPolicy {
    /// 平台默认：Windows 替换，其余平台不替换
    #[default]
    PlatformDefault,
    /// 无条件替换
    ForceAll,
    /// 无条件不替换
    ForceNone,
}

/// 替换表：左列 -> 右列。
/// 右列必须是基线字符，不得引入控制字符或受限区间的码点
/// （否则归一化会把刚通过过滤的候选改回不可渲染）。
const SUBSTITUTIONS: [(char, char); 6] = [
    ('\u{00A2}', '\u{FFE0}'), // ¢ -> ￠
    ('\u{00A3}', '\u{FFE1}'), // £ -> ￡
    ('\u{00AC}', '\u{FFE2}'), // ¬ -> ￢
    ('\u{2016}', '\u{2225}'), // ‖ -> ∥
    ('\u{2212}', '\u{FF0D}'), // − -> －
    ('\u{301C}', '\u{FF5E}'), // 〜 -> ～（波ダッシュ）
];

fn substitute(c: char) -> Option<char> {
    SUBSTITUTIONS
        .iter()
        .find(|&&(from, _)| from == c)
        .map(|&(_, to)| to)
}

/// 文本归一化器：平台注入一次，策略逐次传入。
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer {
    platform: Platform,
}

impl TextNormalizer {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    fn enabled(&self, policy: NormalizationPolicy) -> bool {
        match policy {
            NormalizationPolicy::ForceAll => true,
            NormalizationPolicy::ForceNone => false,
            NormalizationPolicy::PlatformDefault => self.platform == Platform::Windows,
        }
    }

    /// 归一化一段文本；未发生替换时返回 `None`。
    ///
    /// 幂等：替换结果不再出现在表的左列，二次归一化必为 `None`。
    pub fn normalize(&self, policy: NormalizationPolicy, value: &str) -> Option<String> {
        if !self.enabled(policy) {
            return None;
        }
        if !value.chars().any(|c| substitute(c).is_some()) {
            return None;
        }
        Some(value.chars().map(|c| substitute(c).unwrap_or(c)).collect())
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_all_substitutes_wave_dash() {
        let normalizer = TextNormalizer::new(Platform::Other);
        assert_eq!(
            normalizer.normalize(NormalizationPolicy::ForceAll, "\u{301C}"),
            Some("\u{FF5E}".to_string())
        );
    }

    #[test]
    fn force_none_never_substitutes() {
        let normalizer = TextNormalizer::new(Platform::Windows);
        assert_eq!(
            normalizer.normalize(NormalizationPolicy::ForceNone, "\u{301C}"),
            None
        );
    }

    #[test]
    fn platform_default_depends_on_platform() {
        let policy = NormalizationPolicy::PlatformDefault;
        let windows = TextNormalizer::new(Platform::Windows);
        assert_eq!(
            windows.normalize(policy, "沿\u{301C}線"),
            Some("沿\u{FF5E}線".to_string())
        );
        let other = TextNormalizer::new(Platform::Other);
        assert_eq!(other.normalize(policy, "沿\u{301C}線"), None);
    }

    #[test]
    fn untouched_text_reports_no_change() {
        let normalizer = TextNormalizer::new(Platform::Windows);
        assert_eq!(
            normalizer.normalize(NormalizationPolicy::ForceAll, "京都"),
            None
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let normalizer = TextNormalizer::new(Platform::Windows);
        let policy = NormalizationPolicy::ForceAll;
        let once = normalizer
            .normalize(policy, "\u{301C}\u{2212}\u{2016}")
            .unwrap();
        assert_eq!(once, "\u{FF5E}\u{FF0D}\u{2225}");
        assert_eq!(normalizer.normalize(policy, &once), None);
    }

    #[test]
    fn full_table_substitutes() {
        let normalizer = TextNormalizer::new(Platform::Windows);
        let policy = NormalizationPolicy::PlatformDefault;
        assert_eq!(
            normalizer.normalize(policy, "\u{00A2}\u{00A3}\u{00AC}"),
            Some("\u{FFE0}\u{FFE1}\u{FFE2}".to_string())
        );
    }
}
