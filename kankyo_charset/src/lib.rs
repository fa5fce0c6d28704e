//! `kankyo_charset`：字符组（character group）数据与可渲染性判定。
//!
//! 设计目标：
//! - **纯数据 + 纯函数**：不做任何 I/O，区间表在构造时一次性给定，之后不可变
//! - 字符组按引入该区间的 Unicode 版本命名（Kana Supplement / Kana Extended-A）
//! - 客户端通过 capability 协议声明可渲染的字符组；未声明的组一律判不可渲染
//!   （未知标签同样按未声明处理，宁可拒绝也不放行）

use std::cmp::Ordering;

use thiserror::Error;
use tracing::warn;

/// 字符组标签：按 Unicode 版本排序的枚举。
///
/// - `Default`：基线组（不落在任何受限区间内的码点），无需声明即可渲染
/// - `Empty`：协议里的空标签，不持有任何区间；声明它等价于什么都没声明
/// - 其余标签各自持有一组闭区间，见 [`CharsetTable::builtin`]
#[allow(non_camel_case_types)] // 标签名与 capability 协议的 wire 名称一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterGroup {
    Default,
    Empty,
    KanaSupplement_6_0,
    KanaSupplementAndKanaExtendedA_10_0,
    KanaExtendedA_14_0,
}

impl CharacterGroup {
    /// 从协议标签名解析；未知/未来版本的标签返回 `None`。
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "EMPTY" => Some(Self::Empty),
            "KANA_SUPPLEMENT_6_0" => Some(Self::KanaSupplement_6_0),
            "KANA_SUPPLEMENT_AND_KANA_EXTENDED_A_10_0" => {
                Some(Self::KanaSupplementAndKanaExtendedA_10_0)
            }
            "KANA_EXTENDED_A_14_0" => Some(Self::KanaExtendedA_14_0),
            _ => None,
        }
    }

    /// 协议标签名（`from_tag` 的逆）。
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Empty => "EMPTY",
            Self::KanaSupplement_6_0 => "KANA_SUPPLEMENT_6_0",
            Self::KanaSupplementAndKanaExtendedA_10_0 => {
                "KANA_SUPPLEMENT_AND_KANA_EXTENDED_A_10_0"
            }
            Self::KanaExtendedA_14_0 => "KANA_EXTENDED_A_14_0",
        }
    }
}

/// 客户端声明的 capability 集合（基线组隐式包含，无需声明）。
///
/// 每次调用由调用方新建并传入；本 crate 不缓存、不持有。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    groups: Vec<CharacterGroup>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明一个字符组（重复声明只记一次）。
    pub fn declare(&mut self, group: CharacterGroup) {
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
    }

    /// builder 风格的 `declare`。
    pub fn with(mut self, group: CharacterGroup) -> Self {
        self.declare(group);
        self
    }

    /// 从协议标签名批量构造；未知标签跳过并告警（按未声明处理）。
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::new();
        for tag in tags {
            match CharacterGroup::from_tag(tag) {
                Some(group) => set.declare(group),
                None => warn!(tag, "忽略未知的 character group 标签"),
            }
        }
        set
    }

    /// 该集合是否允许渲染要求 `group` 的码点。
    ///
    /// 基线组恒为 true；`Empty` 不持有区间，声明与否都不影响任何判定。
    pub fn admits(&self, group: CharacterGroup) -> bool {
        group == CharacterGroup::Default || self.groups.contains(&group)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// 一条闭区间记录：`[start, end]` 内的码点都要求 `group`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRange {
    pub start: u32,
    pub end: u32,
    pub group: CharacterGroup,
}

/// 自定义区间表非法时的错误。内置表不经过这些检查（数据在编译期给定）。
#[derive(Debug, Error)]
pub enum CharsetError {
    #[error("码点区间为空：{start:#X}..={end:#X}")]
    EmptyRange { start: u32, end: u32 },

    #[error("码点区间重叠：{prev_end:#X} 与 {start:#X}")]
    Overlap { prev_end: u32, start: u32 },

    #[error("基线组 {0:?} 不得持有区间")]
    BaselineRange(CharacterGroup),
}

/// 内置区间表（按 start 升序，互不重叠）。
///
/// 数据来自 Unicode 区块 Kana Supplement（U+1B000..U+1B0FF）与
/// Kana Extended-A（U+1B100..U+1B12F），按引入各子区间的 Unicode 版本切分。
const BUILTIN_RANGES: [GroupRange; 4] = [
    GroupRange {
        start: 0x1B000,
        end: 0x1B001,
        group: CharacterGroup::KanaSupplement_6_0,
    },
    GroupRange {
        start: 0x1B002,
        end: 0x1B0FF,
        group: CharacterGroup::KanaSupplementAndKanaExtendedA_10_0,
    },
    GroupRange {
        start: 0x1B100,
        end: 0x1B11E,
        group: CharacterGroup::KanaSupplementAndKanaExtendedA_10_0,
    },
    GroupRange {
        start: 0x1B11F,
        end: 0x1B122,
        group: CharacterGroup::KanaExtendedA_14_0,
    },
];

/// 不可变的「码点区间 -> 字符组」查找表。
///
/// 一个码点至多落在一个区间里；查不到即基线组 `Default`。
#[derive(Debug, Clone)]
pub struct CharsetTable {
    ranges: Vec<GroupRange>,
}

impl CharsetTable {
    /// 随 Unicode 标准版本一起维护的内置表。
    pub fn builtin() -> Self {
        Self {
            ranges: BUILTIN_RANGES.to_vec(),
        }
    }

    /// 从自定义区间构造；按 start 排序后校验区间非空、互不重叠、
    /// 且不给基线组（`Default`/`Empty`）挂区间。
    pub fn new(mut ranges: Vec<GroupRange>) -> Result<Self, CharsetError> {
        ranges.sort_by_key(|r| r.start);
        for r in &ranges {
            if r.end < r.start {
                return Err(CharsetError::EmptyRange {
                    start: r.start,
                    end: r.end,
                });
            }
            if matches!(r.group, CharacterGroup::Default | CharacterGroup::Empty) {
                return Err(CharsetError::BaselineRange(r.group));
            }
        }
        for w in ranges.windows(2) {
            if w[1].start <= w[0].end {
                return Err(CharsetError::Overlap {
                    prev_end: w[0].end,
                    start: w[1].start,
                });
            }
        }
        Ok(Self { ranges })
    }

    /// 渲染该码点所要求的最小字符组；不在任何区间内则为基线组。
    ///
    /// 入参是 `char`（真正的 Unicode 标量值）：受限区间全部位于
    /// 基本多文种平面之外，按 16 位单元判断会得出错误结论。
    pub fn required_group(&self, c: char) -> CharacterGroup {
        let cp = u32::from(c);
        let found = self.ranges.binary_search_by(|r| {
            if r.end < cp {
                Ordering::Less
            } else if r.start > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        match found {
            Ok(i) => self.ranges[i].group,
            Err(_) => CharacterGroup::Default,
        }
    }

    /// 单个码点在 `capabilities` 下是否可渲染。
    pub fn is_admissible(&self, c: char, capabilities: &CapabilitySet) -> bool {
        capabilities.admits(self.required_group(c))
    }

    /// 整段文本的所有码点都可渲染才算通过。
    pub fn value_admissible(&self, value: &str, capabilities: &CapabilitySet) -> bool {
        value.chars().all(|c| self.is_admissible(c, capabilities))
    }
}

impl Default for CharsetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_group_baseline() {
        let table = CharsetTable::builtin();
        assert_eq!(table.required_group('a'), CharacterGroup::Default);
        assert_eq!(table.required_group('あ'), CharacterGroup::Default);
        assert_eq!(table.required_group('京'), CharacterGroup::Default);
        // 区间右侧之外
        assert_eq!(table.required_group('\u{1B123}'), CharacterGroup::Default);
    }

    #[test]
    fn required_group_versioned() {
        let table = CharsetTable::builtin();
        assert_eq!(
            table.required_group('\u{1B000}'),
            CharacterGroup::KanaSupplement_6_0
        );
        assert_eq!(
            table.required_group('\u{1B001}'),
            CharacterGroup::KanaSupplement_6_0
        );
        assert_eq!(
            table.required_group('\u{1B002}'),
            CharacterGroup::KanaSupplementAndKanaExtendedA_10_0
        );
        assert_eq!(
            table.required_group('\u{1B11E}'),
            CharacterGroup::KanaSupplementAndKanaExtendedA_10_0
        );
        assert_eq!(
            table.required_group('\u{1B11F}'),
            CharacterGroup::KanaExtendedA_14_0
        );
        assert_eq!(
            table.required_group('\u{1B122}'),
            CharacterGroup::KanaExtendedA_14_0
        );
    }

    #[test]
    fn admissibility_follows_declaration() {
        let table = CharsetTable::builtin();
        let none = CapabilitySet::new();
        assert!(table.is_admissible('a', &none));
        assert!(!table.is_admissible('\u{1B001}', &none));

        let caps = CapabilitySet::new().with(CharacterGroup::KanaSupplement_6_0);
        assert!(table.is_admissible('\u{1B001}', &caps));
        // 声明无关组不放行其他组
        assert!(!table.is_admissible('\u{1B122}', &caps));
    }

    #[test]
    fn empty_tag_is_noop() {
        let table = CharsetTable::builtin();
        let empty = CapabilitySet::new().with(CharacterGroup::Empty);
        assert_eq!(
            table.value_admissible("\u{1B001}", &empty),
            table.value_admissible("\u{1B001}", &CapabilitySet::new())
        );
        assert!(table.value_admissible("abc", &empty));
    }

    #[test]
    fn unknown_tag_fails_closed() {
        let caps = CapabilitySet::from_tags(["KANA_SUPPLEMENT_6_0", "FUTURE_GROUP_99_0"]);
        assert!(caps.admits(CharacterGroup::KanaSupplement_6_0));
        assert!(!caps.admits(CharacterGroup::KanaExtendedA_14_0));

        let unknown_only = CapabilitySet::from_tags(["FUTURE_GROUP_99_0"]);
        assert!(unknown_only.is_empty());
    }

    #[test]
    fn custom_table_rejects_overlap() {
        let ranges = vec![
            GroupRange {
                start: 0x1B000,
                end: 0x1B010,
                group: CharacterGroup::KanaSupplement_6_0,
            },
            GroupRange {
                start: 0x1B010,
                end: 0x1B020,
                group: CharacterGroup::KanaExtendedA_14_0,
            },
        ];
        assert!(matches!(
            CharsetTable::new(ranges),
            Err(CharsetError::Overlap { .. })
        ));
    }

    #[test]
    fn custom_table_rejects_empty_range() {
        let ranges = vec![GroupRange {
            start: 0x1B010,
            end: 0x1B000,
            group: CharacterGroup::KanaSupplement_6_0,
        }];
        assert!(matches!(
            CharsetTable::new(ranges),
            Err(CharsetError::EmptyRange { .. })
        ));
    }

    #[test]
    fn custom_table_rejects_baseline_range() {
        let ranges = vec![GroupRange {
            start: 0x1B000,
            end: 0x1B001,
            group: CharacterGroup::Empty,
        }];
        assert!(matches!(
            CharsetTable::new(ranges),
            Err(CharsetError::BaselineRange(CharacterGroup::Empty))
        ));
    }

    #[test]
    fn tag_round_trip() {
        for group in [
            CharacterGroup::Empty,
            CharacterGroup::KanaSupplement_6_0,
            CharacterGroup::KanaSupplementAndKanaExtendedA_10_0,
            CharacterGroup::KanaExtendedA_14_0,
        ] {
            assert_eq!(CharacterGroup::from_tag(group.as_tag()), Some(group));
        }
        // 基线组不经协议声明
        assert_eq!(CharacterGroup::from_tag("DEFAULT"), None);
    }
}
