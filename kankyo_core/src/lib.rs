//! `kankyo_core`：候选环境过滤的纯逻辑层（std-only 语义，不做任何 I/O）。
//!
//! 设计目标：
//! - **核心可复用**：转换流水线/CLI/服务端都能复用同一套过滤逻辑
//! - **分层清晰**：model（segment/candidate） -> normalizer（字形归一化）
//!   -> rewriter（编排：剔除 + 归一化，就地改写 segments）
//! - 字符组数据与可渲染性判定在 `kankyo_charset`
pub mod model;
pub mod normalizer;
pub mod rewriter;
