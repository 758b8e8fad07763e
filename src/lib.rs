//! 巡查考评 CLI ライブラリ
//!
//! 得分集計・記録管理の本体は `inspection_common`。ここでは設定、入力データ読み込み、
//! 対話入力、AI分析クライアント、Excel出力を提供する。

pub mod advisor;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod loader;
pub mod report;
