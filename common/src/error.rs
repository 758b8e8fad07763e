//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 考评目标が未入力（オペレーターが修正して再提出できる）
    #[error("请先填写考评目标")]
    MissingTarget,

    #[error("未知的考评项: {0}")]
    UnknownItem(String),

    #[error("得分超出范围: {item_id} = {score} (0..={max_score})")]
    ScoreOutOfRange {
        item_id: String,
        score: u32,
        max_score: u32,
    },

    #[error("考评清单不正确: {0}")]
    InvalidCatalog(String),

    #[error("考评草稿不正确: {0}")]
    InvalidDraft(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
