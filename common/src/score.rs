//! 得分集計と総合判定
//!
//! 考评项の得分を合計し、満点に対する割合から総合判定を導出する。
//! 状態を持たない純粋関数のみ。得分を変更したら毎回 `evaluate` を呼び直すこと。

use crate::types::{ChecklistItem, InspectionStatus};
use serde::{Deserialize, Serialize};

/// 合格ライン（%）
pub const PASS_THRESHOLD_PERCENT: u64 = 85;

/// 整改ライン（%）。これ未満は不合格
pub const WARNING_THRESHOLD_PERCENT: u64 = 60;

/// 集計結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub total_score: u32,
    pub max_score: u32,
    pub status: InspectionStatus,
}

impl Evaluation {
    /// 得分率（%）。満点0のときは None
    pub fn percentage(&self) -> Option<f64> {
        if self.max_score == 0 {
            None
        } else {
            Some(self.total_score as f64 * 100.0 / self.max_score as f64)
        }
    }
}

/// 考评项を集計する
///
/// 合計は u64 で取り、判定も u64 のまま行う。
/// 表示用の合計は u32 に収まらない場合 `u32::MAX` で頭打ち。
pub fn evaluate(items: &[ChecklistItem]) -> Evaluation {
    let total_score: u64 = items.iter().map(|item| item.score as u64).sum();
    let max_score: u64 = items.iter().map(|item| item.max_score as u64).sum();

    Evaluation {
        total_score: saturate(total_score),
        max_score: saturate(max_score),
        status: classify_wide(total_score, max_score),
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// 得分と満点から総合判定を導出
///
/// 境界は下限を含む（85% ちょうどは合格、60% ちょうどは整改中）。
/// 浮動小数点の丸めを避けるため整数のまま比較する。
/// 満点0（考评项なし）は不合格として扱う。
pub fn classify(total_score: u32, max_score: u32) -> InspectionStatus {
    classify_wide(total_score as u64, max_score as u64)
}

fn classify_wide(total_score: u64, max_score: u64) -> InspectionStatus {
    if max_score == 0 {
        return InspectionStatus::Failed;
    }

    // 合計 × 100 は u64 を超えうるので u128 で比較
    let scaled = total_score as u128 * 100;
    let max = max_score as u128;

    if scaled >= PASS_THRESHOLD_PERCENT as u128 * max {
        InspectionStatus::Passed
    } else if scaled >= WARNING_THRESHOLD_PERCENT as u128 * max {
        InspectionStatus::Warning
    } else {
        InspectionStatus::Failed
    }
}
