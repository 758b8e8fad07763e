//! 控制面板の集計
//!
//! 累计考评件数・平均得分・合格率・待处理（整改中）件数と、月別の得分推移。

use crate::types::{InspectionRecord, InspectionStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// 月別の集計値
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    /// "YYYY-MM"
    pub month: String,
    pub average_score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_count: usize,
    pub average_score: Option<f64>,
    /// 合格件数 / 総件数
    pub pass_rate: Option<f64>,
    /// 整改中の件数
    pub pending_count: usize,
    pub failed_count: usize,
    pub monthly: Vec<MonthlyStat>,
}

impl DashboardStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a InspectionRecord>,
    {
        let mut total_count = 0usize;
        let mut score_sum = 0u64;
        let mut passed = 0usize;
        let mut pending_count = 0usize;
        let mut failed_count = 0usize;
        let mut by_month: BTreeMap<String, (u64, usize)> = BTreeMap::new();

        for record in records {
            total_count += 1;
            score_sum += record.total_score as u64;
            match record.status {
                InspectionStatus::Passed => passed += 1,
                InspectionStatus::Warning => pending_count += 1,
                InspectionStatus::Failed => failed_count += 1,
            }

            if let Some(month) = month_key(&record.timestamp) {
                let entry = by_month.entry(month.to_string()).or_insert((0, 0));
                entry.0 += record.total_score as u64;
                entry.1 += 1;
            }
        }

        let ratio = |n: u64| {
            if total_count == 0 {
                None
            } else {
                Some(n as f64 / total_count as f64)
            }
        };

        Self {
            total_count,
            average_score: ratio(score_sum),
            pass_rate: ratio(passed as u64),
            pending_count,
            failed_count,
            monthly: by_month
                .into_iter()
                .map(|(month, (sum, count))| MonthlyStat {
                    month,
                    average_score: sum as f64 / count as f64,
                    count,
                })
                .collect(),
        }
    }
}

/// タイムスタンプ先頭の "YYYY-MM" を取り出す（形式不正は None）
fn month_key(timestamp: &str) -> Option<&str> {
    let key = timestamp.trim().get(..7)?;
    let bytes = key.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if digits(0..4) && bytes[4] == b'-' && digits(5..7) {
        Some(key)
    } else {
        None
    }
}
