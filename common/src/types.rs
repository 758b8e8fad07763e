//! 考评データの型定義
//!
//! CLIとライブラリで共有される型:
//! - Judgment: 考评项ごとの判定（合格 / 不合格 / 不适用）
//! - InspectionStatus: 総合判定（合格 / 整改中 / 不合格）
//! - ChecklistItem: 考评项1件
//! - InspectionRecord: 確定済みの考评记录

use serde::{Deserialize, Serialize};
use std::fmt;

/// 考评项の判定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    #[default]
    Pass,
    Fail,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Judgment {
    pub const ALL: [Judgment; 3] = [Judgment::Pass, Judgment::Fail, Judgment::NotApplicable];

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Judgment::Pass => "合格",
            Judgment::Fail => "不合格",
            Judgment::NotApplicable => "不适用",
        }
    }

    /// プロンプト用の識別子（"Pass" / "Fail" / "N/A"）
    pub fn code(&self) -> &'static str {
        match self {
            Judgment::Pass => "Pass",
            Judgment::Fail => "Fail",
            Judgment::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 総合判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InspectionStatus {
    Passed,
    Warning,
    Failed,
}

impl InspectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InspectionStatus::Passed => "合格",
            InspectionStatus::Warning => "整改中",
            InspectionStatus::Failed => "不合格",
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 考评项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,

    #[serde(default)]
    pub category: String,         // 分类

    #[serde(default)]
    pub title: String,            // 标题

    #[serde(default)]
    pub description: String,      // 考评标准

    #[serde(default)]
    pub score: u32,               // 得分

    pub max_score: u32,           // 满分

    #[serde(default, rename = "status")]
    pub judgment: Judgment,

    #[serde(default)]
    pub comment: String,          // 备注（空文字 = なし）
}

impl ChecklistItem {
    /// 備考が入力されているか
    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}

/// 考评记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub id: String,

    #[serde(default)]
    pub inspector: String,        // 检查人

    pub target: String,           // 考评目标

    #[serde(default)]
    pub timestamp: String,        // "YYYY-MM-DD HH:MM"

    pub total_score: u32,

    pub status: InspectionStatus,

    #[serde(default)]
    pub items: Vec<ChecklistItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl InspectionRecord {
    /// 満点（考评项の満点合計）
    pub fn max_score(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.max_score))
    }
}
