//! 考评セッション（入力中の下書き）
//!
//! 考评项の判定・得分修正・備考を受け付け、確定時に InspectionRecord を生成する。
//! 判定と得分の関係:
//! - 合格 → 満点、不合格 → 0点、不适用 → 得分はそのまま
//! - 得分の手動修正は判定とは独立した操作（後勝ち）

use crate::catalog::{check_item_definition, ChecklistCatalog};
use crate::error::{Error, Result};
use crate::score::{evaluate, Evaluation};
use crate::types::{ChecklistItem, InspectionRecord, Judgment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 確定前レコードのID
pub const DRAFT_RECORD_ID: &str = "TEMP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionSession {
    #[serde(default)]
    inspector: String,
    #[serde(default)]
    target: String,
    items: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl InspectionSession {
    /// カタログから新しいセッションを開始
    pub fn new(catalog: &ChecklistCatalog, inspector: impl Into<String>) -> Self {
        Self {
            inspector: inspector.into(),
            target: String::new(),
            items: catalog.instantiate(),
            image_url: None,
        }
    }

    /// JSON文字列から下書きを読み込み
    ///
    /// 考评项は清单と同じ基準（ID重複・満点）で検証し、
    /// 得分が満点を超える場合もエラー。
    pub fn from_json_str(content: &str) -> Result<Self> {
        let session: Self = serde_json::from_str(content)?;
        let mut seen = HashSet::new();
        for item in &session.items {
            check_item_definition(&item.id, item.max_score, &mut seen).map_err(Error::InvalidDraft)?;
            check_range(item, item.score)?;
        }
        Ok(session)
    }

    pub fn inspector(&self) -> &str {
        &self.inspector
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
    }

    /// 判定を設定し、判定に応じて得分を更新
    pub fn set_judgment(&mut self, item_id: &str, judgment: Judgment) -> Result<()> {
        let item = self.item_mut(item_id)?;
        item.judgment = judgment;
        match judgment {
            Judgment::Pass => item.score = item.max_score,
            Judgment::Fail => item.score = 0,
            Judgment::NotApplicable => {}
        }
        Ok(())
    }

    /// 得分を手動で修正（判定は変更しない）
    pub fn override_score(&mut self, item_id: &str, score: u32) -> Result<()> {
        let item = self.item_mut(item_id)?;
        check_range(item, score)?;
        item.score = score;
        Ok(())
    }

    pub fn set_comment(&mut self, item_id: &str, comment: impl Into<String>) -> Result<()> {
        self.item_mut(item_id)?.comment = comment.into();
        Ok(())
    }

    /// 現在の得分・判定（呼ぶたびに再計算）
    pub fn evaluation(&self) -> Evaluation {
        evaluate(&self.items)
    }

    /// 分类ごとにまとめた考评项（分类の出現順、分类内の順序を保持）
    pub fn items_by_category(&self) -> Vec<(&str, Vec<&ChecklistItem>)> {
        let mut groups: Vec<(&str, Vec<&ChecklistItem>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(name, _)| *name == item.category) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.category.as_str(), vec![item])),
            }
        }
        groups
    }

    /// AI分析依頼用の未確定スナップショット
    pub fn snapshot(&self, timestamp: impl Into<String>) -> InspectionRecord {
        self.build_record(DRAFT_RECORD_ID.to_string(), timestamp.into(), None)
    }

    /// 考评を確定して InspectionRecord を生成
    ///
    /// 考评目标が空の場合は `Error::MissingTarget`。セッションは変更されないので
    /// 目标を入力して再度呼び出せる。
    pub fn finalize(
        &self,
        id: impl Into<String>,
        timestamp: impl Into<String>,
        ai_analysis: Option<String>,
    ) -> Result<InspectionRecord> {
        if self.target.trim().is_empty() {
            return Err(Error::MissingTarget);
        }
        let ai_analysis = ai_analysis.filter(|text| !text.trim().is_empty());
        Ok(self.build_record(id.into(), timestamp.into(), ai_analysis))
    }

    fn build_record(
        &self,
        id: String,
        timestamp: String,
        ai_analysis: Option<String>,
    ) -> InspectionRecord {
        let evaluation = self.evaluation();
        InspectionRecord {
            id,
            inspector: self.inspector.clone(),
            target: self.target.trim().to_string(),
            timestamp,
            total_score: evaluation.total_score,
            status: evaluation.status,
            items: self.items.clone(),
            ai_analysis,
            image_url: self.image_url.clone(),
        }
    }

    fn item_mut(&mut self, item_id: &str) -> Result<&mut ChecklistItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| Error::UnknownItem(item_id.to_string()))
    }
}

fn check_range(item: &ChecklistItem, score: u32) -> Result<()> {
    if score > item.max_score {
        return Err(Error::ScoreOutOfRange {
            item_id: item.id.clone(),
            score,
            max_score: item.max_score,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InspectionStatus;

    fn session() -> InspectionSession {
        InspectionSession::new(&ChecklistCatalog::builtin(), "超级管理员")
    }

    #[test]
    fn test_new_session_is_full_score() {
        let s = session();
        let eval = s.evaluation();
        assert_eq!(eval.total_score, 60);
        assert_eq!(eval.max_score, 60);
        assert_eq!(eval.status, InspectionStatus::Passed);
        assert_eq!(s.inspector(), "超级管理员");
    }

    #[test]
    fn test_fail_sets_zero_and_pass_restores_max() {
        let mut s = session();
        s.set_judgment("sec_1", Judgment::Fail).unwrap();
        assert_eq!(s.evaluation().total_score, 40);
        // 40/60 = 66.7%
        assert_eq!(s.evaluation().status, InspectionStatus::Warning);

        s.set_judgment("sec_1", Judgment::Pass).unwrap();
        assert_eq!(s.evaluation().total_score, 60);
    }

    #[test]
    fn test_not_applicable_keeps_score() {
        let mut s = session();
        s.override_score("env_1", 6).unwrap();
        s.set_judgment("env_1", Judgment::NotApplicable).unwrap();
        let item = s.items().iter().find(|i| i.id == "env_1").unwrap();
        assert_eq!(item.score, 6);
        assert_eq!(item.judgment, Judgment::NotApplicable);
    }

    #[test]
    fn test_override_after_judgment_last_write_wins() {
        let mut s = session();
        s.set_judgment("sec_2", Judgment::Fail).unwrap();
        s.override_score("sec_2", 8).unwrap();
        let item = s.items().iter().find(|i| i.id == "sec_2").unwrap();
        assert_eq!(item.score, 8);
        assert_eq!(item.judgment, Judgment::Fail);
        assert_eq!(s.evaluation().total_score, 53);
    }

    #[test]
    fn test_override_out_of_range_rejected() {
        let mut s = session();
        let result = s.override_score("env_2", 6);
        assert!(matches!(result, Err(Error::ScoreOutOfRange { max_score: 5, .. })));
        // 変更されていない
        assert_eq!(s.evaluation().total_score, 60);
    }

    #[test]
    fn test_unknown_item() {
        let mut s = session();
        assert!(matches!(s.set_judgment("nope", Judgment::Fail), Err(Error::UnknownItem(_))));
        assert!(matches!(s.set_comment("nope", "x"), Err(Error::UnknownItem(_))));
    }

    #[test]
    fn test_finalize_requires_target() {
        let mut s = session();
        assert!(matches!(s.finalize("INS-1", "2024-05-15 10:30", None), Err(Error::MissingTarget)));

        s.set_target("   ");
        assert!(matches!(s.finalize("INS-1", "2024-05-15 10:30", None), Err(Error::MissingTarget)));

        s.set_target(" 1号楼大厅 ");
        let record = s.finalize("INS-1", "2024-05-15 10:30", None).unwrap();
        assert_eq!(record.target, "1号楼大厅");
        assert_eq!(record.total_score, 60);
        assert_eq!(record.status, InspectionStatus::Passed);
        assert_eq!(record.items.len(), 5);
        assert_eq!(record.ai_analysis, None);
    }

    #[test]
    fn test_finalize_embeds_current_evaluation() {
        let mut s = session();
        s.set_target("地库停车场");
        s.set_judgment("sec_1", Judgment::Fail).unwrap();
        s.set_judgment("sec_2", Judgment::Fail).unwrap();
        s.set_comment("sec_1", "灭火器过期").unwrap();

        let record = s
            .finalize("INS-2", "2024-05-16 09:00", Some("建议整改".to_string()))
            .unwrap();
        assert_eq!(record.total_score, 25);
        assert_eq!(record.status, InspectionStatus::Failed);
        assert_eq!(record.total_score, record.items.iter().map(|i| i.score).sum::<u32>());
        assert_eq!(record.ai_analysis.as_deref(), Some("建议整改"));
    }

    #[test]
    fn test_blank_advice_not_attached() {
        let mut s = session();
        s.set_target("A座");
        let record = s.finalize("INS-3", "", Some("  ".to_string())).unwrap();
        assert_eq!(record.ai_analysis, None);
    }

    #[test]
    fn test_snapshot_uses_draft_id() {
        let mut s = session();
        s.set_target("A座办公区");
        let snap = s.snapshot("now");
        assert_eq!(snap.id, DRAFT_RECORD_ID);
        assert_eq!(snap.total_score, 60);
    }

    #[test]
    fn test_items_by_category() {
        let s = session();
        let groups = s.items_by_category();
        let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["环境卫生", "安全检查", "服务礼仪"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[0].id, "env_1");
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "inspector": "张明",
            "target": "A座办公区",
            "items": [
                {"id": "a", "category": "环境卫生", "title": "地面清洁", "score": 10, "maxScore": 10, "status": "Pass"},
                {"id": "b", "category": "安全检查", "title": "消防设施", "score": 15, "maxScore": 20, "status": "Fail", "comment": "通道堆物"}
            ]
        }"#;
        let s = InspectionSession::from_json_str(json).unwrap();
        assert_eq!(s.evaluation().total_score, 25);
        assert_eq!(s.evaluation().status, InspectionStatus::Warning);
    }

    #[test]
    fn test_from_json_str_rejects_score_over_max() {
        let json = r#"{"target": "x", "items": [{"id": "a", "score": 11, "maxScore": 10}]}"#;
        assert!(matches!(
            InspectionSession::from_json_str(json),
            Err(Error::ScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_json_str_rejects_invalid_items() {
        let duplicate = r#"{"target": "x", "items": [
            {"id": "a", "score": 5, "maxScore": 10},
            {"id": "a", "score": 3, "maxScore": 5}
        ]}"#;
        assert!(matches!(
            InspectionSession::from_json_str(duplicate),
            Err(Error::InvalidDraft(msg)) if msg.contains("a")
        ));

        let zero_max = r#"{"target": "x", "items": [{"id": "a", "score": 0, "maxScore": 0}]}"#;
        assert!(matches!(InspectionSession::from_json_str(zero_max), Err(Error::InvalidDraft(_))));

        let huge = r#"{"target": "x", "items": [
            {"id": "a", "score": 3000000000, "maxScore": 3000000000},
            {"id": "b", "score": 3000000000, "maxScore": 3000000000}
        ]}"#;
        assert!(matches!(InspectionSession::from_json_str(huge), Err(Error::InvalidDraft(_))));
    }
}
