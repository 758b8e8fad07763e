//! 考评记录ストア
//!
//! 確定済みの InspectionRecord をメモリ上に新しい順で保持する。
//! 追記のみ（編集・削除なし）。外部には共有参照だけを渡す。

use crate::score::evaluate;
use crate::types::InspectionRecord;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// 挿入順（古い順）。参照系はすべて逆順で返す
    records: Vec<InspectionRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データから構築
    ///
    /// `seed` は新しい順で渡す。各レコードの得分・判定は考评项から再計算する。
    pub fn with_seed(seed: Vec<InspectionRecord>) -> Self {
        let mut records: Vec<InspectionRecord> = seed.into_iter().map(rederive).collect();
        records.reverse();
        Self { records }
    }

    /// 先頭（最新）に追加
    ///
    /// IDの重複チェックはしない（採番側で一意性を保証すること）。
    pub fn append(&mut self, record: InspectionRecord) {
        self.records.push(record);
    }

    /// 新しい順のイテレータ
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &InspectionRecord> + ExactSizeIterator {
        self.records.iter().rev()
    }

    /// 全履歴（新しい順）
    pub fn list(&self) -> Vec<&InspectionRecord> {
        self.iter().collect()
    }

    /// 检查人・考评目标の部分一致検索（大文字小文字を区別しない）
    ///
    /// 空の検索語はすべてにマッチする。並び順は新しい順のまま。
    pub fn filter(&self, term: &str) -> Vec<&InspectionRecord> {
        let needle = term.to_lowercase();
        self.iter()
            .filter(|record| {
                record.target.to_lowercase().contains(&needle)
                    || record.inspector.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// 最新 n 件
    pub fn recent(&self, n: usize) -> Vec<&InspectionRecord> {
        self.iter().take(n).collect()
    }

    pub fn get(&self, id: &str) -> Option<&InspectionRecord> {
        self.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 得分・判定を考评项から導出し直す
fn rederive(mut record: InspectionRecord) -> InspectionRecord {
    let evaluation = evaluate(&record.items);
    record.total_score = evaluation.total_score;
    record.status = evaluation.status;
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChecklistItem, InspectionStatus};

    fn record(id: &str, inspector: &str, target: &str) -> InspectionRecord {
        InspectionRecord {
            id: id.to_string(),
            inspector: inspector.to_string(),
            target: target.to_string(),
            timestamp: "2024-05-15 10:30".to_string(),
            total_score: 10,
            status: InspectionStatus::Passed,
            items: vec![ChecklistItem {
                id: "env_1".to_string(),
                score: 10,
                max_score: 10,
                ..Default::default()
            }],
            ai_analysis: None,
            image_url: None,
        }
    }

    fn ids(records: &[&InspectionRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_append_then_list_newest_first() {
        let mut store = RecordStore::new();
        store.append(record("INS-1", "张明", "A座办公区"));
        assert_eq!(store.list()[0].id, "INS-1");

        store.append(record("INS-2", "李华", "地库停车场"));
        store.append(record("INS-3", "王芳", "1号楼大厅"));

        assert_eq!(store.len(), 3);
        assert_eq!(ids(&store.list()), vec!["INS-3", "INS-2", "INS-1"]);
    }

    #[test]
    fn test_filter_by_inspector() {
        let mut store = RecordStore::new();
        store.append(record("INS-1", "张明", "A座办公区"));
        store.append(record("INS-2", "李华", "地库停车场"));

        let found = store.filter("张");
        assert_eq!(ids(&found), vec!["INS-1"]);
    }

    #[test]
    fn test_filter_target_case_insensitive() {
        let mut store = RecordStore::new();
        store.append(record("INS-1", "张明", "Lobby B"));
        store.append(record("INS-2", "李华", "Parking"));
        store.append(record("INS-3", "王芳", "lobby a"));

        assert_eq!(ids(&store.filter("LOBBY")), vec!["INS-3", "INS-1"]);
        assert_eq!(store.filter("").len(), 3);
        assert!(store.filter("不存在").is_empty());
    }

    #[test]
    fn test_recent_prefix() {
        let mut store = RecordStore::new();
        for i in 1..=7 {
            store.append(record(&format!("INS-{}", i), "张明", "A座"));
        }
        assert_eq!(ids(&store.recent(5)), vec!["INS-7", "INS-6", "INS-5", "INS-4", "INS-3"]);
        assert_eq!(store.recent(100).len(), 7);
        assert!(store.recent(0).is_empty());
    }

    #[test]
    fn test_with_seed_preserves_order_and_appends_in_front() {
        let mut store = RecordStore::with_seed(vec![
            record("INS-002", "李华", "地库停车场"),
            record("INS-001", "张明", "A座办公区"),
        ]);
        assert_eq!(ids(&store.list()), vec!["INS-002", "INS-001"]);

        store.append(record("INS-003", "王芳", "1号楼大厅"));
        assert_eq!(ids(&store.list()), vec!["INS-003", "INS-002", "INS-001"]);
    }

    #[test]
    fn test_with_seed_rederives_scores() {
        let mut stale = record("INS-1", "张明", "A座");
        stale.total_score = 92;
        stale.status = InspectionStatus::Passed;
        stale.items[0].score = 5;

        let store = RecordStore::with_seed(vec![stale]);
        let loaded = store.get("INS-1").unwrap();
        assert_eq!(loaded.total_score, 5);
        assert_eq!(loaded.status, InspectionStatus::Failed);
    }

    #[test]
    fn test_get_and_empty() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert!(store.get("INS-1").is_none());
    }
}
