//! 入力データ読み込み
//!
//! - 考评清单: 組み込み / JSON / CSV
//! - 初期データ（seed）: InspectionRecord の JSON 配列（新しい順）
//! - 下書き: InspectionSession の JSON

use crate::error::{InspectionAiError, Result};
use inspection_common::{ChecklistCatalog, InspectionRecord, InspectionSession, RecordStore};
use std::path::Path;
use tracing::debug;

/// 考评清单を読み込む（未指定なら組み込み清单）
pub fn load_catalog(path: Option<&Path>) -> Result<ChecklistCatalog> {
    let Some(path) = path else {
        return Ok(ChecklistCatalog::builtin());
    };
    ensure_exists(path)?;

    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let catalog = if is_csv {
        ChecklistCatalog::from_csv(path)?
    } else {
        ChecklistCatalog::from_json(path)?
    };
    debug!(path = %path.display(), items = catalog.item_count(), "catalog loaded");
    Ok(catalog)
}

/// 初期データのレコードを読み込む
pub fn load_records(path: &Path) -> Result<Vec<InspectionRecord>> {
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)?;
    let records: Vec<InspectionRecord> = serde_json::from_str(&content)?;
    Ok(records)
}

/// 初期データからストアを構築（未指定なら空）
pub fn load_store(seed: Option<&Path>) -> Result<RecordStore> {
    match seed {
        Some(path) => {
            let records = load_records(path)?;
            debug!(path = %path.display(), count = records.len(), "seed records loaded");
            Ok(RecordStore::with_seed(records))
        }
        None => Ok(RecordStore::new()),
    }
}

/// 下書きを読み込む
pub fn load_draft(path: &Path) -> Result<InspectionSession> {
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)?;
    Ok(InspectionSession::from_json_str(&content)?)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(InspectionAiError::FileNotFound(path.display().to_string()))
    }
}
