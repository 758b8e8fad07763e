//! Inspection Common Library
//!
//! 巡查考评の得分集計・考评记录管理・AI分析プロンプト生成の共通ロジック

pub mod types;
pub mod error;
pub mod score;
pub mod catalog;
pub mod session;
pub mod store;
pub mod prompts;
pub mod stats;
pub mod export;

pub use types::{ChecklistItem, InspectionRecord, InspectionStatus, Judgment};
pub use error::{Error, Result};
pub use score::{classify, evaluate, Evaluation};
pub use catalog::{CatalogCategory, CatalogItem, ChecklistCatalog, MAX_ITEM_SCORE};
pub use session::{InspectionSession, DRAFT_RECORD_ID};
pub use store::RecordStore;
pub use prompts::{build_advice_prompt, ADVICE_EMPTY_FALLBACK, ADVICE_ERROR_FALLBACK};
pub use stats::{DashboardStats, MonthlyStat};
