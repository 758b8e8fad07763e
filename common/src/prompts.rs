//! プロンプト生成モジュール
//!
//! AI分析（整改建议）依頼用のプロンプトと、失敗時の代替テキスト:
//! - build_advice_prompt: 考评记录からプロンプトを生成
//! - ADVICE_EMPTY_FALLBACK / ADVICE_ERROR_FALLBACK: 応答なし・通信失敗時の表示文言

use crate::types::{ChecklistItem, InspectionRecord};

/// 備考が空のときの表示
pub const NO_COMMENT_PLACEHOLDER: &str = "无";

/// AIが空の応答を返したときの代替テキスト
pub const ADVICE_EMPTY_FALLBACK: &str = "无法生成建议，请稍后再试。";

/// 通信・サービスエラー時の代替テキスト
pub const ADVICE_ERROR_FALLBACK: &str = "分析过程中出现错误，建议检查网络或 API 配置。";

/// 考评项1件分の行
///
/// 形式: `- [分类] 标题: 判定 (得分: x/y) - 备注: ...`
pub fn format_item_line(item: &ChecklistItem) -> String {
    let comment = if item.has_comment() {
        item.comment.trim()
    } else {
        NO_COMMENT_PLACEHOLDER
    };

    format!(
        "- [{}] {}: {} (得分: {}/{}) - 备注: {}",
        item.category,
        item.title,
        item.judgment.code(),
        item.score,
        item.max_score,
        comment
    )
}

/// 整改建议プロンプト生成
///
/// # Arguments
/// * `record` - 考评记录（確定前のスナップショットも可）
///
/// # Returns
/// 考评目标・得分・判定・全考评项を含むプロンプト文字列
pub fn build_advice_prompt(record: &InspectionRecord) -> String {
    let item_lines = record
        .items
        .iter()
        .map(format_item_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"作为一名资深的质量管理与安全专家，请分析以下巡查考评结果并给出专业建议。

考评目标：{target}
考评得分：{total_score}
考评状态：{status}

详细考评项：
{item_lines}

请提供：
1. 本次考评的整体评价。
2. 针对失分项的具体整改建议。
3. 长期的预防性改进措施。

请使用 Markdown 格式回复，语言简洁专业。"#,
        target = record.target,
        total_score = record.total_score,
        status = record.status.label(),
    )
}
