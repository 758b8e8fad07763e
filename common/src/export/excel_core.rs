//! Excel生成（共通ライブラリ）
//!
//! 考评记录の一覧シートと考评项の明細シートを持つブックを生成

use crate::types::InspectionRecord;
use rust_xlsxwriter::*;

/// 一覧シートの列（見出し, 列幅）
const SUMMARY_COLUMNS: &[(&str, f64)] = &[
    ("ID", 18.0),
    ("考评目标", 20.0),
    ("检查人", 12.0),
    ("时间", 18.0),
    ("得分", 8.0),
    ("满分", 8.0),
    ("状态", 10.0),
    ("AI 分析", 60.0),
];

/// 明細シートの列（見出し, 列幅）
const DETAIL_COLUMNS: &[(&str, f64)] = &[
    ("记录ID", 18.0),
    ("考评目标", 20.0),
    ("分类", 12.0),
    ("考评项", 14.0),
    ("判定", 8.0),
    ("得分", 8.0),
    ("满分", 8.0),
    ("备注", 40.0),
];

pub const SUMMARY_SHEET_NAME: &str = "考评记录";
pub const DETAIL_SHEET_NAME: &str = "考评明细";

/// Excelをバッファに生成
///
/// # Arguments
/// * `records` - 出力する考评记录（渡された順に出力）
pub fn generate_history_buffer(records: &[&InspectionRecord]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let number_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 一覧シート
    let summary = workbook.add_worksheet();
    summary
        .set_name(SUMMARY_SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    write_header(summary, SUMMARY_COLUMNS, &header_format)?;

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        let texts = [
            (0, record.id.as_str()),
            (1, record.target.as_str()),
            (2, record.inspector.as_str()),
            (3, record.timestamp.as_str()),
            (6, record.status.label()),
            (7, record.ai_analysis.as_deref().unwrap_or("")),
        ];
        for (col, text) in texts {
            summary
                .write_string_with_format(row, col, text, &value_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
        summary
            .write_number_with_format(row, 4, record.total_score, &number_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        summary
            .write_number_with_format(row, 5, record.max_score(), &number_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    // 明細シート
    let detail = workbook.add_worksheet();
    detail
        .set_name(DETAIL_SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    write_header(detail, DETAIL_COLUMNS, &header_format)?;

    let mut row: u32 = 1;
    for record in records {
        for item in &record.items {
            let texts = [
                (0, record.id.as_str()),
                (1, record.target.as_str()),
                (2, item.category.as_str()),
                (3, item.title.as_str()),
                (4, item.judgment.label()),
                (7, item.comment.as_str()),
            ];
            for (col, text) in texts {
                detail
                    .write_string_with_format(row, col, text, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
            detail
                .write_number_with_format(row, 5, item.score, &number_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            detail
                .write_number_with_format(row, 6, item.max_score, &number_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            row += 1;
        }
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_header(
    worksheet: &mut Worksheet,
    columns: &[(&str, f64)],
    format: &Format,
) -> Result<(), String> {
    for (col, (label, width)) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *label, format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChecklistItem, InspectionStatus, Judgment};

    fn record() -> InspectionRecord {
        InspectionRecord {
            id: "INS-001".to_string(),
            inspector: "张明".to_string(),
            target: "A座办公区".to_string(),
            timestamp: "2024-05-15 10:30".to_string(),
            total_score: 10,
            status: InspectionStatus::Failed,
            items: vec![
                ChecklistItem {
                    id: "env_1".to_string(),
                    category: "环境卫生".to_string(),
                    title: "地面清洁".to_string(),
                    score: 10,
                    max_score: 10,
                    judgment: Judgment::Pass,
                    ..Default::default()
                },
                ChecklistItem {
                    id: "sec_1".to_string(),
                    category: "安全检查".to_string(),
                    title: "消防设施".to_string(),
                    score: 0,
                    max_score: 20,
                    judgment: Judgment::Fail,
                    comment: "灭火器过期".to_string(),
                    ..Default::default()
                },
            ],
            ai_analysis: Some("尽快更换灭火器".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_generate_history_buffer_is_xlsx() {
        let record = record();
        let buffer = generate_history_buffer(&[&record]).unwrap();
        // xlsx は zip コンテナ
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_history_buffer_empty() {
        let buffer = generate_history_buffer(&[]).unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }
}
