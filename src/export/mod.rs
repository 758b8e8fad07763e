//! 考评记录のExcel出力

use crate::error::{InspectionAiError, Result};
use inspection_common::export::excel_core::generate_history_buffer;
use inspection_common::InspectionRecord;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

/// 記録一覧をExcelに出力し、出力先パスを返す
///
/// `output` がディレクトリ（または拡張子なし）の場合は `{title}.xlsx` を作成する。
pub fn export_history(records: &[&InspectionRecord], output: &Path, title: &str) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, title, "xlsx");

    let buffer = generate_history_buffer(records).map_err(InspectionAiError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, buffer)?;

    Ok(output_path)
}
