//! 対話式考评入力モジュール
//!
//! 考评项ごとに判定・得分・備考を入力し、入力のたびに総得分を再計算して表示する。

use crate::error::{InspectionAiError, Result};
use crate::report::format_evaluation;
use chrono::{DateTime, Local};
use dialoguer::{Confirm, Input, Select};
use inspection_common::{ChecklistItem, InspectionSession, Judgment};

/// 記録IDを採番（ミリ秒タイムスタンプ）
pub fn new_record_id(now: &DateTime<Local>) -> String {
    format!("INS-{}", now.timestamp_millis())
}

/// 記録の時刻表示
pub fn format_timestamp(now: &DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M").to_string()
}

/// 得分入力を解釈
///
/// 空入力は「変更なし」(None)。範囲外・数値以外はエラーメッセージを返す。
pub fn parse_score_input(input: &str, max_score: u32) -> std::result::Result<Option<u32>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<u32>() {
        Ok(score) if score <= max_score => Ok(Some(score)),
        Ok(score) => Err(format!("得分 {} 超出范围 (0-{})", score, max_score)),
        Err(_) => Err(format!("请输入 0-{} 的整数", max_score)),
    }
}

/// 考评目标を入力（空は不可）
pub fn prompt_target(current: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt("考评目标 / 区域（例如：1号楼大厅）")
        .with_initial_text(current)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("请先填写考评目标")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(|e| InspectionAiError::CliExecution(e.to_string()))
}

/// 全考评项を対話的に入力
pub fn run_checklist(session: &mut InspectionSession) -> Result<()> {
    let item_ids: Vec<(String, String)> = session
        .items()
        .iter()
        .map(|item| (item.id.clone(), item.category.clone()))
        .collect();
    let total = item_ids.len();

    let mut current_category = String::new();
    for (count, (item_id, category)) in item_ids.iter().enumerate() {
        if *category != current_category {
            println!("\n■ {}", category);
            current_category = category.clone();
        }

        let item = find_item(session, item_id)?.clone();
        println!(
            "[{}/{}] {} (满分 {})\n      {}",
            count + 1,
            total,
            item.title,
            item.max_score,
            item.description
        );

        let judgment = prompt_judgment(&item)?;
        session.set_judgment(item_id, judgment)?;

        let current = find_item(session, item_id)?.score;
        if let Some(score) = prompt_score(current, item.max_score)? {
            session.override_score(item_id, score)?;
        }

        let comment: String = Input::new()
            .with_prompt("备注（可空）")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| InspectionAiError::CliExecution(e.to_string()))?;
        session.set_comment(item_id, comment.trim())?;

        println!("  → 当前总得分: {}", format_evaluation(&session.evaluation()));
    }

    Ok(())
}

/// AI分析を依頼するか確認
pub fn confirm_advice() -> Result<bool> {
    Confirm::new()
        .with_prompt("是否获取 AI 智能分析与建议？")
        .default(true)
        .interact()
        .map_err(|e| InspectionAiError::CliExecution(e.to_string()))
}

/// 提出確認
pub fn confirm_submit() -> Result<bool> {
    Confirm::new()
        .with_prompt("确认并提交考评报告？")
        .default(true)
        .interact()
        .map_err(|e| InspectionAiError::CliExecution(e.to_string()))
}

fn prompt_judgment(item: &ChecklistItem) -> Result<Judgment> {
    let labels: Vec<&str> = Judgment::ALL.iter().map(|j| j.label()).collect();
    let default = Judgment::ALL
        .iter()
        .position(|j| *j == item.judgment)
        .unwrap_or(0);

    let selected = Select::new()
        .with_prompt("判定")
        .items(&labels[..])
        .default(default)
        .interact()
        .map_err(|e| InspectionAiError::CliExecution(e.to_string()))?;

    Ok(Judgment::ALL[selected])
}

fn prompt_score(current: u32, max_score: u32) -> Result<Option<u32>> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("得分 [{}] (0-{}，回车保持)", current, max_score))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| InspectionAiError::CliExecution(e.to_string()))?;

        match parse_score_input(&input, max_score) {
            Ok(score) => return Ok(score),
            Err(message) => println!("  ⚠ {}", message),
        }
    }
}

fn find_item<'a>(session: &'a InspectionSession, item_id: &str) -> Result<&'a ChecklistItem> {
    session
        .items()
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| inspection_common::Error::UnknownItem(item_id.to_string()).into())
}
