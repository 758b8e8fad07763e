//! コンソール表示
//!
//! 記録一覧・控制面板・得分の表示文字列を組み立てる。

use inspection_common::{DashboardStats, Evaluation, InspectionRecord};

/// 得分表示（例: "25 / 30 (83.3%) 整改中"）
pub fn format_evaluation(evaluation: &Evaluation) -> String {
    match evaluation.percentage() {
        Some(percent) => format!(
            "{} / {} ({:.1}%) {}",
            evaluation.total_score, evaluation.max_score, percent, evaluation.status
        ),
        None => format!(
            "{} / {} (-) {}",
            evaluation.total_score, evaluation.max_score, evaluation.status
        ),
    }
}

/// 記録一覧の1行
pub fn format_record_line(record: &InspectionRecord) -> String {
    format!(
        "{:<18} {:<6} {:>4}  {}  {}  👤 {}",
        record.id,
        record.status.label(),
        record.total_score,
        record.timestamp,
        record.target,
        record.inspector
    )
}

/// AI分析の要約（先頭2行まで）
pub fn advice_excerpt(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn print_history(records: &[&InspectionRecord]) {
    if records.is_empty() {
        println!("🔍 未发现匹配记录");
        return;
    }

    for record in records {
        println!("{}", format_record_line(record));
        if let Some(advice) = record.ai_analysis.as_deref() {
            println!("    ✨ {}", advice_excerpt(advice));
        }
    }
}

pub fn print_record_detail(record: &InspectionRecord) {
    println!("记录: {}", record.id);
    println!("  考评目标: {}", record.target);
    println!("  检查人: {}", record.inspector);
    println!("  时间: {}", record.timestamp);
    println!("  得分: {} / {}  {}", record.total_score, record.max_score(), record.status);
    if let Some(image) = record.image_url.as_deref() {
        println!("  图片: {}", image);
    }

    let mut current_category: Option<&str> = None;
    for item in &record.items {
        if current_category != Some(item.category.as_str()) {
            println!("  [{}]", item.category);
            current_category = Some(item.category.as_str());
        }
        let comment = if item.has_comment() {
            format!("  备注: {}", item.comment.trim())
        } else {
            String::new()
        };
        println!(
            "    - {} {} {}/{}{}",
            item.title,
            item.judgment.label(),
            item.score,
            item.max_score,
            comment
        );
    }

    if let Some(advice) = record.ai_analysis.as_deref() {
        println!("\n✨ AI 分析:\n{}", advice);
    }
}

pub fn print_dashboard(stats: &DashboardStats, recent: &[&InspectionRecord]) {
    println!("控制面板概览");
    println!("  📋 累计考评: {}", stats.total_count);
    println!(
        "  ⭐ 平均得分: {}",
        stats
            .average_score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "  ✅ 合格率: {}",
        stats
            .pass_rate
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  ⏳ 待处理: {}", stats.pending_count);
    println!("  ❌ 不合格: {}", stats.failed_count);

    if !stats.monthly.is_empty() {
        println!("\n考评得分趋势");
        for month in &stats.monthly {
            println!(
                "  {}  平均 {:>5.1}  {}次",
                month.month, month.average_score, month.count
            );
        }
    }

    println!("\n最近巡查记录");
    print_history(recent);
}
