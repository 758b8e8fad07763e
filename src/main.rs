use chrono::Local;
use clap::Parser;
use indicatif::ProgressBar;
use inspection_ai::{advisor, cli, config, error, export, interactive, loader, report};
use inspection_common::{build_advice_prompt, DashboardStats, InspectionSession};
use advisor::GeminiClient;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::New { target, inspector, catalog, seed, image, advice, no_advice, output } => {
            println!("📝 inspection-ai - 执行新考评\n");

            let catalog = loader::load_catalog(catalog.as_deref())?;
            let mut store = loader::load_store(seed.as_deref())?;

            let inspector = inspector.unwrap_or_else(|| config.inspector.clone());
            let mut session = InspectionSession::new(&catalog, inspector);
            session.set_image_url(image);

            let target = match target {
                Some(target) => target,
                None => interactive::prompt_target("")?,
            };
            session.set_target(target);

            println!(
                "检查人: {}  考评项: {}项 / 满分 {}",
                session.inspector(),
                catalog.item_count(),
                catalog.max_total()
            );

            // 1. 考评项入力
            interactive::run_checklist(&mut session)?;
            println!("\n当前总得分: {}", report::format_evaluation(&session.evaluation()));

            // 2. AI分析（任意。失敗しても提出は妨げない）
            let wants_advice = if no_advice {
                false
            } else if advice {
                true
            } else {
                interactive::confirm_advice()?
            };
            let ai_analysis = if wants_advice {
                fetch_advice(&config, &session).await
            } else {
                None
            };

            // 3. 提出
            if !interactive::confirm_submit()? {
                println!("已取消，未保存考评记录");
                return Ok(());
            }

            let record = loop {
                let now = Local::now();
                match session.finalize(
                    interactive::new_record_id(&now),
                    interactive::format_timestamp(&now),
                    ai_analysis.clone(),
                ) {
                    Ok(record) => break record,
                    Err(inspection_common::Error::MissingTarget) => {
                        println!("⚠ 请先填写考评目标");
                        let target = interactive::prompt_target(session.target())?;
                        session.set_target(target);
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            println!("\n✔ 考评报告已提交: {} ({} 分, {})", record.id, record.total_score, record.status);
            store.append(record);

            println!("\n最近巡查记录");
            report::print_history(&store.recent(5));

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&store.list())?;
                std::fs::write(&output, json)?;
                println!("\n✔ 记录已输出: {}", output.display());
            }
        }

        Commands::Evaluate { input } => {
            let session = loader::load_draft(&input)?;

            for (category, items) in session.items_by_category() {
                println!("■ {}", category);
                for item in items {
                    println!(
                        "    - {} {} {}/{}",
                        item.title,
                        item.judgment.label(),
                        item.score,
                        item.max_score
                    );
                }
            }
            println!("\n总得分: {}", report::format_evaluation(&session.evaluation()));
        }

        Commands::Advise { input, dry_run } => {
            let session = loader::load_draft(&input)?;
            let snapshot = session.snapshot(interactive::format_timestamp(&Local::now()));

            if dry_run {
                println!("{}", build_advice_prompt(&snapshot));
                return Ok(());
            }

            let spinner = start_spinner("生成中...");
            let advice =
                advisor::request_advice_with(GeminiClient::from_config(&config), &snapshot).await;
            spinner.finish_and_clear();

            println!("✨ AI 智能分析与建议\n\n{}", advice);
        }

        Commands::History { seed, search, recent, id } => {
            let store = loader::load_store(Some(&seed))?;

            if let Some(id) = id {
                match store.get(&id) {
                    Some(record) => report::print_record_detail(record),
                    None => println!("🔍 未发现记录: {}", id),
                }
                return Ok(());
            }

            let mut records = match search.as_deref() {
                Some(term) => store.filter(term),
                None => store.list(),
            };
            if let Some(n) = recent {
                records.truncate(n);
            }

            println!("历史考评记录 ({}件)\n", records.len());
            report::print_history(&records);
        }

        Commands::Dashboard { seed, recent } => {
            let store = loader::load_store(Some(&seed))?;
            let stats = DashboardStats::from_records(store.iter());
            report::print_dashboard(&stats, &store.recent(recent));
        }

        Commands::Export { seed, output, search, title } => {
            println!("📄 inspection-ai - 导出\n");

            let store = loader::load_store(Some(&seed))?;
            let records = match search.as_deref() {
                Some(term) => store.filter(term),
                None => store.list(),
            };

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            println!("- Excel を生成中... ({}件)", records.len());
            let path = export::export_history(&records, &output_dir, &title)?;
            println!("✔ Excel出力: {}", path.display());
        }

        Commands::Config { set_api_key, set_inspector, set_model, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
                println!("✔ 已设置 API 密钥");
            }
            if let Some(inspector) = set_inspector {
                config.inspector = inspector;
                changed = true;
                println!("✔ 已设置检查人");
            }
            if let Some(model) = set_model {
                config.model = model;
                changed = true;
                println!("✔ 已设置模型");
            }
            if changed {
                config.save()?;
            }

            if show {
                println!("配置:");
                println!("  模型: {}", config.model);
                println!("  检查人: {}", config.inspector);
                println!("  超时: {}秒", config.timeout_seconds);
                println!("  API 密钥: {}", if config.has_api_key() { "已设置" } else { "未设置" });
            }
        }
    }

    Ok(())
}

/// 考评中のAI分析。設定不備や通信失敗は代替テキストで続行する
async fn fetch_advice(config: &Config, session: &InspectionSession) -> Option<String> {
    if session.target().trim().is_empty() {
        println!("⚠ 请先填写考评目标");
        return None;
    }

    let snapshot = session.snapshot(interactive::format_timestamp(&Local::now()));
    let spinner = start_spinner("生成中...");
    let advice = advisor::request_advice_with(GeminiClient::from_config(config), &snapshot).await;
    spinner.finish_and_clear();

    println!("\n✨ AI 智能分析与建议\n{}\n", advice);
    Some(advice)
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
