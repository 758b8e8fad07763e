use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspect")]
#[command(about = "巡查考评记录・得分统计・AI 整改建议工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 对话式执行新考评
    New {
        /// 考评目标 / 区域（省略時は対話入力）
        #[arg(short, long)]
        target: Option<String>,

        /// 检查人（省略時は設定値）
        #[arg(short, long)]
        inspector: Option<String>,

        /// 考评清单ファイル（JSON / CSV、省略時は組み込み清单）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 初期データ（InspectionRecord の JSON 配列、新しい順）
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// 图片引用（URL / パス）
        #[arg(long)]
        image: Option<String>,

        /// AI分析を確認なしで実行
        #[arg(long, conflicts_with = "no_advice")]
        advice: bool,

        /// AI分析を実行しない
        #[arg(long)]
        no_advice: bool,

        /// 提出後の記録一覧を JSON で出力
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 下書き JSON の得分・判定を計算
    Evaluate {
        /// 下書き JSON ファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 下書き JSON について AI 整改建议を取得
    Advise {
        /// 下書き JSON ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// プロンプトを表示するだけで送信しない
        #[arg(long)]
        dry_run: bool,
    },

    /// 历史考评记录を表示
    History {
        /// 初期データ JSON
        #[arg(required = true)]
        seed: PathBuf,

        /// 考评目标・检查人で検索
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// 最新 n 件のみ
        #[arg(short, long)]
        recent: Option<usize>,

        /// 記録IDを指定して詳細表示
        #[arg(long)]
        id: Option<String>,
    },

    /// 控制面板（統計）を表示
    Dashboard {
        /// 初期データ JSON
        #[arg(required = true)]
        seed: PathBuf,

        /// 最近巡查记录の件数
        #[arg(short, long, default_value = "5")]
        recent: usize,
    },

    /// 考评记录を Excel に出力
    Export {
        /// 初期データ JSON
        #[arg(required = true)]
        seed: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 考评目标・检查人で絞り込み
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// ファイル名（ディレクトリ指定時）
        #[arg(short, long, default_value = "考评记录")]
        title: String,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 检查人を設定
        #[arg(long)]
        set_inspector: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new() {
        let cli = Cli::parse_from(["inspect", "new", "-t", "A座办公区", "--no-advice"]);
        match cli.command {
            Commands::New { target, no_advice, advice, .. } => {
                assert_eq!(target.as_deref(), Some("A座办公区"));
                assert!(no_advice);
                assert!(!advice);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_advice_flags_conflict() {
        let result = Cli::try_parse_from(["inspect", "new", "--advice", "--no-advice"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_history_search() {
        let cli = Cli::parse_from(["inspect", "-v", "history", "seed.json", "-q", "张"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::History { seed, search, recent, id } => {
                assert_eq!(seed, PathBuf::from("seed.json"));
                assert_eq!(search.as_deref(), Some("张"));
                assert_eq!(recent, None);
                assert_eq!(id, None);
            }
            _ => panic!("unexpected command"),
        }
    }
}
