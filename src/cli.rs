use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plantguard")]
#[command(about = "葉の写真から病害を判定するデモツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 葉の画像を解析して結果を表示
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 固定レスポンスJSON（指定時はモックの代わりに使用）
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// モックの待ち時間（ミリ秒）
        #[arg(long)]
        latency_ms: Option<u64>,

        /// 出力形式 (card/json)
        #[arg(short, long, default_value = "card")]
        format: OutputFormat,
    },

    /// 治療推奨を表示
    Treatment {
        /// 植物名（例: Corn）
        #[arg(required = true)]
        plant: String,

        /// 病害名（例: Common_rust）
        #[arg(required = true)]
        disease: String,
    },

    /// 設定を表示/編集
    Config {
        /// モックの待ち時間を設定（ミリ秒）
        #[arg(long)]
        set_latency_ms: Option<u64>,

        /// 固定レスポンスJSONを設定
        #[arg(long)]
        set_fixture: Option<PathBuf>,

        /// 固定レスポンスJSONの設定を解除
        #[arg(long)]
        clear_fixture: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Card,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "card" | "text" => Ok(OutputFormat::Card),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use card or json", s)),
        }
    }
}
