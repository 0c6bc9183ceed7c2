use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use plantguard::{analyze, classifier, cli, config, error, render};
use plantguard_common::TreatmentTable;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::Result;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, fixture, latency_ms, format } => {
            let mut config = config;
            if let Some(fixture) = fixture {
                config.response_fixture = Some(fixture);
            }
            if let Some(ms) = latency_ms {
                config.mock_latency_ms = ms;
            }

            let service = classifier::build_service(&config);

            let pb = (format == OutputFormat::Card).then(|| spinner("Analyzing Leaf..."));
            let outcome = analyze::analyze_file(&image, service.as_ref()).await;
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }

            let report = match outcome {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("✖ {}", e);
                    std::process::exit(1);
                }
            };

            match format {
                OutputFormat::Card => {
                    println!("📸 plantguard - 解析結果\n");
                    println!("✔ Selected: {}\n", report.file_name);
                    println!("{}", render::render_report(&report));
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report.result)?);
                }
            }
        }

        Commands::Treatment { plant, disease } => {
            let table = TreatmentTable::builtin();
            println!("{}", table.lookup(&plant, &disease));
        }

        Commands::Config { set_latency_ms, set_fixture, clear_fixture, show } => {
            // 環境変数の上書きは保存しない
            let mut saved = Config::load_from(&Config::config_path()?)?;
            let changed = set_latency_ms.is_some() || set_fixture.is_some() || clear_fixture;

            if let Some(ms) = set_latency_ms {
                saved.mock_latency_ms = ms;
            }
            if let Some(path) = set_fixture {
                saved.response_fixture = Some(path);
            }
            if clear_fixture {
                saved.response_fixture = None;
            }
            if changed {
                saved.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let effective = if changed { Config::load()? } else { config };
                println!("設定:");
                println!("  モック待ち時間: {}ms", effective.mock_latency_ms);
                println!(
                    "  固定レスポンス: {}",
                    effective
                        .response_fixture
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定（モック使用）".to_string())
                );
                println!("  タイムアウト: {}秒", effective.timeout_seconds);
            }
        }
    }

    Ok(())
}
