//! CLIインターフェース
//!
//! レジストリ全体または単一サービスの検証を実行し、レポートを出力する

use clap::Parser;
use std::path::PathBuf;

/// Integration Validator - Reachability checks for backend service endpoints
#[derive(Parser, Debug)]
#[command(name = "integration-validator")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    INTEGRATION_VALIDATOR_BASE_URL     Probe target base URL (default: http://localhost:8080)
    INTEGRATION_VALIDATOR_TIMEOUT_MS   Per-probe timeout in milliseconds (default: 10000)
    INTEGRATION_VALIDATOR_DEADLINE_MS  Overall run deadline in milliseconds (optional)
    INTEGRATION_VALIDATOR_LOG_LEVEL    Log level (default: info)
"#)]
pub struct Cli {
    /// プローブ先のベースURL（環境変数より優先される）
    #[arg(long)]
    pub base_url: Option<String>,

    /// プローブ毎のタイムアウト（ミリ秒）
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// 実行全体のデッドライン（ミリ秒）
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// レジストリ定義JSONファイル（省略時は組み込みレジストリ）
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// 指定したサービスのみ検証する
    #[arg(long)]
    pub service: Option<String>,

    /// レポートをJSONで出力する
    #[arg(long)]
    pub json: bool,
}
