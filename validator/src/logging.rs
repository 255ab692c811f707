//! ロギング初期化ユーティリティ

use tracing_subscriber::EnvFilter;

/// ロギングを初期化する
///
/// フィルタはINTEGRATION_VALIDATOR_LOG_LEVEL環境変数から取得し、
/// 未設定の場合はinfoレベル。二重初期化はエラーとして返す
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env("INTEGRATION_VALIDATOR_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()?;

    Ok(())
}
