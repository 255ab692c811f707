//! 設定管理
//!
//! ValidatorConfig等の設定構造体と環境変数ヘルパー

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// プローブリクエストのAcceptヘッダ既定値
pub const DEFAULT_ACCEPT: &str = "application/json";

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 環境変数の値が解釈できない
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// 環境変数名
        name: String,
        /// 解釈できなかった値
        value: String,
    },
    /// レジストリファイルの読み込み失敗
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),
    /// レジストリファイルの解析失敗
    #[error("failed to parse registry file: {0}")]
    Json(#[from] serde_json::Error),
}

/// 検証サブシステム設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// プローブ先ベースURL (デフォルト: "http://localhost:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// プローブ毎のタイムアウト（ミリ秒）(デフォルト: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// 実行全体のデッドライン（ミリ秒、未設定なら個別タイムアウトのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_deadline_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            overall_deadline_ms: None,
        }
    }
}

impl ValidatorConfig {
    /// 環境変数から設定を構築する
    ///
    /// 未設定の変数にはデフォルト値を適用する
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_env_or("INTEGRATION_VALIDATOR_BASE_URL", &default_base_url()),
            timeout_ms: get_env_parse("INTEGRATION_VALIDATOR_TIMEOUT_MS", default_timeout_ms())?,
            overall_deadline_ms: get_env_parse_opt("INTEGRATION_VALIDATOR_DEADLINE_MS")?,
        })
    }
}

/// 環境変数を取得し、未設定ならデフォルト値を返す
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// 環境変数を取得して解釈し、未設定ならデフォルト値を返す
pub fn get_env_parse<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// 環境変数を取得して解釈し、未設定ならNoneを返す
pub fn get_env_parse_opt<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
