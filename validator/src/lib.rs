//! Integration Health Validator
//!
//! バックエンドサービス群のエンドポイント到達性を並行プローブで検証し、
//! 集約レポートを生成するサブシステム

#![warn(missing_docs)]

/// CLIインターフェース
pub mod cli;

/// ロギング初期化ユーティリティ
pub mod logging;

/// プローブ実行・分類
pub mod probe;

/// エンドポイントレジストリ
pub mod registry;

/// レポート集約
pub mod report;

/// パステンプレート展開
pub mod templater;

/// 検証ファサード
pub mod validator;

pub use validator::{IntegrationValidator, ValidatorError};
