//! Integration Validator 共通クレート
//!
//! 検証サブシステムと呼び出し側が共有する型定義・設定構造体

#![warn(missing_docs)]

/// 設定管理（ValidatorConfig、環境変数ヘルパー）
pub mod config;

/// 共通型定義（ServiceDescriptor, ProbeResult, IntegrationReport等）
pub mod types;
