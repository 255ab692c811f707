//! 共通型定義
//!
//! ServiceDescriptor, ProbeResult, IntegrationReport等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTPメソッド
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET（プローブ対象となる唯一のメソッド）
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// HttpMethodを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 宣言済みエンドポイント
///
/// レジストリ設定に現れる形のまま保持し、テンプレートは未展開
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEndpoint {
    /// HTTPメソッド
    pub method: HttpMethod,
    /// パステンプレート（例: `/api/objectifs/{id}`）
    #[serde(rename = "pathTemplate")]
    pub path_template: String,
}

/// サービス記述子
///
/// 設定から構築され、検証実行中は不変
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// サービス名（一意キー）
    #[serde(rename = "serviceName")]
    pub name: String,
    /// 有効フラグ（falseのサービスはプローブ対象から除外）
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 宣言済みエンドポイント一覧
    #[serde(rename = "endpoints")]
    pub declared_endpoints: Vec<RawEndpoint>,
}

fn default_enabled() -> bool {
    true
}

/// 解決済みエンドポイント
///
/// パスパラメータ展開後の、1プローブに対応する一時的な値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// 所属サービス名
    pub service: String,
    /// リクエスト可能な具体的パス
    pub path: String,
}

/// プローブ結果の分類
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// エンドポイントに到達できた
    Success,
    /// 到達したが受け入れ不能なステータス、またはトランスポート障害
    Error,
    /// タイムアウト内に応答なし
    Timeout,
}

impl ProbeStatus {
    /// ProbeStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 単一プローブの結果
///
/// ResolvedEndpointにつき必ず1件生成され、以後不変
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    /// 所属サービス名
    pub service: String,
    /// プローブしたパス
    pub endpoint: String,
    /// 分類結果
    pub status: ProbeStatus,
    /// 受信したHTTPステータスコード（トランスポート障害・タイムアウト時はNone）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// 結果メッセージ
    pub message: String,
    /// 応答時間（ミリ秒、結果によらず常に記録）
    pub response_time_ms: i64,
}

impl ProbeResult {
    /// Success分類かどうか
    pub fn is_success(&self) -> bool {
        self.status == ProbeStatus::Success
    }
}

/// 全体健全性の判定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// 成功率 >= 0.90
    Healthy,
    /// 0.70 <= 成功率 < 0.90
    Degraded,
    /// 成功率 < 0.70、またはプローブ件数0
    Unhealthy,
}

impl OverallStatus {
    /// OverallStatusを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }

    /// 成功数と総数から判定する
    ///
    /// 0.90/0.70の閾値は下限を含む。浮動小数点の丸めに影響されないよう
    /// 整数演算で比較する。件数0は「健全である証拠がない」としてUnhealthy
    pub fn from_counts(success_count: usize, total_tests: usize) -> Self {
        if total_tests == 0 {
            return Self::Unhealthy;
        }
        if success_count * 10 >= total_tests * 9 {
            Self::Healthy
        } else if success_count * 10 >= total_tests * 7 {
            Self::Degraded
        } else {
            Self::Unhealthy
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 統合検証レポート
///
/// 1回の検証実行ごとに新規構築される読み取り専用の集約結果。
/// 永続化されない（呼び出しごとに再計算される）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationReport {
    /// レポート生成時刻
    pub timestamp: DateTime<Utc>,
    /// 実行したプローブ総数
    pub total_tests: usize,
    /// Success件数
    pub success_count: usize,
    /// Error件数
    pub error_count: usize,
    /// Timeout件数
    pub timeout_count: usize,
    /// 平均応答時間（ミリ秒、プローブ0件の場合0.0）
    pub average_response_time_ms: f64,
    /// 個別プローブ結果（完了順を保持）
    pub results: Vec<ProbeResult>,
    /// 全体健全性
    pub overall_status: OverallStatus,
}

impl IntegrationReport {
    /// 成功率（0.0〜1.0、プローブ0件の場合0.0）
    pub fn success_rate(&self) -> f64 {
        if self.total_tests == 0 {
            0.0
        } else {
            self.success_count as f64 / self.total_tests as f64
        }
    }
}
