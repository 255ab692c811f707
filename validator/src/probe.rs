//! プローブ実行
//!
//! 解決済みエンドポイントへのGETリクエスト発行と結果分類

use integration_validator_common::config::DEFAULT_ACCEPT;
use integration_validator_common::types::{ProbeResult, ProbeStatus, ResolvedEndpoint};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// ステータスコード分類ルール
///
/// `from..=to`の範囲に入るステータスコードを指定の分類へ写す
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    /// 範囲下限（含む）
    pub from: u16,
    /// 範囲上限（含む）
    pub to: u16,
    /// 分類結果
    pub status: ProbeStatus,
    /// 結果メッセージ
    pub message: String,
}

impl ClassificationRule {
    /// 分類ルールを作成する
    pub fn new(from: u16, to: u16, status: ProbeStatus, message: &str) -> Self {
        Self {
            from,
            to,
            status,
            message: message.to_string(),
        }
    }
}

/// ステータスコード→分類のポリシーテーブル
///
/// 先頭から順に評価し、最初にマッチしたルールを適用する。どのルールにも
/// マッチしなかったステータスは「到達できた」としてSuccess扱い
#[derive(Debug, Clone)]
pub struct ClassificationPolicy {
    rules: Vec<ClassificationRule>,
}

impl ClassificationPolicy {
    /// ルールテーブルからポリシーを作成する
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// 受信したステータスコードを分類する
    pub fn classify(&self, status_code: u16) -> (ProbeStatus, String) {
        for rule in &self.rules {
            if (rule.from..=rule.to).contains(&status_code) {
                return (rule.status, rule.message.clone());
            }
        }
        (ProbeStatus::Success, format!("HTTP {status_code}"))
    }
}

impl Default for ClassificationPolicy {
    /// 既定の分類テーブル
    ///
    /// 401は「サービスは存在し認証を要求している」として到達可能＝Success
    /// 扱いとする（方針としての決定）。4xx/5xxのうち404・403・5xxのみが
    /// Errorで、その他の受信済みステータスは到達可能としてSuccess
    fn default() -> Self {
        Self::new(vec![
            ClassificationRule::new(401, 401, ProbeStatus::Success, "authentication required"),
            ClassificationRule::new(403, 403, ProbeStatus::Error, "access forbidden"),
            ClassificationRule::new(404, 404, ProbeStatus::Error, "endpoint not found"),
            ClassificationRule::new(500, 599, ProbeStatus::Error, "server error"),
        ])
    }
}

/// プローブ実行器
///
/// 共有可変状態を持たず、並行呼び出しに対して安全。HTTPクライアントの
/// コネクションプールのみを全プローブで共有する
#[derive(Clone)]
pub struct ProbeExecutor {
    client: Client,
    base_url: String,
    timeout: Duration,
    policy: ClassificationPolicy,
}

impl ProbeExecutor {
    /// 新しいプローブ実行器を作成する
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
            policy: ClassificationPolicy::default(),
        }
    }

    /// 分類ポリシーを差し替える
    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 単一エンドポイントのプローブ
    ///
    /// GETを発行し、壁時計時間を計測して結果を分類する。タイムアウト・
    /// トランスポート障害を含むあらゆる失敗はProbeResultへ分類され、
    /// この呼び出し自体は失敗しない。タイムアウト境界はリクエスト
    /// タイムアウトの超過時点で発火し、制限内に受信し終えた応答は
    /// ステータスコードで分類される
    pub async fn probe(&self, endpoint: &ResolvedEndpoint) -> ProbeResult {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path);
        let start = Instant::now();

        let result = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, DEFAULT_ACCEPT)
            .timeout(self.timeout)
            .send()
            .await;
        let response_time_ms = start.elapsed().as_millis() as i64;

        let (status, status_code, message) = match result {
            Ok(response) => {
                let code = response.status().as_u16();
                let (status, message) = self.policy.classify(code);
                (status, Some(code), message)
            }
            Err(e) if e.is_timeout() => {
                (ProbeStatus::Timeout, None, "request timed out".to_string())
            }
            Err(_) => (
                ProbeStatus::Error,
                None,
                "cannot connect to server".to_string(),
            ),
        };

        if status == ProbeStatus::Success {
            debug!(
                service = %endpoint.service,
                endpoint = %endpoint.path,
                status_code = ?status_code,
                response_time_ms,
                "Probe succeeded"
            );
        } else {
            warn!(
                service = %endpoint.service,
                endpoint = %endpoint.path,
                status_code = ?status_code,
                message = %message,
                response_time_ms,
                "Probe failed"
            );
        }

        ProbeResult {
            service: endpoint.service.clone(),
            endpoint: endpoint.path.clone(),
            status,
            status_code,
            message,
            response_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_success_codes() {
        let policy = ClassificationPolicy::default();

        assert_eq!(policy.classify(200), (ProbeStatus::Success, "HTTP 200".to_string()));
        assert_eq!(policy.classify(204), (ProbeStatus::Success, "HTTP 204".to_string()));
        assert_eq!(policy.classify(302), (ProbeStatus::Success, "HTTP 302".to_string()));
        // 400はテーブルにないため到達可能扱い
        assert_eq!(policy.classify(400), (ProbeStatus::Success, "HTTP 400".to_string()));
    }

    #[test]
    fn test_default_policy_401_is_reachable() {
        let (status, message) = ClassificationPolicy::default().classify(401);

        assert_eq!(status, ProbeStatus::Success);
        assert_eq!(message, "authentication required");
    }

    #[test]
    fn test_default_policy_error_codes() {
        let policy = ClassificationPolicy::default();

        assert_eq!(
            policy.classify(404),
            (ProbeStatus::Error, "endpoint not found".to_string())
        );
        assert_eq!(
            policy.classify(403),
            (ProbeStatus::Error, "access forbidden".to_string())
        );
        assert_eq!(
            policy.classify(500),
            (ProbeStatus::Error, "server error".to_string())
        );
        assert_eq!(
            policy.classify(503),
            (ProbeStatus::Error, "server error".to_string())
        );
        assert_eq!(
            policy.classify(599),
            (ProbeStatus::Error, "server error".to_string())
        );
    }

    #[test]
    fn test_custom_policy_first_match_wins() {
        let policy = ClassificationPolicy::new(vec![
            ClassificationRule::new(500, 500, ProbeStatus::Success, "expected failure"),
            ClassificationRule::new(500, 599, ProbeStatus::Error, "server error"),
        ]);

        assert_eq!(
            policy.classify(500),
            (ProbeStatus::Success, "expected failure".to_string())
        );
        assert_eq!(
            policy.classify(502),
            (ProbeStatus::Error, "server error".to_string())
        );
    }
}
