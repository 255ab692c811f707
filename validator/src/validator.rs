//! 検証ファサード
//!
//! レジストリ→テンプレート展開→並行プローブ→集約のオーケストレーション

use crate::probe::{ClassificationPolicy, ProbeExecutor};
use crate::registry::EndpointRegistry;
use crate::{report, templater};
use integration_validator_common::config::ValidatorConfig;
use integration_validator_common::types::{
    HttpMethod, IntegrationReport, ProbeResult, ProbeStatus, ResolvedEndpoint,
};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info};

/// ファサード操作のエラー
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// レジストリに存在しないサービス名が指定された
    #[error("unknown service: {0}")]
    UnknownService(String),
}

/// 統合ヘルス検証ファサード
///
/// 呼び出しごとに独立した検証を実行し、状態を持ち越さない
#[derive(Clone)]
pub struct IntegrationValidator {
    registry: EndpointRegistry,
    executor: ProbeExecutor,
    overall_deadline: Option<Duration>,
}

impl IntegrationValidator {
    /// 設定とレジストリから検証器を構築する
    pub fn new(config: &ValidatorConfig, registry: EndpointRegistry) -> Self {
        let executor = ProbeExecutor::new(
            Client::new(),
            config.base_url.clone(),
            Duration::from_millis(config.timeout_ms),
        );
        Self {
            registry,
            executor,
            overall_deadline: config.overall_deadline_ms.map(Duration::from_millis),
        }
    }

    /// ステータスコードの分類ポリシーを差し替える
    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.executor = self.executor.with_policy(policy);
        self
    }

    /// レジストリ全体を検証し、集約レポートを返す
    ///
    /// 有効な全サービスのGETエンドポイントを展開し、全プローブを並行
    /// ディスパッチして完了を待ち合わせる。部分結果での早期リターンは
    /// しない。この操作は決して失敗を伝播しない。プローブをディスパッチ
    /// したにもかかわらず1件も結果を得られなかった場合は縮退レポート
    /// （totalTests=0, errorCount=1, Unhealthy）を返す
    pub async fn validate_all(&self) -> IntegrationReport {
        let targets = self.resolve_targets();
        let dispatched = targets.len();

        info!(count = dispatched, "Starting integration validation");

        let results = self.run_probes(targets).await;

        if dispatched > 0 && results.is_empty() {
            error!("No probe produced a result, returning degenerate report");
            return report::degenerate();
        }

        let report = report::aggregate(results);
        info!(
            total = report.total_tests,
            success = report.success_count,
            error = report.error_count,
            timeout = report.timeout_count,
            average_response_time_ms = report.average_response_time_ms,
            status = %report.overall_status,
            "Integration validation completed"
        );
        report
    }

    /// 単一サービスの全GETエンドポイントを検証する
    ///
    /// 集約せず生のProbeResult群を返す（詳細検査用）。無効化された
    /// サービスは空の結果になる
    pub async fn validate_service(&self, name: &str) -> Result<Vec<ProbeResult>, ValidatorError> {
        let service = self
            .registry
            .get(name)
            .ok_or_else(|| ValidatorError::UnknownService(name.to_string()))?;

        if !service.enabled {
            return Ok(Vec::new());
        }

        let targets: Vec<ResolvedEndpoint> = service
            .declared_endpoints
            .iter()
            .filter(|e| e.method == HttpMethod::Get)
            .map(|e| ResolvedEndpoint {
                service: service.name.clone(),
                path: templater::resolve(&e.path_template),
            })
            .collect();

        let probes = targets.iter().map(|target| self.executor.probe(target));
        Ok(futures::future::join_all(probes).await)
    }

    /// 単一エンドポイントの狙い撃ち検証
    pub async fn validate_endpoint(&self, service: &str, path_template: &str) -> ProbeResult {
        let target = ResolvedEndpoint {
            service: service.to_string(),
            path: templater::resolve(path_template),
        };
        self.executor.probe(&target).await
    }

    /// レジストリからプローブ対象を展開する
    fn resolve_targets(&self) -> Vec<ResolvedEndpoint> {
        self.registry
            .probe_targets()
            .into_iter()
            .map(|(service, endpoint)| ResolvedEndpoint {
                service: service.to_string(),
                path: templater::resolve(&endpoint.path_template),
            })
            .collect()
    }

    /// 全対象をファンアウトし、完了を待ち合わせて結果を収集する
    ///
    /// トップレベルのデッドラインが設定されている場合、期限を過ぎても
    /// 未完了のプローブは中断してTimeoutとして記録する。タスクのjoin
    /// 失敗はログに残し、その対象の結果は収集しない
    async fn run_probes(&self, targets: Vec<ResolvedEndpoint>) -> Vec<ProbeResult> {
        let mut handles = Vec::with_capacity(targets.len());

        for target in targets {
            let executor = self.executor.clone();
            let probe_target = target.clone();
            handles.push((
                target,
                tokio::spawn(async move { executor.probe(&probe_target).await }),
            ));
        }

        let deadline = self.overall_deadline.map(|d| Instant::now() + d);
        let mut results = Vec::with_capacity(handles.len());

        for (target, mut handle) in handles {
            let joined = match deadline {
                Some(deadline) => match timeout_at(deadline, &mut handle).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        handle.abort();
                        results.push(ProbeResult {
                            service: target.service,
                            endpoint: target.path,
                            status: ProbeStatus::Timeout,
                            status_code: None,
                            message: "request timed out".to_string(),
                            response_time_ms: self
                                .overall_deadline
                                .map(|d| d.as_millis() as i64)
                                .unwrap_or(0),
                        });
                        continue;
                    }
                },
                None => handle.await,
            };

            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!(
                        service = %target.service,
                        endpoint = %target.path,
                        error = %e,
                        "Probe task failed to join"
                    );
                }
            }
        }

        results
    }
}
