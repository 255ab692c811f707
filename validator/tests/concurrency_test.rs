//! 並行実行モデルの統合テスト
//!
//! ファンアウトの並列性とトップレベルデッドラインの挙動を検証する

use std::time::{Duration, Instant};

use integration_validator::registry::EndpointRegistry;
use integration_validator::IntegrationValidator;
use integration_validator_common::config::ValidatorConfig;
use integration_validator_common::types::{HttpMethod, RawEndpoint, ServiceDescriptor};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry_with_paths(paths: &[&str]) -> EndpointRegistry {
    EndpointRegistry::new(vec![ServiceDescriptor {
        name: "entrainements".to_string(),
        enabled: true,
        declared_endpoints: paths
            .iter()
            .map(|p| RawEndpoint {
                method: HttpMethod::Get,
                path_template: p.to_string(),
            })
            .collect(),
    }])
}

/// 全プローブは並列にディスパッチされ、総時間は遅延の合計ではなく
/// 最大遅延に近い
#[tokio::test]
async fn test_probes_run_in_parallel() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&mock)
        .await;

    let registry = registry_with_paths(&[
        "/api/entrainements",
        "/api/entrainements/1",
        "/api/entrainements/2",
        "/api/entrainements/3",
        "/api/entrainements/coach/1",
    ]);
    let config = ValidatorConfig {
        base_url: mock.uri(),
        timeout_ms: 5_000,
        overall_deadline_ms: None,
    };
    let validator = IntegrationValidator::new(&config, registry);

    let start = Instant::now();
    let report = validator.validate_all().await;
    let elapsed = start.elapsed();

    assert_eq!(report.total_tests, 5);
    assert_eq!(report.success_count, 5);
    // 逐次実行なら5 x 300ms = 1500ms以上かかる
    assert!(
        elapsed < Duration::from_millis(1_000),
        "validate_all took {elapsed:?}, expected parallel fan-out"
    );
}

/// トップレベルデッドラインの超過時、未完了プローブはTimeoutとして
/// 記録され、呼び出しは待ち続けない
#[tokio::test]
async fn test_overall_deadline_records_pending_probes_as_timeout() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock)
        .await;

    let registry = registry_with_paths(&[
        "/api/entrainements",
        "/api/entrainements/1",
        "/api/entrainements/2",
    ]);
    let config = ValidatorConfig {
        base_url: mock.uri(),
        timeout_ms: 5_000,
        overall_deadline_ms: Some(200),
    };
    let validator = IntegrationValidator::new(&config, registry);

    let start = Instant::now();
    let report = validator.validate_all().await;
    let elapsed = start.elapsed();

    assert_eq!(report.total_tests, 3);
    assert_eq!(report.timeout_count, 3);
    assert!(
        elapsed < Duration::from_millis(1_500),
        "validate_all took {elapsed:?}, expected deadline cutoff"
    );
}
