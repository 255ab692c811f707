//! レポート集約
//!
//! ProbeResult群を単一のIntegrationReportへ畳み込む

use chrono::Utc;
use integration_validator_common::types::{
    IntegrationReport, OverallStatus, ProbeResult, ProbeStatus,
};

/// プローブ結果群から集約レポートを構築する
///
/// ステータス別の件数、平均応答時間、全体健全性を計算する。空入力は
/// 「エンドポイント未設定」として有効であり、平均0.0・Unhealthyの
/// レポートになる。件数と判定は入力順に依存しないが、resultsは
/// 受け取った順（＝完了順）を保持する
pub fn aggregate(results: Vec<ProbeResult>) -> IntegrationReport {
    let total_tests = results.len();
    let mut success_count = 0;
    let mut error_count = 0;
    let mut timeout_count = 0;

    for result in &results {
        match result.status {
            ProbeStatus::Success => success_count += 1,
            ProbeStatus::Error => error_count += 1,
            ProbeStatus::Timeout => timeout_count += 1,
        }
    }

    let average_response_time_ms = if total_tests == 0 {
        0.0
    } else {
        results.iter().map(|r| r.response_time_ms).sum::<i64>() as f64 / total_tests as f64
    };

    IntegrationReport {
        timestamp: Utc::now(),
        total_tests,
        success_count,
        error_count,
        timeout_count,
        average_response_time_ms,
        overall_status: OverallStatus::from_counts(success_count, total_tests),
        results,
    }
}

/// 縮退レポートを構築する
///
/// ファンアウト機構自体が完全に失敗し、1件も結果を得られなかった場合の
/// フォールバック。呼び出し側には常にレポートが返る
pub fn degenerate() -> IntegrationReport {
    IntegrationReport {
        timestamp: Utc::now(),
        total_tests: 0,
        success_count: 0,
        error_count: 1,
        timeout_count: 0,
        average_response_time_ms: 0.0,
        overall_status: OverallStatus::Unhealthy,
        results: Vec::new(),
    }
}
