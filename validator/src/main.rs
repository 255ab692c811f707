//! Integration Validator Entry Point

use clap::Parser;
use integration_validator::cli::Cli;
use integration_validator::registry::EndpointRegistry;
use integration_validator::{logging, IntegrationValidator};
use integration_validator_common::config::ValidatorConfig;
use integration_validator_common::types::{IntegrationReport, OverallStatus, ProbeResult};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("failed to initialize logging: {e}");
    }

    let mut config = match ValidatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(2);
        }
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(deadline_ms) = cli.deadline_ms {
        config.overall_deadline_ms = Some(deadline_ms);
    }

    let registry = match &cli.registry {
        Some(path) => match EndpointRegistry::from_json_file(path) {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("failed to load registry: {e}");
                return ExitCode::from(2);
            }
        },
        None => EndpointRegistry::default(),
    };

    let validator = IntegrationValidator::new(&config, registry);

    match &cli.service {
        Some(service) => match validator.validate_service(service).await {
            Ok(results) => {
                print_results(&results, cli.json);
                if results.iter().all(ProbeResult::is_success) {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::from(2)
            }
        },
        None => {
            let report = validator.validate_all().await;
            print_report(&report, cli.json);
            match report.overall_status {
                OverallStatus::Healthy => ExitCode::SUCCESS,
                OverallStatus::Degraded => ExitCode::from(1),
                OverallStatus::Unhealthy => ExitCode::from(2),
            }
        }
    }
}

/// 集約レポートを出力する
fn print_report(report: &IntegrationReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(body) => println!("{body}"),
            Err(e) => eprintln!("failed to serialize report: {e}"),
        }
        return;
    }

    println!("Overall status: {}", report.overall_status);
    println!(
        "Probes: {} total, {} success, {} error, {} timeout",
        report.total_tests, report.success_count, report.error_count, report.timeout_count
    );
    println!(
        "Average response time: {:.1} ms",
        report.average_response_time_ms
    );
    println!();
    print_result_table(&report.results);
}

/// 生のプローブ結果群を出力する
fn print_results(results: &[ProbeResult], json: bool) {
    if json {
        match serde_json::to_string_pretty(results) {
            Ok(body) => println!("{body}"),
            Err(e) => eprintln!("failed to serialize results: {e}"),
        }
        return;
    }

    print_result_table(results);
}

fn print_result_table(results: &[ProbeResult]) {
    if results.is_empty() {
        println!("(no probes)");
        return;
    }

    println!(
        "{:<8} {:<6} {:>9}  {:<16} {:<44} MESSAGE",
        "STATUS", "CODE", "TIME(ms)", "SERVICE", "ENDPOINT"
    );
    for result in results {
        let code = result
            .status_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<6} {:>9}  {:<16} {:<44} {}",
            result.status, code, result.response_time_ms, result.service, result.endpoint,
            result.message
        );
    }
}
