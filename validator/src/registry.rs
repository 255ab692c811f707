//! エンドポイントレジストリ
//!
//! プローブ対象となるサービスとエンドポイントの宣言リスト

use integration_validator_common::config::ConfigError;
use integration_validator_common::types::{HttpMethod, RawEndpoint, ServiceDescriptor};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// エンドポイントレジストリ
///
/// 明示的な値として構築してファサードへ渡す。プロセス全体で共有する
/// シングルトンは持たず、テストでは任意の偽レジストリを注入できる
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointRegistry {
    services: Vec<ServiceDescriptor>,
}

impl EndpointRegistry {
    /// サービス記述子のリストからレジストリを構築する
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self { services }
    }

    /// JSONファイルからレジストリを読み込む
    ///
    /// ファイルはServiceDescriptorの配列
    /// （`[{"serviceName": ..., "enabled": ..., "endpoints": [...]}]`）
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// 全サービス記述子
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    /// 名前でサービスを検索する
    pub fn get(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.name == name)
    }

    /// プローブ対象を列挙する
    ///
    /// 有効なサービスのGETエンドポイントのみ。無効化されたサービスは
    /// 1件も寄与しない
    pub fn probe_targets(&self) -> Vec<(&str, &RawEndpoint)> {
        self.services
            .iter()
            .filter(|s| s.enabled)
            .flat_map(|s| {
                s.declared_endpoints
                    .iter()
                    .filter(|e| e.method == HttpMethod::Get)
                    .map(move |e| (s.name.as_str(), e))
            })
            .collect()
    }
}

fn get(path: &str) -> RawEndpoint {
    RawEndpoint {
        method: HttpMethod::Get,
        path_template: path.to_string(),
    }
}

fn post(path: &str) -> RawEndpoint {
    RawEndpoint {
        method: HttpMethod::Post,
        path_template: path.to_string(),
    }
}

impl Default for EndpointRegistry {
    /// 組み込みレジストリ
    ///
    /// 業務マイクロサービス群の既定の宣言。GET以外のエンドポイントも
    /// 宣言としては保持されるが、プローブ対象からは除外される
    fn default() -> Self {
        Self::new(vec![
            ServiceDescriptor {
                name: "entrainements".to_string(),
                enabled: true,
                declared_endpoints: vec![
                    get("/api/entrainements"),
                    get("/api/entrainements/{id}"),
                    get("/api/entrainements/coach/{coachId}"),
                    post("/api/entrainements"),
                ],
            },
            ServiceDescriptor {
                name: "participations".to_string(),
                enabled: true,
                declared_endpoints: vec![
                    get("/api/participations"),
                    get("/api/participations/{id}"),
                    get("/api/participations/entrainement/{entrainementId}"),
                    post("/api/participations"),
                ],
            },
            ServiceDescriptor {
                name: "performances".to_string(),
                enabled: true,
                declared_endpoints: vec![
                    get("/api/performances"),
                    get("/api/performances/joueur/{joueurId}"),
                ],
            },
            ServiceDescriptor {
                name: "absences".to_string(),
                enabled: true,
                declared_endpoints: vec![
                    get("/api/absences"),
                    get("/api/absences/joueur/{joueurId}"),
                    post("/api/absences"),
                ],
            },
            ServiceDescriptor {
                name: "objectifs".to_string(),
                enabled: true,
                declared_endpoints: vec![
                    get("/api/objectifs"),
                    get("/api/objectifs/{id}"),
                    get("/api/objectifs/joueur/{joueurId}"),
                ],
            },
            ServiceDescriptor {
                name: "statistiques".to_string(),
                enabled: true,
                declared_endpoints: vec![
                    get("/api/statistiques/equipe"),
                    get("/api/statistiques/joueur/{joueurId}"),
                ],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_probe_targets_skip_disabled_services() {
        let registry = EndpointRegistry::new(vec![
            ServiceDescriptor {
                name: "disabled".to_string(),
                enabled: false,
                declared_endpoints: vec![
                    get("/api/a"),
                    get("/api/b"),
                    get("/api/c"),
                ],
            },
            ServiceDescriptor {
                name: "enabled".to_string(),
                enabled: true,
                declared_endpoints: vec![get("/api/d"), get("/api/e")],
            },
        ]);

        let targets = registry.probe_targets();

        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|(service, _)| *service == "enabled"));
    }

    #[test]
    fn test_probe_targets_skip_non_get_endpoints() {
        let registry = EndpointRegistry::new(vec![ServiceDescriptor {
            name: "absences".to_string(),
            enabled: true,
            declared_endpoints: vec![get("/api/absences"), post("/api/absences")],
        }]);

        let targets = registry.probe_targets();

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].1.path_template, "/api/absences");
    }

    #[test]
    fn test_get_by_name() {
        let registry = EndpointRegistry::default();

        assert!(registry.get("objectifs").is_some());
        assert!(registry.get("inconnu").is_none());
    }

    #[test]
    fn test_default_registry_only_probes_get() {
        let registry = EndpointRegistry::default();

        assert!(registry
            .probe_targets()
            .iter()
            .all(|(_, e)| e.method == HttpMethod::Get));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{
                    "serviceName": "objectifs",
                    "enabled": true,
                    "endpoints": [{{"method": "GET", "pathTemplate": "/api/objectifs"}}]
                }},
                {{
                    "serviceName": "absences",
                    "enabled": false,
                    "endpoints": [{{"method": "GET", "pathTemplate": "/api/absences"}}]
                }}
            ]"#
        )
        .unwrap();

        let registry = EndpointRegistry::from_json_file(file.path()).unwrap();

        assert_eq!(registry.services().len(), 2);
        assert_eq!(registry.probe_targets().len(), 1);
    }

    #[test]
    fn test_from_json_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            EndpointRegistry::from_json_file(file.path()),
            Err(ConfigError::Json(_))
        ));
    }
}
