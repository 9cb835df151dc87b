//! 환경 변수 기반 등록 설정
//!
//! 기본 리포지토리 등록 관련 플래그를 환경 변수에서 읽어옵니다.
//! 값을 해석할 수 없으면 경고를 남기고 기본값을 사용합니다.
//!
//! ```bash
//! # .env.dev
//! REPOSITORY_REGISTER_DEFAULTS=true
//! REPOSITORY_INCLUDE_ALL_ENTITIES=false
//! ```

use std::env;

use crate::config::options::RepositoryRegistrationOptionsBuilder;
use crate::core::errors::{ErrorContext, RegistrarResult};

/// 기본 리포지토리 자동 등록 여부
pub const REGISTER_DEFAULTS_VAR: &str = "REPOSITORY_REGISTER_DEFAULTS";
/// 애그리거트 루트가 아닌 엔티티 포함 여부
pub const INCLUDE_ALL_ENTITIES_VAR: &str = "REPOSITORY_INCLUDE_ALL_ENTITIES";

/// 환경 변수에서 읽은 등록 플래그
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub register_defaults: bool,
    pub include_all_entities: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            register_defaults: true,
            include_all_entities: false,
        }
    }
}

impl RegistrationConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 조회 함수로 설정을 읽습니다.
    ///
    /// 설정되지 않았거나 해석할 수 없는 값은 기본값으로 대체됩니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            register_defaults: read_flag(&lookup, REGISTER_DEFAULTS_VAR, defaults.register_defaults),
            include_all_entities: read_flag(
                &lookup,
                INCLUDE_ALL_ENTITIES_VAR,
                defaults.include_all_entities,
            ),
        }
    }

    /// 플래그를 옵션 빌더에 반영합니다.
    pub fn apply(&self, builder: RepositoryRegistrationOptionsBuilder) -> RepositoryRegistrationOptionsBuilder {
        builder
            .register_default_repositories(self.register_defaults)
            .include_all_entities_for_default_repositories(self.include_all_entities)
    }
}

fn read_flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let parsed: RegistrarResult<bool> =
                parse_flag(&raw).with_config_context(|| format!("{} 파싱 실패", key));
            parsed.unwrap_or_else(|e| {
                log::warn!("{}. 기본값 {} 사용", e, default);
                default
            })
        }
        None => default,
    }
}

/// `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`를 대소문자 구분 없이 해석합니다.
fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("unrecognized flag value '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::RepositoryRegistrationOptions;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RegistrationConfig::from_lookup(|_| None);

        assert_eq!(config, RegistrationConfig::default());
        assert!(config.register_defaults);
        assert!(!config.include_all_entities);
    }

    #[test]
    fn test_reads_flags() {
        let config = RegistrationConfig::from_lookup(lookup_from(&[
            (REGISTER_DEFAULTS_VAR, "off"),
            (INCLUDE_ALL_ENTITIES_VAR, " YES "),
        ]));

        assert!(!config.register_defaults);
        assert!(config.include_all_entities);
    }

    #[test]
    fn test_invalid_value_falls_back_to_default() {
        let config = RegistrationConfig::from_lookup(lookup_from(&[(INCLUDE_ALL_ENTITIES_VAR, "maybe")]));

        assert!(!config.include_all_entities);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert!(parse_flag("").is_err());
    }

    #[test]
    fn test_apply_to_builder() {
        let config = RegistrationConfig {
            register_defaults: true,
            include_all_entities: true,
        };
        let options = config.apply(RepositoryRegistrationOptions::builder()).build();

        assert!(options.register_default_repositories());
        assert!(options.include_all_entities_for_default_repositories());
    }
}
