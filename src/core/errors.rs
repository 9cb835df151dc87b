//! # Registrar Error Handling
//!
//! 리포지토리 자동 등록 과정에서 발생하는 모든 에러를 표현하는 모듈입니다.
//! 등록은 애플리케이션 시작 시 한 번만 수행되는 결정적인 작업이므로,
//! 모든 에러는 치명적(fatal)이며 재시도 없이 호출자에게 그대로 전달됩니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | 발생 위치 |
//! |------|------|-----------|
//! | 설정 불일치 | `ConfigurationMismatch`, `ArityMismatch`, `MissingPrimaryKey` | 제네릭 타입 닫기 |
//! | 해석 실패 | `ResolutionFailed` | 외부 타입 리졸버 |
//! | 열거 실패 | `EnumerationFailed` | 외부 엔티티 타입 소스 |
//! | 등록 실패 | `RegistrationFailed` | 외부 서비스 컬렉션 |
//! | 설정값 오류 | `InvalidConfig` | 환경 변수 파싱 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use repository_registrar::core::errors::{RegistrarError, RegistrarResult};
//!
//! fn resolve(open: &GenericRepositoryType, entity: TypeKey) -> RegistrarResult<TypeKey> {
//!     // 닫을 수 없는 타입 인자는 ConfigurationMismatch로 즉시 실패
//!     open.make_generic(&[entity])
//! }
//! ```

use thiserror::Error;

/// 리포지토리 등록 에러 타입
///
/// `thiserror`를 사용하여 `Error` trait을 자동 구현합니다.
/// 첫 번째 에러가 발생하면 나머지 등록 과정은 중단됩니다 (fail-fast).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrarError {
    /// 설정된 오픈 제네릭 타입을 주어진 타입 인자로 닫을 수 없음
    ///
    /// .NET의 `MakeGenericType` 제약 조건 위반에 해당합니다.
    /// 해당 엔티티(및 키)에 대한 닫힌 타입이 시작 시점에 등록되지 않은 경우 발생합니다.
    #[error("Configuration mismatch: cannot close {generic} over <{arguments}>")]
    ConfigurationMismatch { generic: String, arguments: String },

    /// 타입 인자 개수가 오픈 제네릭 타입의 arity와 다름
    #[error("Arity mismatch: {generic} expects {expected} type argument(s), got {actual}")]
    ArityMismatch {
        generic: String,
        expected: usize,
        actual: usize,
    },

    /// 복합 키 엔티티처럼 기본 키 타입이 없는 엔티티에 기본 리포지토리를 닫으려 함
    #[error("Entity {0} has no single primary key type")]
    MissingPrimaryKey(String),

    /// 외부 타입 리졸버가 구현 타입을 찾지 못함
    #[error("Repository type resolution failed: {0}")]
    ResolutionFailed(String),

    /// 외부 엔티티 타입 소스의 열거 실패
    #[error("Entity type enumeration failed: {0}")]
    EnumerationFailed(String),

    /// 외부 서비스 컬렉션의 등록 실패
    #[error("Repository registration failed: {0}")]
    RegistrationFailed(String),

    /// 환경 변수 등 설정값 파싱 실패
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// 편의성을 위한 Result 타입 별칭
pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// 외부 협력자 에러를 `RegistrarError`로 변환하는 확장 trait
///
/// 엔티티 소스나 타입 리졸버 구현체가 자체 에러 타입을 사용할 때,
/// 분류에 맞는 변형으로 컨텍스트와 함께 감싸줍니다.
///
/// # 예제
///
/// ```rust,ignore
/// use repository_registrar::core::errors::ErrorContext;
///
/// let entities = schema.read_tables()
///     .enumeration_context("Failed to read shop schema")?;
/// ```
pub trait ErrorContext<T> {
    /// 열거 실패(`EnumerationFailed`)로 변환합니다.
    fn enumeration_context(self, msg: &str) -> RegistrarResult<T>;

    /// 해석 실패(`ResolutionFailed`)로 변환합니다.
    fn resolution_context(self, msg: &str) -> RegistrarResult<T>;

    /// 클로저로 지연 평가된 메시지와 함께 설정값 오류(`InvalidConfig`)로 변환합니다.
    fn with_config_context<F>(self, f: F) -> RegistrarResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn enumeration_context(self, msg: &str) -> RegistrarResult<T> {
        self.map_err(|e| RegistrarError::EnumerationFailed(format!("{}: {}", msg, e)))
    }

    fn resolution_context(self, msg: &str) -> RegistrarResult<T> {
        self.map_err(|e| RegistrarError::ResolutionFailed(format!("{}: {}", msg, e)))
    }

    fn with_config_context<F>(self, f: F) -> RegistrarResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| RegistrarError::InvalidConfig(format!("{}: {}", f(), e)))
    }
}
