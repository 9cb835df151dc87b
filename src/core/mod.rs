//! # Core Module
//!
//! 등록기 전체가 공유하는 기반 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 엔티티 타입 수집
//! - **EntityTypeSource**: 영속성 컨텍스트의 엔티티 타입 열거 계약
//! - **자동 레지스트리**: `inventory` 기반 링크 타임 엔티티 등록 (`register_entity!`)
//! - **명시적 레지스트리**: 시작 시점에 직접 구성하는 `StaticEntitySource`
//!
//! ### [`errors`] - 통합 에러 처리
//! - **RegistrarError**: 등록 과정의 모든 치명적 에러
//! - **ErrorContext**: 외부 협력자 에러를 분류에 맞게 변환
//!
//! ## .NET과의 비교
//!
//! | .NET | 이 모듈 |
//! |------|---------|
//! | 어셈블리 스캐닝 | `inventory::collect!` |
//! | `GetEntityTypes(dbContextType)` | `EntityTypeSource::entity_types` |
//! | 예외 전파 | `RegistrarResult<T>` + `?` |

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
