//! # Configuration Module
//!
//! 리포지토리 등록 설정을 담당하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - [`options`] - 등록 세션 동안 변하지 않는 옵션과 빌더
//! - [`registration_config`] - 환경 변수에서 읽는 등록 플래그
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 기본 리포지토리 자동 등록 (기본값: true)
//! export REPOSITORY_REGISTER_DEFAULTS="true"
//!
//! # 애그리거트 루트가 아닌 엔티티 포함 (기본값: false)
//! export REPOSITORY_INCLUDE_ALL_ENTITIES="false"
//! ```

pub mod options;
pub mod registration_config;

pub use options::*;
pub use registration_config::*;
