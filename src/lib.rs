//! 제네릭 리포지토리 자동 등록기
//!
//! 영속성 컨텍스트(데이터베이스 스키마 등 엔티티 타입의 논리적 묶음)와 등록 옵션이 주어지면,
//! 컨텍스트의 모든 엔티티 타입에 대해 리포지토리를 서비스 컨테이너에 등록할지 결정하고
//! 어떤 구체 구현 타입을 바인딩할지 계산합니다.
//!
//! # Features
//!
//! - **사용자 정의 우선**: 엔티티별로 직접 지정한 구현 타입이 항상 기본 해석보다 우선
//! - **애그리거트 루트 필터**: 기본적으로 `AggregateRoot` 엔티티만 기본 리포지토리 등록
//! - **키 타입 분류**: `Uuid` 기본 키와 사용자 정의 키를 구분하여 구현 타입 선택
//! - **리플렉션 없음**: 제네릭 타입 닫기를 시작 시점에 등록한 테이블 조회로 대체
//! - **inventory 기반 수집**: `register_entity!`로 컨텍스트별 엔티티 자동 수집
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ RegistrationOptions  │ ← 사용자 정의 매핑, 플래그, 기본 구현 타입
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐      ┌────────────────────────┐
//! │ RepositoryRegistrar  │ ───▶ │ EntityTypeSource       │ ← 컨텍스트 엔티티 열거
//! │                      │ ───▶ │ RepositoryTypeResolver │ ← 컨텍스트별 구현 타입
//! └──────────────────────┘      └────────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ ServiceRegistrar     │ ← (엔티티, 구현 타입) 바인딩 수신
//! └──────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use repository_registrar::config::RepositoryRegistrationOptions;
//! use repository_registrar::core::InventoryEntitySource;
//! use repository_registrar::domain::TypeKey;
//! use repository_registrar::repositories::{RepositoryRegistrar, ServiceCollection};
//!
//! let options = RepositoryRegistrationOptions::builder()
//!     .add_default_repositories(false)
//!     .add_repository::<Order, MyOrderRepository>()
//!     .build();
//!
//! let registrar = RepositoryRegistrar::new(options, InventoryEntitySource, resolver);
//! let mut services = ServiceCollection::new();
//! registrar.add_repositories(&mut services, TypeKey::of::<ShopContext>())?;
//! ```

pub mod core;
pub mod config;
pub mod domain;
pub mod repositories;
pub mod utils;

#[doc(hidden)]
pub use inventory;
