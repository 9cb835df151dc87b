//! # Entity Capability Traits
//!
//! 엔티티 타입이 스스로 선언하는 능력(capability) trait과,
//! 협력자 사이에서 엔티티 타입을 전달하는 런타임 표현 [`EntityDescriptor`]를 정의합니다.
//!
//! ## trait 계층
//!
//! ```text
//! Entity                 ← 모든 영속 엔티티 (복합 키 포함)
//!  └─ KeyedEntity        ← 단일 기본 키를 가진 엔티티 (type Key)
//!      └─ AggregateRoot  ← 애그리거트 루트 마커
//! ```
//!
//! 애그리거트 루트 여부는 런타임 타입 탐색이 아니라 정적 trait 구현으로 결정됩니다.
//! `EntityDescriptor::aggregate_root::<E>()`는 `E: AggregateRoot`일 때만 호출할 수 있으므로
//! 마커를 구현하지 않은 타입이 애그리거트 루트로 분류될 수 없습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use uuid::Uuid;
//! use repository_registrar::domain::entities::*;
//!
//! struct Order { id: Uuid }
//! impl Entity for Order {}
//! impl KeyedEntity for Order { type Key = Uuid; }
//! impl AggregateRoot for Order {}
//!
//! let descriptor = EntityDescriptor::aggregate_root::<Order>();
//! assert!(descriptor.is_aggregate_root());
//! ```

use crate::domain::types::TypeKey;

/// 영속 엔티티 마커
///
/// 복합 키 엔티티는 이 trait만 구현합니다.
pub trait Entity: 'static {}

/// 단일 기본 키를 가진 엔티티
pub trait KeyedEntity: Entity {
    /// 기본 키 타입
    type Key: 'static;
}

/// 애그리거트 루트 마커
///
/// 단일 기본 키를 가진 엔티티만 애그리거트 루트가 될 수 있습니다.
pub trait AggregateRoot: KeyedEntity {}

/// 엔티티 타입의 런타임 표현
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityDescriptor {
    entity_type: TypeKey,
    primary_key_type: Option<TypeKey>,
    is_aggregate_root: bool,
}

impl EntityDescriptor {
    /// 복합 키 엔티티 (기본 키 타입 없음, 애그리거트 루트 아님)
    pub fn composite<E: Entity>() -> Self {
        Self {
            entity_type: TypeKey::of::<E>(),
            primary_key_type: None,
            is_aggregate_root: false,
        }
    }

    /// 단일 키를 가진 일반 엔티티
    pub fn keyed<E: KeyedEntity>() -> Self {
        Self {
            entity_type: TypeKey::of::<E>(),
            primary_key_type: Some(TypeKey::of::<E::Key>()),
            is_aggregate_root: false,
        }
    }

    /// 애그리거트 루트 엔티티
    pub fn aggregate_root<E: AggregateRoot>() -> Self {
        Self {
            is_aggregate_root: true,
            ..Self::keyed::<E>()
        }
    }

    pub fn entity_type(&self) -> TypeKey {
        self.entity_type
    }

    /// 엔티티의 기본 키 타입
    ///
    /// 복합 키 엔티티는 `None`을 반환합니다.
    pub fn primary_key_type(&self) -> Option<TypeKey> {
        self.primary_key_type
    }

    pub fn is_aggregate_root(&self) -> bool {
        self.is_aggregate_root
    }

    /// 기본 키가 기본 식별자 타입(`Uuid`)인지 확인합니다.
    pub fn has_default_key(&self) -> bool {
        self.primary_key_type
            .is_some_and(|key| key.is_default_key())
    }
}
