//! # Entity Registry - 영속성 컨텍스트별 엔티티 타입 수집
//!
//! 이 모듈은 영속성 컨텍스트(데이터베이스 스키마 등 엔티티 타입의 논리적 묶음)에 속한
//! 엔티티 타입들을 열거하는 [`EntityTypeSource`] 계약과 그 구현체들을 제공합니다.
//!
//! ## .NET 어셈블리 스캐닝과의 비교
//!
//! | .NET | 이 시스템 | 비고 |
//! |------|-----------|------|
//! | `DbSet<T>` 프로퍼티 리플렉션 | `register_entity!` 매크로 | 컴파일 타임 수집 |
//! | `IsAssignableToGenericType(IAggregateRoot<>)` | `AggregateRoot` trait 구현 | 정적 능력 검사 |
//! | `GetEntityTypes(dbContextType)` | `EntityTypeSource::entity_types` | 전략 객체 |
//!
//! ## 구성 요소
//!
//! ### InventoryEntitySource
//! - **inventory 기반**: `register_entity!`로 제출된 [`EntityRegistration`]을 링크 타임에 수집
//! - **지연 캐시**: 첫 조회 시 컨텍스트별 목록을 한 번만 구성 (`once_cell::sync::Lazy`)
//! - **순서 안정성**: 한 프로세스 실행 동안 열거 순서가 변하지 않음
//!
//! ### StaticEntitySource
//! - **명시적 등록**: 시작 시점에 컨텍스트별 엔티티 목록을 직접 구성
//! - **테스트 친화적**: 전역 상태 없이 독립적인 인스턴스 사용
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use repository_registrar::register_entity;
//!
//! struct ShopContext;
//!
//! register_entity!(ShopContext => aggregate_root Order);
//! register_entity!(ShopContext => keyed OrderLine);
//! register_entity!(ShopContext => composite AuditEntry);
//!
//! let entities = InventoryEntitySource.entity_types(TypeKey::of::<ShopContext>())?;
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::core::errors::{RegistrarError, RegistrarResult};
use crate::domain::entities::EntityDescriptor;
use crate::domain::types::TypeKey;

/// 영속성 컨텍스트의 엔티티 타입 열거 계약
///
/// 결과는 유한해야 하며, 한 프로세스 실행 동안 같은 컨텍스트에 대해 같은 순서를 유지해야 합니다.
pub trait EntityTypeSource {
    /// 컨텍스트에 속한 엔티티 타입들을 반환합니다.
    fn entity_types(&self, context: TypeKey) -> RegistrarResult<Vec<EntityDescriptor>>;
}

impl<F> EntityTypeSource for F
where
    F: Fn(TypeKey) -> RegistrarResult<Vec<EntityDescriptor>>,
{
    fn entity_types(&self, context: TypeKey) -> RegistrarResult<Vec<EntityDescriptor>> {
        self(context)
    }
}

/// 엔티티 등록 정보
///
/// `register_entity!` 매크로가 생성하며, `inventory` 크레이트를 통해 링크 타임에 수집됩니다.
pub struct EntityRegistration {
    /// 엔티티가 속한 영속성 컨텍스트
    pub context: fn() -> TypeKey,
    /// 엔티티 타입 표현 생성 함수
    pub descriptor: fn() -> EntityDescriptor,
}

inventory::collect!(EntityRegistration);

/// 컨텍스트 → 엔티티 목록 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static ENTITY_CONTEXT_CACHE: Lazy<HashMap<TypeKey, Vec<EntityDescriptor>>> = Lazy::new(|| {
    let mut cache: HashMap<TypeKey, Vec<EntityDescriptor>> = HashMap::new();

    for registration in inventory::iter::<EntityRegistration> {
        let context = (registration.context)();
        push_unique(cache.entry(context).or_default(), context, (registration.descriptor)());
    }

    log::debug!("Entity registry initialized: {} context(s)", cache.len());
    cache
});

/// 엔티티 타입 기준으로 한 번만 추가합니다. 먼저 등록된 descriptor가 유지됩니다.
fn push_unique(entities: &mut Vec<EntityDescriptor>, context: TypeKey, descriptor: EntityDescriptor) {
    match entities
        .iter()
        .find(|existing| existing.entity_type() == descriptor.entity_type())
    {
        Some(existing) if *existing != descriptor => {
            log::warn!(
                "Conflicting registration for {} in {} ignored; keeping the first one",
                descriptor.entity_type(),
                context
            );
        }
        Some(_) => {}
        None => entities.push(descriptor),
    }
}

/// `register_entity!`로 수집된 엔티티를 열거하는 소스
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryEntitySource;

impl InventoryEntitySource {
    /// 엔티티가 하나라도 등록된 컨텍스트 목록
    pub fn contexts(&self) -> Vec<TypeKey> {
        ENTITY_CONTEXT_CACHE.keys().copied().collect()
    }
}

impl EntityTypeSource for InventoryEntitySource {
    fn entity_types(&self, context: TypeKey) -> RegistrarResult<Vec<EntityDescriptor>> {
        ENTITY_CONTEXT_CACHE
            .get(&context)
            .cloned()
            .ok_or_else(|| {
                RegistrarError::EnumerationFailed(format!(
                    "No entities registered for context {}. Make sure they're registered with register_entity!",
                    context
                ))
            })
    }
}

/// 명시적으로 구성한 테이블로 엔티티를 열거하는 소스
#[derive(Debug, Clone, Default)]
pub struct StaticEntitySource {
    contexts: HashMap<TypeKey, Vec<EntityDescriptor>>,
}

impl StaticEntitySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 컨텍스트를 엔티티 없이 등록합니다.
    pub fn with_context(mut self, context: TypeKey) -> Self {
        self.contexts.entry(context).or_default();
        self
    }

    /// 컨텍스트에 엔티티를 추가합니다. 이미 있는 엔티티 타입은 무시합니다.
    pub fn with_entity(mut self, context: TypeKey, entity: EntityDescriptor) -> Self {
        push_unique(self.contexts.entry(context).or_default(), context, entity);
        self
    }
}

impl EntityTypeSource for StaticEntitySource {
    fn entity_types(&self, context: TypeKey) -> RegistrarResult<Vec<EntityDescriptor>> {
        self.contexts
            .get(&context)
            .cloned()
            .ok_or_else(|| RegistrarError::EnumerationFailed(format!("Unknown context {}", context)))
    }
}

/// 엔티티를 영속성 컨텍스트에 등록합니다.
///
/// ```rust,ignore
/// register_entity!(ShopContext => aggregate_root Order);     // AggregateRoot 구현 필요
/// register_entity!(ShopContext => keyed OrderLine);          // KeyedEntity 구현 필요
/// register_entity!(ShopContext => composite AuditEntry);     // Entity 구현 필요
/// ```
#[macro_export]
macro_rules! register_entity {
    (@submit $context:ty, $descriptor:expr) => {
        $crate::inventory::submit! {
            $crate::core::registry::EntityRegistration {
                context: $crate::domain::types::TypeKey::of::<$context>,
                descriptor: $descriptor,
            }
        }
    };
    ($context:ty => aggregate_root $entity:ty) => {
        $crate::register_entity!(@submit $context, $crate::domain::entities::EntityDescriptor::aggregate_root::<$entity>);
    };
    ($context:ty => keyed $entity:ty) => {
        $crate::register_entity!(@submit $context, $crate::domain::entities::EntityDescriptor::keyed::<$entity>);
    };
    ($context:ty => composite $entity:ty) => {
        $crate::register_entity!(@submit $context, $crate::domain::entities::EntityDescriptor::composite::<$entity>);
    };
}
