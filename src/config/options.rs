//! # Repository Registration Options
//!
//! 한 번의 등록 세션 동안 변하지 않는 설정값입니다.
//! 빌더로 구성한 뒤 등록기에 넘기면 이후에는 읽기 전용으로만 사용됩니다.
//!
//! ## 필드
//!
//! | 필드 | 의미 |
//! |------|------|
//! | `register_default_repositories` | 기본 리포지토리 자동 등록 여부 |
//! | `include_all_entities_for_default_repositories` | 애그리거트 루트가 아닌 엔티티도 포함할지 여부 |
//! | `specified_default_repository_types` | 기본 구현 타입을 직접 지정했는지 여부 |
//! | `default_repository_implementation_type_with_default_primary_key` | `Uuid` 키 엔티티용 오픈 제네릭 (arity 1) |
//! | `default_repository_implementation_type` | 사용자 정의 키 엔티티용 오픈 제네릭 (arity 2) |
//! | `custom_repositories` | 엔티티별 사용자 정의 구현 타입 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let options = RepositoryRegistrationOptions::builder()
//!     .add_default_repositories(false)
//!     .add_repository::<Order, OrderRepository>()
//!     .set_default_repository_types(with_default_key, with_custom_key)?
//!     .build();
//! ```

use std::collections::HashMap;

use crate::core::errors::{RegistrarError, RegistrarResult};
use crate::domain::bindings::RepositoryBinding;
use crate::domain::entities::Entity;
use crate::domain::generics::GenericRepositoryType;
use crate::domain::types::TypeKey;

/// 엔티티 → 사용자 정의 구현 타입 매핑
///
/// 키는 유일하며, 삽입 순서대로 순회합니다.
#[derive(Debug, Clone, Default)]
pub struct CustomRepositories {
    entries: Vec<RepositoryBinding>,
    index: HashMap<TypeKey, usize>,
}

impl CustomRepositories {
    /// 매핑을 추가합니다. 이미 있는 엔티티면 구현 타입만 교체합니다.
    pub fn insert(&mut self, entity: TypeKey, implementation: TypeKey) {
        match self.index.get(&entity) {
            Some(&position) => self.entries[position].implementation = implementation,
            None => {
                self.index.insert(entity, self.entries.len());
                self.entries.push(RepositoryBinding::new(entity, implementation));
            }
        }
    }

    pub fn contains_key(&self, entity: &TypeKey) -> bool {
        self.index.contains_key(entity)
    }

    pub fn get(&self, entity: &TypeKey) -> Option<TypeKey> {
        self.index
            .get(entity)
            .map(|&position| self.entries[position].implementation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositoryBinding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 지정된 기본 구현 타입 한 쌍
#[derive(Debug, Clone)]
struct DefaultRepositoryTypes {
    with_default_key: GenericRepositoryType,
    with_custom_key: GenericRepositoryType,
}

/// 리포지토리 등록 옵션
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistrationOptions {
    register_default_repositories: bool,
    include_all_entities_for_default_repositories: bool,
    default_repository_types: Option<DefaultRepositoryTypes>,
    custom_repositories: CustomRepositories,
}

impl RepositoryRegistrationOptions {
    pub fn builder() -> RepositoryRegistrationOptionsBuilder {
        RepositoryRegistrationOptionsBuilder::default()
    }

    pub fn register_default_repositories(&self) -> bool {
        self.register_default_repositories
    }

    pub fn include_all_entities_for_default_repositories(&self) -> bool {
        self.include_all_entities_for_default_repositories
    }

    /// 기본 구현 타입이 직접 지정되었는지 여부
    pub fn specified_default_repository_types(&self) -> bool {
        self.default_repository_types.is_some()
    }

    pub fn default_repository_implementation_type_with_default_primary_key(
        &self,
    ) -> Option<&GenericRepositoryType> {
        self.default_repository_types
            .as_ref()
            .map(|types| &types.with_default_key)
    }

    pub fn default_repository_implementation_type(&self) -> Option<&GenericRepositoryType> {
        self.default_repository_types
            .as_ref()
            .map(|types| &types.with_custom_key)
    }

    pub fn custom_repositories(&self) -> &CustomRepositories {
        &self.custom_repositories
    }
}

/// [`RepositoryRegistrationOptions`] 빌더
#[derive(Debug, Default)]
pub struct RepositoryRegistrationOptionsBuilder {
    options: RepositoryRegistrationOptions,
}

impl RepositoryRegistrationOptionsBuilder {
    /// 기본 리포지토리 자동 등록을 켭니다.
    ///
    /// `include_all_entities`가 `false`면 애그리거트 루트만 등록 대상입니다.
    pub fn add_default_repositories(mut self, include_all_entities: bool) -> Self {
        self.options.register_default_repositories = true;
        self.options.include_all_entities_for_default_repositories = include_all_entities;
        self
    }

    /// 기본 리포지토리 자동 등록 여부를 직접 설정합니다.
    pub fn register_default_repositories(mut self, enabled: bool) -> Self {
        self.options.register_default_repositories = enabled;
        self
    }

    pub fn include_all_entities_for_default_repositories(mut self, enabled: bool) -> Self {
        self.options.include_all_entities_for_default_repositories = enabled;
        self
    }

    /// 엔티티 `E`에 사용자 정의 리포지토리 `R`을 지정합니다.
    pub fn add_repository<E: Entity, R: 'static>(self) -> Self {
        self.add_custom_repository(TypeKey::of::<E>(), TypeKey::of::<R>())
    }

    pub fn add_custom_repository(mut self, entity: TypeKey, implementation: TypeKey) -> Self {
        self.options.custom_repositories.insert(entity, implementation);
        self
    }

    /// 기본 구현 타입 한 쌍을 지정합니다.
    ///
    /// # Errors
    ///
    /// * `ArityMismatch` - `with_default_key`의 arity가 1이 아니거나
    ///   `with_custom_key`의 arity가 2가 아닌 경우
    pub fn set_default_repository_types(
        mut self,
        with_default_key: GenericRepositoryType,
        with_custom_key: GenericRepositoryType,
    ) -> RegistrarResult<Self> {
        check_arity(&with_default_key, 1)?;
        check_arity(&with_custom_key, 2)?;

        self.options.default_repository_types = Some(DefaultRepositoryTypes {
            with_default_key,
            with_custom_key,
        });
        Ok(self)
    }

    pub fn build(self) -> RepositoryRegistrationOptions {
        self.options
    }
}

fn check_arity(generic: &GenericRepositoryType, expected: usize) -> RegistrarResult<()> {
    if generic.arity() != expected {
        return Err(RegistrarError::ArityMismatch {
            generic: generic.name().to_string(),
            expected,
            actual: generic.arity(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order;
    impl Entity for Order {}
    struct OrderLine;
    impl Entity for OrderLine {}
    struct OrderRepository;
    struct OrderRepositoryV2;
    struct OrderLineRepository;

    #[test]
    fn test_default_options() {
        let options = RepositoryRegistrationOptions::builder().build();

        assert!(!options.register_default_repositories());
        assert!(!options.include_all_entities_for_default_repositories());
        assert!(!options.specified_default_repository_types());
        assert!(options.custom_repositories().is_empty());
        assert!(options.default_repository_implementation_type().is_none());
    }

    #[test]
    fn test_add_default_repositories_sets_both_flags() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .build();

        assert!(options.register_default_repositories());
        assert!(options.include_all_entities_for_default_repositories());
    }

    #[test]
    fn test_custom_repositories_keep_insertion_order_and_unique_keys() {
        let options = RepositoryRegistrationOptions::builder()
            .add_repository::<Order, OrderRepository>()
            .add_repository::<OrderLine, OrderLineRepository>()
            .add_repository::<Order, OrderRepositoryV2>()
            .build();
        let custom = options.custom_repositories();

        assert_eq!(custom.len(), 2);
        assert_eq!(
            custom.get(&TypeKey::of::<Order>()),
            Some(TypeKey::of::<OrderRepositoryV2>())
        );

        let entities: Vec<_> = custom.iter().map(|binding| binding.entity).collect();
        assert_eq!(entities, vec![TypeKey::of::<Order>(), TypeKey::of::<OrderLine>()]);
    }

    #[test]
    fn test_set_default_repository_types() {
        let options = RepositoryRegistrationOptions::builder()
            .set_default_repository_types(
                GenericRepositoryType::with_default_key("MemoryRepository"),
                GenericRepositoryType::with_custom_key("MemoryRepository"),
            )
            .unwrap()
            .build();

        assert!(options.specified_default_repository_types());
        assert_eq!(
            options
                .default_repository_implementation_type_with_default_primary_key()
                .map(|generic| generic.arity()),
            Some(1)
        );
        assert_eq!(
            options.default_repository_implementation_type().map(|generic| generic.arity()),
            Some(2)
        );
    }

    #[test]
    fn test_set_default_repository_types_rejects_swapped_arity() {
        let result = RepositoryRegistrationOptions::builder().set_default_repository_types(
            GenericRepositoryType::with_custom_key("MemoryRepository"),
            GenericRepositoryType::with_default_key("MemoryRepository"),
        );

        assert!(matches!(
            result,
            Err(RegistrarError::ArityMismatch { expected: 1, actual: 2, .. })
        ));
    }
}
