//! # Repository Registrar
//!
//! 영속성 컨텍스트의 모든 엔티티 타입에 대해 기본 리포지토리를 등록할지 결정하고,
//! 등록한다면 어떤 구체 구현 타입을 바인딩할지 계산하는 등록기입니다.
//!
//! ## 결정 절차
//!
//! ```text
//! add_repositories(context)
//!   ├─ 1. 사용자 정의 리포지토리 → 조건 없이 모두 바인딩 (삽입 순서)
//!   └─ 2. register_default_repositories == true 이면
//!         for entity in entity_source.entity_types(context)   (열거 순서 유지)
//!           ├─ should_register_default_repository_for(entity) == false → 건너뜀
//!           └─ resolve_repository_type(context, entity) → 바인딩
//!
//! resolve_repository_type(context, entity)
//!   ├─ 키 타입 == Uuid   → with_default_key<E>        또는 resolver.repository_type_for_default_key
//!   └─ 키 타입 != Uuid   → with_custom_key<E, K>      또는 resolver.repository_type
//! ```
//!
//! 사용자 정의 바인딩이 기본 바인딩보다 먼저 전달되며, 적격성 검사가 사용자 정의 엔티티를
//! 제외하므로 같은 엔티티가 한 번의 등록 과정에서 두 번 바인딩되지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let options = RepositoryRegistrationOptions::builder()
//!     .add_default_repositories(false)
//!     .add_repository::<Order, OrderRepository>()
//!     .build();
//!
//! let registrar = RepositoryRegistrar::new(options, InventoryEntitySource, resolver);
//! let mut services = ServiceCollection::new();
//! registrar.add_repositories(&mut services, TypeKey::of::<ShopContext>())?;
//! ```

use std::sync::Arc;

use crate::config::options::RepositoryRegistrationOptions;
use crate::core::errors::{RegistrarError, RegistrarResult};
use crate::core::registry::EntityTypeSource;
use crate::domain::entities::EntityDescriptor;
use crate::domain::types::TypeKey;

/// 기본 리포지토리 구현 타입 해석 계약
///
/// 기본 구현 타입이 옵션에 지정되지 않았을 때 컨텍스트별로 구현 타입을 찾습니다.
/// 일치하는 타입이 없으면 `ResolutionFailed`를 반환해야 합니다.
pub trait RepositoryTypeResolver {
    /// 기본 식별자(`Uuid`) 엔티티의 구현 타입
    fn repository_type_for_default_key(
        &self,
        context: TypeKey,
        entity: TypeKey,
    ) -> RegistrarResult<TypeKey>;

    /// 사용자 정의 식별자 엔티티의 구현 타입
    fn repository_type(
        &self,
        context: TypeKey,
        entity: TypeKey,
        primary_key: TypeKey,
    ) -> RegistrarResult<TypeKey>;
}

/// 서비스 컨테이너 등록 계약
///
/// 같은 엔티티에 대한 나중 등록이 이전 등록을 덮어씁니다 (last-write-wins).
pub trait ServiceRegistrar {
    fn add_default_repository(&mut self, entity: TypeKey, implementation: TypeKey) -> RegistrarResult<()>;
}

/// 리포지토리 자동 등록기
///
/// 생성 시 받은 옵션 외에는 상태가 없으며, `add_repositories` 호출은 매번
/// 컨텍스트의 엔티티 전체에 대한 독립적인 한 번의 등록 과정입니다.
pub struct RepositoryRegistrar<S, R> {
    options: Arc<RepositoryRegistrationOptions>,
    entity_source: S,
    type_resolver: R,
}

impl<S, R> RepositoryRegistrar<S, R>
where
    S: EntityTypeSource,
    R: RepositoryTypeResolver,
{
    pub fn new(
        options: impl Into<Arc<RepositoryRegistrationOptions>>,
        entity_source: S,
        type_resolver: R,
    ) -> Self {
        Self {
            options: options.into(),
            entity_source,
            type_resolver,
        }
    }

    pub fn options(&self) -> &RepositoryRegistrationOptions {
        &self.options
    }

    /// 컨텍스트의 리포지토리 바인딩을 모두 계산하여 `services`에 등록합니다.
    ///
    /// # Errors
    ///
    /// 엔티티 열거, 타입 해석, 제네릭 타입 닫기, 서비스 등록 중 첫 번째 에러에서 중단하고
    /// 그 에러를 그대로 반환합니다. 이미 전달된 바인딩은 되돌리지 않습니다.
    pub fn add_repositories<C>(&self, services: &mut C, context: TypeKey) -> RegistrarResult<()>
    where
        C: ServiceRegistrar + ?Sized,
    {
        let custom_repositories = self.options.custom_repositories();

        for binding in custom_repositories.iter() {
            log::debug!(
                "Custom repository: {} -> {}",
                binding.entity,
                binding.implementation
            );
            services.add_default_repository(binding.entity, binding.implementation)?;
        }

        let default_count = if self.options.register_default_repositories() {
            self.register_default_repositories(services, context)?
        } else {
            0
        };

        log::info!(
            "Repositories registered for {}: {} custom, {} default",
            context,
            custom_repositories.len(),
            default_count
        );

        Ok(())
    }

    /// 엔티티에 기본 리포지토리를 등록해야 하는지 판단합니다.
    ///
    /// 다음 조건을 모두 만족할 때만 `true`입니다.
    ///
    /// 1. `register_default_repositories`가 켜져 있음
    /// 2. 사용자 정의 리포지토리 매핑에 없음
    /// 3. `include_all_entities_for_default_repositories`가 켜져 있거나 애그리거트 루트임
    pub fn should_register_default_repository_for(&self, entity: &EntityDescriptor) -> bool {
        if !self.options.register_default_repositories() {
            return false;
        }

        if self.options.custom_repositories().contains_key(&entity.entity_type()) {
            return false;
        }

        self.options.include_all_entities_for_default_repositories() || entity.is_aggregate_root()
    }

    /// 엔티티의 기본 리포지토리 구현 타입을 계산합니다. 등록은 하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `MissingPrimaryKey` - 지정된 기본 타입을 닫아야 하는데 엔티티에 단일 키가 없는 경우
    /// * `ArityMismatch`, `ConfigurationMismatch` - 지정된 기본 타입을 닫을 수 없는 경우
    /// * 리졸버가 반환한 에러
    pub fn resolve_repository_type(
        &self,
        context: TypeKey,
        entity: &EntityDescriptor,
    ) -> RegistrarResult<TypeKey> {
        let entity_type = entity.entity_type();
        let primary_key = entity.primary_key_type();
        let is_default_key = entity.has_default_key();

        match (
            self.options.default_repository_implementation_type_with_default_primary_key(),
            self.options.default_repository_implementation_type(),
        ) {
            (Some(with_default_key), Some(with_custom_key)) => {
                if is_default_key {
                    with_default_key.make_generic(&[entity_type])
                } else {
                    let primary_key = primary_key
                        .ok_or_else(|| RegistrarError::MissingPrimaryKey(entity_type.to_string()))?;
                    with_custom_key.make_generic(&[entity_type, primary_key])
                }
            }
            _ => {
                if is_default_key {
                    self.type_resolver
                        .repository_type_for_default_key(context, entity_type)
                } else {
                    let primary_key = primary_key
                        .ok_or_else(|| RegistrarError::MissingPrimaryKey(entity_type.to_string()))?;
                    self.type_resolver
                        .repository_type(context, entity_type, primary_key)
                }
            }
        }
    }

    fn register_default_repositories<C>(&self, services: &mut C, context: TypeKey) -> RegistrarResult<usize>
    where
        C: ServiceRegistrar + ?Sized,
    {
        let mut registered = 0;

        for entity in self.entity_source.entity_types(context)? {
            if !self.should_register_default_repository_for(&entity) {
                log::debug!("Skipping default repository for {}", entity.entity_type());
                continue;
            }

            self.register_default_repository(services, context, &entity)?;
            registered += 1;
        }

        Ok(registered)
    }

    fn register_default_repository<C>(
        &self,
        services: &mut C,
        context: TypeKey,
        entity: &EntityDescriptor,
    ) -> RegistrarResult<()>
    where
        C: ServiceRegistrar + ?Sized,
    {
        let implementation = self.resolve_repository_type(context, entity)?;

        log::debug!(
            "Default repository: {} -> {}",
            entity.entity_type(),
            implementation
        );
        services.add_default_repository(entity.entity_type(), implementation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::StaticEntitySource;
    use crate::domain::bindings::RepositoryBinding;
    use crate::domain::entities::{AggregateRoot, Entity, KeyedEntity};
    use crate::domain::generics::GenericRepositoryType;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::marker::PhantomData;
    use uuid::Uuid;

    struct ShopContext;

    struct Order;
    impl Entity for Order {}
    impl KeyedEntity for Order {
        type Key = Uuid;
    }
    impl AggregateRoot for Order {}

    struct OrderLine;
    impl Entity for OrderLine {}
    impl KeyedEntity for OrderLine {
        type Key = Uuid;
    }

    struct Customer;
    impl Entity for Customer {}
    impl KeyedEntity for Customer {
        type Key = i64;
    }
    impl AggregateRoot for Customer {}

    struct AuditEntry;
    impl Entity for AuditEntry {}

    struct Tag;
    impl Entity for Tag {}
    impl KeyedEntity for Tag {
        type Key = String;
    }
    impl AggregateRoot for Tag {}

    struct MyOrderRepo;
    struct AuditRepo;
    struct ResolvedRepository<C, E, K = Uuid>(PhantomData<(C, E, K)>);
    struct MemoryRepository<E, K = Uuid>(PhantomData<(E, K)>);

    /// 호출 인자를 기록하는 리졸버
    #[derive(Default)]
    struct RecordingResolver {
        calls: RefCell<Vec<String>>,
    }

    impl RepositoryTypeResolver for RecordingResolver {
        fn repository_type_for_default_key(
            &self,
            context: TypeKey,
            entity: TypeKey,
        ) -> RegistrarResult<TypeKey> {
            self.calls
                .borrow_mut()
                .push(format!("default_key({}, {})", context, entity));
            if entity == TypeKey::of::<Order>() {
                Ok(TypeKey::of::<ResolvedRepository<ShopContext, Order>>())
            } else if entity == TypeKey::of::<OrderLine>() {
                Ok(TypeKey::of::<ResolvedRepository<ShopContext, OrderLine>>())
            } else {
                Err(RegistrarError::ResolutionFailed(entity.to_string()))
            }
        }

        fn repository_type(
            &self,
            context: TypeKey,
            entity: TypeKey,
            primary_key: TypeKey,
        ) -> RegistrarResult<TypeKey> {
            self.calls
                .borrow_mut()
                .push(format!("custom_key({}, {}, {})", context, entity, primary_key));
            if entity == TypeKey::of::<Customer>() {
                Ok(TypeKey::of::<ResolvedRepository<ShopContext, Customer, i64>>())
            } else {
                Err(RegistrarError::ResolutionFailed(entity.to_string()))
            }
        }
    }

    /// 등록 순서를 기록하고 마지막 등록을 유지하는 서비스 컬렉션
    #[derive(Default)]
    struct RecordingServices {
        emitted: Vec<RepositoryBinding>,
        current: HashMap<TypeKey, TypeKey>,
        fail_on: Option<TypeKey>,
    }

    impl ServiceRegistrar for RecordingServices {
        fn add_default_repository(&mut self, entity: TypeKey, implementation: TypeKey) -> RegistrarResult<()> {
            if self.fail_on == Some(entity) {
                return Err(RegistrarError::RegistrationFailed(entity.to_string()));
            }
            self.emitted.push(RepositoryBinding::new(entity, implementation));
            self.current.insert(entity, implementation);
            Ok(())
        }
    }

    fn context() -> TypeKey {
        TypeKey::of::<ShopContext>()
    }

    fn shop_source() -> StaticEntitySource {
        StaticEntitySource::new()
            .with_entity(context(), EntityDescriptor::aggregate_root::<Order>())
            .with_entity(context(), EntityDescriptor::keyed::<OrderLine>())
    }

    fn registrar(
        options: RepositoryRegistrationOptions,
        source: StaticEntitySource,
    ) -> RepositoryRegistrar<StaticEntitySource, RecordingResolver> {
        RepositoryRegistrar::new(options, source, RecordingResolver::default())
    }

    fn binding<E: 'static, I: 'static>() -> RepositoryBinding {
        RepositoryBinding::new(TypeKey::of::<E>(), TypeKey::of::<I>())
    }

    fn memory_repository_types() -> (GenericRepositoryType, GenericRepositoryType) {
        let with_default_key = GenericRepositoryType::with_default_key("MemoryRepository")
            .close_over_entity::<Order, MemoryRepository<Order>>()
            .unwrap()
            .close_over_entity::<OrderLine, MemoryRepository<OrderLine>>()
            .unwrap();
        let with_custom_key = GenericRepositoryType::with_custom_key("MemoryRepository")
            .close_over_entity_and_key::<Customer, MemoryRepository<Customer, i64>>()
            .unwrap();
        (with_default_key, with_custom_key)
    }

    #[test]
    fn test_only_aggregate_roots_by_default() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(false)
            .build();
        let registrar = registrar(options, shop_source());
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(
            services.emitted,
            vec![binding::<Order, ResolvedRepository<ShopContext, Order>>()]
        );
        assert_eq!(
            *registrar.type_resolver.calls.borrow(),
            vec!["default_key(ShopContext, Order)".to_string()]
        );
    }

    #[test]
    fn test_include_all_entities() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .build();
        let registrar = registrar(options, shop_source());
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(
            services.emitted,
            vec![
                binding::<Order, ResolvedRepository<ShopContext, Order>>(),
                binding::<OrderLine, ResolvedRepository<ShopContext, OrderLine>>(),
            ]
        );
    }

    #[test]
    fn test_entity_listed_under_two_descriptor_kinds_is_bound_once() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .build();
        let source = StaticEntitySource::new()
            .with_entity(context(), EntityDescriptor::keyed::<Order>())
            .with_entity(context(), EntityDescriptor::aggregate_root::<Order>());
        let registrar = registrar(options, source);
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(
            services.emitted,
            vec![binding::<Order, ResolvedRepository<ShopContext, Order>>()]
        );
    }

    #[test]
    fn test_custom_repository_wins() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .add_repository::<Order, MyOrderRepo>()
            .build();
        let registrar = registrar(options, shop_source());
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(
            services.emitted,
            vec![
                binding::<Order, MyOrderRepo>(),
                binding::<OrderLine, ResolvedRepository<ShopContext, OrderLine>>(),
            ]
        );
        assert!(!registrar.should_register_default_repository_for(&EntityDescriptor::aggregate_root::<Order>()));
    }

    #[test]
    fn test_custom_repository_for_non_aggregate_root_is_honored() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(false)
            .add_repository::<AuditEntry, AuditRepo>()
            .build();
        let source = shop_source().with_entity(context(), EntityDescriptor::composite::<AuditEntry>());
        let registrar = registrar(options, source);
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(services.current.get(&TypeKey::of::<AuditEntry>()), Some(&TypeKey::of::<AuditRepo>()));
        assert_eq!(services.emitted.len(), 2);
    }

    #[test]
    fn test_defaults_disabled_emits_only_custom() {
        let options = RepositoryRegistrationOptions::builder()
            .include_all_entities_for_default_repositories(true)
            .add_repository::<Order, MyOrderRepo>()
            .build();
        let registrar = registrar(options, shop_source());
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(services.emitted, vec![binding::<Order, MyOrderRepo>()]);
        assert!(registrar.type_resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_defaults_disabled_does_not_enumerate() {
        let options = RepositoryRegistrationOptions::builder().build();
        let failing_source = |_context: TypeKey| -> RegistrarResult<Vec<EntityDescriptor>> {
            Err(RegistrarError::EnumerationFailed("must not be called".to_string()))
        };
        let registrar = RepositoryRegistrar::new(options, failing_source, RecordingResolver::default());

        assert!(registrar
            .add_repositories(&mut RecordingServices::default(), context())
            .is_ok());
    }

    #[test]
    fn test_should_register_predicate() {
        let order = EntityDescriptor::aggregate_root::<Order>();
        let line = EntityDescriptor::keyed::<OrderLine>();
        let audit = EntityDescriptor::composite::<AuditEntry>();

        let cases = [
            // (register_defaults, include_all, order, line, audit)
            (false, false, false, false, false),
            (false, true, false, false, false),
            (true, false, true, false, false),
            (true, true, true, true, true),
        ];

        for (register_defaults, include_all, expect_order, expect_line, expect_audit) in cases {
            let options = RepositoryRegistrationOptions::builder()
                .register_default_repositories(register_defaults)
                .include_all_entities_for_default_repositories(include_all)
                .build();
            let registrar = registrar(options, StaticEntitySource::new());

            assert_eq!(registrar.should_register_default_repository_for(&order), expect_order);
            assert_eq!(registrar.should_register_default_repository_for(&line), expect_line);
            assert_eq!(registrar.should_register_default_repository_for(&audit), expect_audit);
        }
    }

    #[test]
    fn test_custom_key_delegates_to_resolver() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(false)
            .build();
        let source = StaticEntitySource::new()
            .with_entity(context(), EntityDescriptor::aggregate_root::<Customer>());
        let registrar = registrar(options, source);
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(
            services.emitted,
            vec![binding::<Customer, ResolvedRepository<ShopContext, Customer, i64>>()]
        );
        assert_eq!(
            *registrar.type_resolver.calls.borrow(),
            vec!["custom_key(ShopContext, Customer, i64)".to_string()]
        );
    }

    #[test]
    fn test_specified_default_types() {
        let (with_default_key, with_custom_key) = memory_repository_types();
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .set_default_repository_types(with_default_key, with_custom_key)
            .unwrap()
            .build();
        let source = shop_source().with_entity(context(), EntityDescriptor::aggregate_root::<Customer>());
        let registrar = registrar(options, source);
        let mut services = RecordingServices::default();

        registrar.add_repositories(&mut services, context()).unwrap();

        assert_eq!(
            services.emitted,
            vec![
                binding::<Order, MemoryRepository<Order>>(),
                binding::<OrderLine, MemoryRepository<OrderLine>>(),
                binding::<Customer, MemoryRepository<Customer, i64>>(),
            ]
        );
        assert!(registrar.type_resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_unclosable_default_type_is_fatal() {
        let with_default_key = GenericRepositoryType::with_default_key("MemoryRepository")
            .close_over_entity::<Order, MemoryRepository<Order>>()
            .unwrap();
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .set_default_repository_types(
                with_default_key,
                GenericRepositoryType::with_custom_key("MemoryRepository"),
            )
            .unwrap()
            .build();
        let source = shop_source().with_entity(context(), EntityDescriptor::aggregate_root::<Customer>());
        let registrar = registrar(options, source);
        let mut services = RecordingServices::default();

        let result = registrar.add_repositories(&mut services, context());

        assert!(matches!(result, Err(RegistrarError::ConfigurationMismatch { .. })));
        // OrderLine 닫기에서 실패하므로 Order만 전달됨
        assert_eq!(services.emitted, vec![binding::<Order, MemoryRepository<Order>>()]);
    }

    #[test]
    fn test_composite_key_entity_cannot_be_resolved() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .build();
        let source = StaticEntitySource::new()
            .with_entity(context(), EntityDescriptor::composite::<AuditEntry>());
        let registrar = registrar(options, source);

        let result = registrar.add_repositories(&mut RecordingServices::default(), context());

        assert_eq!(
            result,
            Err(RegistrarError::MissingPrimaryKey("AuditEntry".to_string()))
        );
    }

    #[test]
    fn test_resolution_failure_propagates() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .build();
        let source = StaticEntitySource::new()
            .with_entity(context(), EntityDescriptor::aggregate_root::<Tag>())
            .with_entity(context(), EntityDescriptor::aggregate_root::<Order>());
        let registrar = registrar(options, source);
        let mut services = RecordingServices::default();

        let result = registrar.add_repositories(&mut services, context());

        assert_eq!(result, Err(RegistrarError::ResolutionFailed("Tag".to_string())));
        // 실패 이후의 엔티티는 처리되지 않음
        assert!(services.emitted.is_empty());
    }

    #[test]
    fn test_enumeration_failure_propagates() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(false)
            .build();
        let registrar = registrar(options, StaticEntitySource::new());

        let result = registrar.add_repositories(&mut RecordingServices::default(), context());

        assert!(matches!(result, Err(RegistrarError::EnumerationFailed(_))));
    }

    #[test]
    fn test_registration_failure_stops_pass() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .build();
        let registrar = registrar(options, shop_source());
        let mut services = RecordingServices {
            fail_on: Some(TypeKey::of::<Order>()),
            ..Default::default()
        };

        let result = registrar.add_repositories(&mut services, context());

        assert_eq!(result, Err(RegistrarError::RegistrationFailed("Order".to_string())));
        assert!(services.emitted.is_empty());
    }

    #[test]
    fn test_repeated_pass_is_idempotent() {
        let options = RepositoryRegistrationOptions::builder()
            .add_default_repositories(true)
            .add_repository::<Order, MyOrderRepo>()
            .build();
        let registrar = registrar(options, shop_source());
        let mut once = RecordingServices::default();
        let mut twice = RecordingServices::default();

        registrar.add_repositories(&mut once, context()).unwrap();
        registrar.add_repositories(&mut twice, context()).unwrap();
        registrar.add_repositories(&mut twice, context()).unwrap();

        assert_eq!(once.current, twice.current);
    }
}
