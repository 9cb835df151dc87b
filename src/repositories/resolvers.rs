//! 컨텍스트 제네릭 리포지토리 타입 리졸버
//!
//! `DbRepository<TContext, TEntity>`, `DbRepository<TContext, TEntity, TKey>`처럼
//! 영속성 컨텍스트를 첫 번째 타입 인자로 받는 제네릭 리포지토리를
//! [`RepositoryTypeResolver`]로 사용할 수 있게 해주는 구현체입니다.
//!
//! ```rust,ignore
//! let resolver = ContextRepositoryTypeResolver::new("DbRepository")
//!     .register_default_key::<ShopContext, Order, DbRepository<ShopContext, Order>>()?
//!     .register_custom_key::<ShopContext, Customer, DbRepository<ShopContext, Customer, i64>>()?;
//! ```

use crate::core::errors::{RegistrarError, RegistrarResult};
use crate::domain::entities::KeyedEntity;
use crate::domain::generics::GenericRepositoryType;
use crate::domain::types::TypeKey;
use crate::repositories::registrar::RepositoryTypeResolver;

/// (컨텍스트, 엔티티[, 키])로 닫히는 제네릭 리포지토리 타입 리졸버
#[derive(Debug, Clone)]
pub struct ContextRepositoryTypeResolver {
    with_default_key: GenericRepositoryType,
    with_custom_key: GenericRepositoryType,
}

impl ContextRepositoryTypeResolver {
    pub fn new(name: &'static str) -> Self {
        Self {
            with_default_key: GenericRepositoryType::new(name, 2),
            with_custom_key: GenericRepositoryType::new(name, 3),
        }
    }

    /// 기본 식별자 엔티티 `E`에 대해 `R`을 (`C`, `E`)로 닫힌 타입으로 등록합니다.
    pub fn register_default_key<C: 'static, E: KeyedEntity, R: 'static>(mut self) -> RegistrarResult<Self> {
        self.with_default_key = self
            .with_default_key
            .close_over(&[TypeKey::of::<C>(), TypeKey::of::<E>()], TypeKey::of::<R>())?;
        Ok(self)
    }

    /// 사용자 정의 식별자 엔티티 `E`에 대해 `R`을 (`C`, `E`, `E::Key`)로 닫힌 타입으로 등록합니다.
    pub fn register_custom_key<C: 'static, E: KeyedEntity, R: 'static>(mut self) -> RegistrarResult<Self> {
        self.with_custom_key = self.with_custom_key.close_over(
            &[TypeKey::of::<C>(), TypeKey::of::<E>(), TypeKey::of::<E::Key>()],
            TypeKey::of::<R>(),
        )?;
        Ok(self)
    }
}

impl RepositoryTypeResolver for ContextRepositoryTypeResolver {
    fn repository_type_for_default_key(
        &self,
        context: TypeKey,
        entity: TypeKey,
    ) -> RegistrarResult<TypeKey> {
        self.with_default_key
            .make_generic(&[context, entity])
            .map_err(into_resolution_failure)
    }

    fn repository_type(
        &self,
        context: TypeKey,
        entity: TypeKey,
        primary_key: TypeKey,
    ) -> RegistrarResult<TypeKey> {
        self.with_custom_key
            .make_generic(&[context, entity, primary_key])
            .map_err(into_resolution_failure)
    }
}

/// 리졸버 안에서 닫을 타입을 찾지 못한 것은 설정 오류가 아니라 해석 실패입니다.
fn into_resolution_failure(error: RegistrarError) -> RegistrarError {
    match error {
        RegistrarError::ConfigurationMismatch { generic, arguments } => RegistrarError::ResolutionFailed(
            format!("No repository type {}<{}> registered", generic, arguments),
        ),
        other => other,
    }
}
