//! 오픈 제네릭 리포지토리 타입
//!
//! 런타임에 제네릭 타입을 닫는 `MakeGenericType` 대신, 시작 시점에 명시적으로
//! 등록한 닫힌 타입 테이블을 사용합니다. `MemoryRepository<E, K>` 같은 제네릭 구현체는
//! 엔티티마다 한 번씩 `close_over_*`로 등록되고, 등록기는 [`GenericRepositoryType::make_generic`]으로
//! 이 테이블을 조회합니다.
//!
//! ```rust,ignore
//! let with_default_key = GenericRepositoryType::with_default_key("MemoryRepository")
//!     .close_over_entity::<Order, MemoryRepository<Order>>()?;
//!
//! let with_custom_key = GenericRepositoryType::with_custom_key("MemoryRepository")
//!     .close_over_entity_and_key::<Customer, MemoryRepository<Customer, i64>>()?;
//! ```

use std::collections::HashMap;

use crate::core::errors::{RegistrarError, RegistrarResult};
use crate::domain::entities::{Entity, KeyedEntity};
use crate::domain::types::TypeKey;

/// 이름과 arity를 가진 오픈 제네릭 타입과 그 닫힌 타입 테이블
#[derive(Debug, Clone)]
pub struct GenericRepositoryType {
    name: &'static str,
    arity: usize,
    closings: HashMap<Vec<TypeKey>, TypeKey>,
}

impl GenericRepositoryType {
    pub fn new(name: &'static str, arity: usize) -> Self {
        Self {
            name,
            arity,
            closings: HashMap::new(),
        }
    }

    /// 엔티티 하나로 닫히는 타입 (기본 식별자 엔티티용)
    pub fn with_default_key(name: &'static str) -> Self {
        Self::new(name, 1)
    }

    /// (엔티티, 키)로 닫히는 타입 (사용자 정의 식별자 엔티티용)
    pub fn with_custom_key(name: &'static str) -> Self {
        Self::new(name, 2)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// 타입 인자 목록에 대한 닫힌 타입을 등록합니다.
    ///
    /// 같은 인자로 다시 등록하면 이전 값을 대체합니다.
    pub fn close_over(mut self, arguments: &[TypeKey], closed: TypeKey) -> RegistrarResult<Self> {
        self.check_arity(arguments)?;
        self.closings.insert(arguments.to_vec(), closed);
        Ok(self)
    }

    /// `R`을 엔티티 `E`로 닫힌 타입으로 등록합니다.
    pub fn close_over_entity<E: Entity, R: 'static>(self) -> RegistrarResult<Self> {
        self.close_over(&[TypeKey::of::<E>()], TypeKey::of::<R>())
    }

    /// `R`을 (`E`, `E::Key`)로 닫힌 타입으로 등록합니다.
    pub fn close_over_entity_and_key<E: KeyedEntity, R: 'static>(self) -> RegistrarResult<Self> {
        self.close_over(
            &[TypeKey::of::<E>(), TypeKey::of::<E::Key>()],
            TypeKey::of::<R>(),
        )
    }

    /// 타입 인자로 제네릭 타입을 닫습니다.
    ///
    /// # Errors
    ///
    /// * `ArityMismatch` - 인자 개수가 arity와 다른 경우
    /// * `ConfigurationMismatch` - 해당 인자에 대한 닫힌 타입이 등록되지 않은 경우
    pub fn make_generic(&self, arguments: &[TypeKey]) -> RegistrarResult<TypeKey> {
        self.check_arity(arguments)?;

        self.closings
            .get(arguments)
            .copied()
            .ok_or_else(|| RegistrarError::ConfigurationMismatch {
                generic: self.name.to_string(),
                arguments: arguments
                    .iter()
                    .map(TypeKey::short_name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    fn check_arity(&self, arguments: &[TypeKey]) -> RegistrarResult<()> {
        if arguments.len() != self.arity {
            return Err(RegistrarError::ArityMismatch {
                generic: self.name.to_string(),
                expected: self.arity,
                actual: arguments.len(),
            });
        }
        Ok(())
    }
}
