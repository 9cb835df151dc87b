//! 인메모리 서비스 컬렉션
//!
//! [`ServiceRegistrar`]의 기본 구현입니다. 하나의 바인딩을 받으면 그 엔티티의
//! 리포지토리 인터페이스 계층 전체에 같은 구현 타입을 등록합니다.
//!
//! ```text
//! add_default_repository(Order, OrderRepository)
//!   ├─ ReadOnlyBasicRepository<Order> → OrderRepository
//!   ├─ ReadOnlyRepository<Order>      → OrderRepository
//!   ├─ BasicRepository<Order>         → OrderRepository
//!   └─ Repository<Order>              → OrderRepository
//! ```
//!
//! 같은 엔티티를 다시 등록하면 구현 타입만 교체되고 (last-write-wins),
//! 순회 순서는 처음 등록된 순서를 유지합니다.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::errors::RegistrarResult;
use crate::domain::bindings::RepositoryBinding;
use crate::domain::types::TypeKey;
use crate::repositories::registrar::ServiceRegistrar;

/// 추상 리포지토리 인터페이스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RepositoryInterface {
    ReadOnlyBasicRepository,
    ReadOnlyRepository,
    BasicRepository,
    Repository,
}

impl RepositoryInterface {
    /// 바인딩 하나가 등록되는 인터페이스 계층 (읽기 전용 → 전체)
    pub const ALL: [RepositoryInterface; 4] = [
        RepositoryInterface::ReadOnlyBasicRepository,
        RepositoryInterface::ReadOnlyRepository,
        RepositoryInterface::BasicRepository,
        RepositoryInterface::Repository,
    ];
}

/// (인터페이스, 엔티티) → 구현 타입 등록 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub interface: RepositoryInterface,
    pub entity: TypeKey,
    pub implementation: TypeKey,
}

/// 리포지토리 서비스 컬렉션
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: HashMap<(RepositoryInterface, TypeKey), ServiceDescriptor>,
    /// 처음 등록된 순서의 엔티티 목록
    entities: Vec<TypeKey>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 인터페이스와 엔티티로 구현 타입을 조회합니다.
    pub fn resolve(&self, interface: RepositoryInterface, entity: TypeKey) -> Option<TypeKey> {
        self.descriptors
            .get(&(interface, entity))
            .map(|descriptor| descriptor.implementation)
    }

    /// 엔티티의 `Repository` 구현 타입
    pub fn implementation_for(&self, entity: TypeKey) -> Option<TypeKey> {
        self.resolve(RepositoryInterface::Repository, entity)
    }

    /// 엔티티별 현재 바인딩 (처음 등록된 순서)
    pub fn bindings(&self) -> Vec<RepositoryBinding> {
        self.entities
            .iter()
            .filter_map(|&entity| {
                self.implementation_for(entity)
                    .map(|implementation| RepositoryBinding::new(entity, implementation))
            })
            .collect()
    }

    /// 모든 서비스 등록 정보 (엔티티 순서 × 인터페이스 계층 순서)
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        self.entities
            .iter()
            .flat_map(|&entity| {
                RepositoryInterface::ALL
                    .into_iter()
                    .filter_map(move |interface| self.descriptors.get(&(interface, entity)).copied())
            })
            .collect()
    }

    /// 바인딩된 엔티티 수
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl ServiceRegistrar for ServiceCollection {
    fn add_default_repository(&mut self, entity: TypeKey, implementation: TypeKey) -> RegistrarResult<()> {
        match self.implementation_for(entity) {
            Some(previous) if previous != implementation => {
                log::debug!(
                    "Replacing repository for {}: {} -> {}",
                    entity,
                    previous,
                    implementation
                );
            }
            Some(_) => {}
            None => self.entities.push(entity),
        }

        for interface in RepositoryInterface::ALL {
            self.descriptors.insert(
                (interface, entity),
                ServiceDescriptor {
                    interface,
                    entity,
                    implementation,
                },
            );
        }

        Ok(())
    }
}
