//! 리포지토리 등록 계층
//!
//! 기본 리포지토리 등록 여부를 결정하고 구현 타입을 계산하는 등록기와,
//! 그 결과를 받는 서비스 컬렉션을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use repository_registrar::repositories::{RepositoryRegistrar, ServiceCollection};
//!
//! let registrar = RepositoryRegistrar::new(options, InventoryEntitySource, resolver);
//! let mut services = ServiceCollection::new();
//! registrar.add_repositories(&mut services, TypeKey::of::<ShopContext>())?;
//!
//! let repository = services.implementation_for(TypeKey::of::<Order>());
//! ```

pub mod registrar;
pub mod resolvers;
pub mod service_collection;

pub use registrar::{RepositoryRegistrar, RepositoryTypeResolver, ServiceRegistrar};
pub use resolvers::ContextRepositoryTypeResolver;
pub use service_collection::{RepositoryInterface, ServiceCollection, ServiceDescriptor};
