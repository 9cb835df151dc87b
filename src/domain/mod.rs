//! # Domain Module
//!
//! 등록기가 다루는 타입 수준 개념들을 정의합니다.
//!
//! ```text
//! Domain Layer
//! ├── types      ← TypeKey (런타임 타입 식별자)
//! ├── entities   ← Entity / KeyedEntity / AggregateRoot, EntityDescriptor
//! ├── generics   ← 오픈 제네릭 리포지토리 타입과 닫힌 타입 테이블
//! └── bindings   ← (엔티티, 구현 타입) 바인딩
//! ```

pub mod bindings;
pub mod entities;
pub mod generics;
pub mod types;

pub use bindings::RepositoryBinding;
pub use entities::{AggregateRoot, Entity, EntityDescriptor, KeyedEntity};
pub use generics::GenericRepositoryType;
pub use types::TypeKey;
