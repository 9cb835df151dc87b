//! 리포지토리 바인딩
//!
//! 등록기의 출력 단위입니다. 엔티티 타입과 그 엔티티에 연결할 구체 리포지토리 구현 타입의 쌍으로,
//! 쌍 자체 외의 식별자는 없으며 저장되지 않습니다.

use serde::Serialize;

use crate::domain::types::TypeKey;

/// (엔티티, 구현 타입) 바인딩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryBinding {
    pub entity: TypeKey,
    pub implementation: TypeKey,
}

impl RepositoryBinding {
    pub fn new(entity: TypeKey, implementation: TypeKey) -> Self {
        Self {
            entity,
            implementation,
        }
    }
}
