//! 런타임 타입 식별자
//!
//! 리플렉션의 `Type` 대신 `TypeId`와 타입 이름을 묶은 [`TypeKey`]를 사용합니다.
//! 엔티티, 기본 키, 리포지토리 구현체, 영속성 컨텍스트 모두 이 값으로 식별됩니다.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};
use uuid::Uuid;

/// 타입 식별 토큰
///
/// 동등성과 해시는 `TypeId`만으로 결정되며, 이름은 출력용입니다.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// 정적 타입 `T`의 토큰을 만듭니다.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 기본 식별자 타입(`Uuid`)의 토큰
    pub fn default_key() -> Self {
        Self::of::<Uuid>()
    }

    /// 이 타입이 기본 식별자 타입인지 확인합니다.
    pub fn is_default_key(&self) -> bool {
        self.id == TypeId::of::<Uuid>()
    }

    /// 모듈 경로를 제거한 타입 이름
    ///
    /// 제네릭 인자 안의 경로도 함께 제거합니다.
    ///
    /// ```rust,ignore
    /// // "shop::MemoryRepository<shop::Order, uuid::Uuid>" -> "MemoryRepository<Order, Uuid>"
    /// let name = TypeKey::of::<MemoryRepository<Order, Uuid>>().short_name();
    /// ```
    pub fn short_name(&self) -> String {
        extract_clean_type_name(self.name)
    }
}

/// `std::any::type_name` 결과에서 모듈 경로를 제거합니다.
fn extract_clean_type_name(type_name: &str) -> String {
    let mut clean = String::with_capacity(type_name.len());
    // 현재 경로 세그먼트가 시작되는 위치
    let mut segment_start = 0;
    let mut chars = type_name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            clean.truncate(segment_start);
            continue;
        }

        clean.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = clean.len();
        }
    }

    clean
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.short_name())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
