//! 리포지토리 자동 등록 데모 애플리케이션
//!
//! 샘플 쇼핑몰 영속성 컨텍스트의 엔티티들을 등록기에 통과시켜
//! 어떤 리포지토리가 어떤 구현 타입으로 바인딩되는지 출력합니다.

use std::error::Error;
use std::marker::PhantomData;
use std::process::ExitCode;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use uuid::Uuid;

use repository_registrar::config::{RegistrationConfig, RepositoryRegistrationOptions};
use repository_registrar::core::{EntityTypeSource, InventoryEntitySource, RegistrarResult};
use repository_registrar::domain::{AggregateRoot, Entity, GenericRepositoryType, KeyedEntity, TypeKey};
use repository_registrar::register_entity;
use repository_registrar::repositories::{ContextRepositoryTypeResolver, RepositoryRegistrar, ServiceCollection};
use repository_registrar::utils::display_terminal::{
    print_binding, print_boxed_title, print_final_summary, print_step_complete, print_step_start,
};

/// 보고서 출력 형식을 지정하는 환경 변수 (`text` | `json`)
const REPORT_FORMAT_VAR: &str = "REPOSITORY_REPORT_FORMAT";
/// 설정되면 `MemoryRepository`를 기본 구현 타입으로 지정
const MEMORY_REPOSITORIES_VAR: &str = "REPOSITORY_USE_MEMORY";

/// 쇼핑몰 영속성 컨텍스트
struct ShopContext;

/// 주문 (Uuid 키 애그리거트 루트)
#[allow(dead_code)]
struct Order {
    id: Uuid,
}
impl Entity for Order {}
impl KeyedEntity for Order {
    type Key = Uuid;
}
impl AggregateRoot for Order {}

/// 주문 항목 (애그리거트 루트 아님)
#[allow(dead_code)]
struct OrderLine {
    id: Uuid,
}
impl Entity for OrderLine {}
impl KeyedEntity for OrderLine {
    type Key = Uuid;
}

/// 고객 (i64 키 애그리거트 루트)
#[allow(dead_code)]
struct Customer {
    id: i64,
}
impl Entity for Customer {}
impl KeyedEntity for Customer {
    type Key = i64;
}
impl AggregateRoot for Customer {}

/// 감사 로그 (복합 키)
#[allow(dead_code)]
struct AuditEntry {
    order_id: Uuid,
    sequence: u32,
}
impl Entity for AuditEntry {}

register_entity!(ShopContext => aggregate_root Order);
register_entity!(ShopContext => keyed OrderLine);
register_entity!(ShopContext => aggregate_root Customer);
register_entity!(ShopContext => composite AuditEntry);

/// 컨텍스트 기반 제네릭 리포지토리
struct DbRepository<C, E, K = Uuid>(PhantomData<(C, E, K)>);

/// 컨텍스트 없는 인메모리 제네릭 리포지토리
struct MemoryRepository<E, K = Uuid>(PhantomData<(E, K)>);

/// 감사 로그 전용 리포지토리
struct AuditEntryRepository;

fn main() -> ExitCode {
    let (profile, env_loaded) = load_env_file();
    init_logging();

    info!("Current profile: {} (.env 로드: {})", profile, env_loaded);
    info!("🚀 리포지토리 등록 시작중...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ 리포지토리 등록 실패: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let context = TypeKey::of::<ShopContext>();
    let config = RegistrationConfig::from_env();
    info!("등록 설정 로드됨: {:?}", config);

    let options = config
        .apply(RepositoryRegistrationOptions::builder())
        .add_repository::<AuditEntry, AuditEntryRepository>();

    let options = if std::env::var(MEMORY_REPOSITORIES_VAR).is_ok() {
        let (with_default_key, with_custom_key) = memory_repository_types()?;
        options.set_default_repository_types(with_default_key, with_custom_key)?
    } else {
        options
    }
    .build();

    let registrar = RepositoryRegistrar::new(options, InventoryEntitySource, db_repository_resolver()?);
    let mut services = ServiceCollection::new();

    print_boxed_title("🔄 REGISTERING REPOSITORIES");
    print_step_start(1, "Resolving repository bindings");
    registrar.add_repositories(&mut services, context)?;
    print_step_complete(1, "Repository bindings resolved", services.len());

    let contexts: Vec<String> = InventoryEntitySource
        .contexts()
        .iter()
        .map(TypeKey::short_name)
        .collect();
    info!("📚 등록된 영속성 컨텍스트: [{}]", contexts.join(", "));

    let entity_count = InventoryEntitySource.entity_types(context)?.len();
    report(&services, entity_count)
}

fn report(services: &ServiceCollection, entity_count: usize) -> Result<(), Box<dyn Error>> {
    let format = std::env::var(REPORT_FORMAT_VAR).unwrap_or_else(|_| "text".to_string());

    if format.eq_ignore_ascii_case("json") {
        let json = serde_json::to_string_pretty(&services.descriptors())?;
        println!("{}", json);
        return Ok(());
    }

    for binding in services.bindings() {
        print_binding(&binding);
    }
    print_final_summary(entity_count, services.len(), services.descriptors().len());
    Ok(())
}

/// 컨텍스트별 리졸버 (기본 구현 타입이 지정되지 않았을 때 사용)
fn db_repository_resolver() -> RegistrarResult<ContextRepositoryTypeResolver> {
    ContextRepositoryTypeResolver::new("DbRepository")
        .register_default_key::<ShopContext, Order, DbRepository<ShopContext, Order>>()?
        .register_default_key::<ShopContext, OrderLine, DbRepository<ShopContext, OrderLine>>()?
        .register_custom_key::<ShopContext, Customer, DbRepository<ShopContext, Customer, i64>>()
}

/// 지정된 기본 구현 타입 한 쌍
fn memory_repository_types() -> RegistrarResult<(GenericRepositoryType, GenericRepositoryType)> {
    let with_default_key = GenericRepositoryType::with_default_key("MemoryRepository")
        .close_over_entity::<Order, MemoryRepository<Order>>()?
        .close_over_entity::<OrderLine, MemoryRepository<OrderLine>>()?;
    let with_custom_key = GenericRepositoryType::with_custom_key("MemoryRepository")
        .close_over_entity_and_key::<Customer, MemoryRepository<Customer, i64>>()?;

    Ok((with_default_key, with_custom_key))
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 로깅 초기화 전에 호출되므로 결과는 반환값으로 전달합니다.
fn load_env_file() -> (String, bool) {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").is_ok(),
        "dev" => dotenv::from_filename(".env.dev").is_ok(),
        _ => dotenv().is_ok(),
    };

    (profile, loaded)
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`로 레벨을 조정할 수 있으며 기본값은 info입니다.
///
/// ```bash
/// # 바인딩별 debug 로그 확인
/// RUST_LOG=repository_registrar=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}
