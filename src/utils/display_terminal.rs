//! 터미널 출력 포맷팅 유틸리티
//!
//! 리포지토리 등록 과정과 결과를 터미널에 출력하는 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 바인딩 목록 등을 시각적으로 표현합니다.

use crate::domain::bindings::RepositoryBinding;

/// 박스 내부 콘텐츠 너비
const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// Unicode 박스 문자를 사용하며, 텍스트는 중앙 정렬됩니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║             REGISTERING REPOSITORIES             ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!("╔{border}╗\n║{title:^width$}║\n╚{border}╝", width = BOX_WIDTH)
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Registering custom repositories
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 처리된 항목 수와 함께 표시합니다
///
/// ```text
/// ✓ Step 1: Custom repositories registered (2 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 바인딩 하나를 트리 항목으로 출력합니다
///
/// ```text
///    ├─ Order → MemoryRepository<Order>
/// ```
pub fn print_binding(binding: &RepositoryBinding) {
    println!("{}", binding_line(binding));
}

fn binding_line(binding: &RepositoryBinding) -> String {
    format!("   ├─ {} → {}", binding.entity, binding.implementation)
}

/// 최종 요약을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║         🎉 REPOSITORY REGISTRATION DONE          ║
/// ╚══════════════════════════════════════════════════╝
///    📚 Entities: 4
///    📦 Repositories: 3
///    🔧 Service descriptors: 12
/// ```
pub fn print_final_summary(entities: usize, repositories: usize, descriptors: usize) {
    println!();
    print_boxed_title("🎉 REPOSITORY REGISTRATION DONE");
    println!("   📚 Entities: {}", entities);
    println!("   📦 Repositories: {}", repositories);
    println!("   🔧 Service descriptors: {}", descriptors);
    println!();
}
