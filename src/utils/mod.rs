//! 공통 유틸리티 모듈
//!
//! 등록 과정의 터미널 출력처럼 여러 모듈에서 함께 쓰는 보조 기능을 모아둡니다.

pub mod display_terminal;
