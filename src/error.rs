//! 에러 타입 정의 모듈
//!
//! fmerge에서 발생할 수 있는 실행 단위 에러와 분수 구문 에러를 정의합니다.
//! 개별 파일 단위의 문제는 에러가 아니라 [`crate::scanner::SkipReason`]으로 보고됩니다.

use std::path::PathBuf;
use thiserror::Error;

/// 구간 지정 문자열(분수)의 구문/범위 에러
///
/// 규칙마다 별도의 변형과 메시지를 가집니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    /// '/' 구분자가 없음
    #[error("분수는 '<분자>/<분모>' 형식이어야 합니다 (예: '1/2'): {input:?}")]
    MissingSlash { input: String },

    /// 분자 또는 분모가 비어 있음
    #[error("분자와 분모가 모두 필요합니다 (예: '1/2'): {input:?}")]
    MissingPart { input: String },

    /// 정수가 아닌 값
    #[error("분수 값은 정수여야 합니다 (예: '3/5'): {input:?}")]
    NotInteger { input: String },

    /// i64 범위를 벗어난 정수
    #[error("분수 값이 표현 가능한 범위를 벗어났습니다: {input:?}")]
    IntegerOutOfRange { input: String },

    /// 분모가 0 이하
    #[error("분모는 0보다 커야 합니다: {denominator}")]
    NonPositiveDenominator { denominator: i64 },

    /// 분자가 0 이하
    #[error("분자는 0보다 커야 합니다: {numerator}")]
    NonPositiveNumerator { numerator: i64 },

    /// 분자가 분모보다 큼
    #[error("분자({numerator})가 분모({denominator})보다 클 수 없습니다")]
    NumeratorExceedsDenominator { numerator: i64, denominator: i64 },

    /// 시작/끝 분수의 분모가 다름
    #[error("시작 분수와 끝 분수의 분모가 같아야 합니다: {start} != {end}")]
    DenominatorMismatch { start: u64, end: u64 },

    /// 시작 구간이 분모보다 큼
    #[error("구간 시작({start})이 분모({denominator})보다 클 수 없습니다")]
    StartExceedsDenominator { start: u64, denominator: u64 },

    /// 끝 구간이 분모보다 큼
    #[error("구간 끝({end})이 분모({denominator})보다 클 수 없습니다")]
    EndExceedsDenominator { end: u64, denominator: u64 },

    /// 끝 구간이 시작 구간보다 작음
    #[error("구간 끝({end})은 구간 시작({start})보다 크거나 같아야 합니다")]
    EndBeforeStart { start: u64, end: u64 },
}

/// fmerge 실행을 중단시키는 에러 타입
#[derive(Error, Debug)]
pub enum MergeError {
    /// 대상 폴더가 존재하지 않거나 폴더가 아님
    #[error("폴더가 존재하지 않습니다: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// 현재 작업 폴더 확인 실패
    #[error("현재 작업 폴더를 확인할 수 없습니다: {reason}")]
    CurrentDirectory { reason: String },

    /// 잘못된 구간 지정
    #[error("잘못된 구간 지정: {0}")]
    InvalidPortion(#[from] FractionError),

    /// 병합할 파일 없음
    #[error("병합할 수 있는 파일이 없습니다")]
    EmptyEligibleSet,

    /// 구간 시작이 파일 수를 넘어섬
    #[error("구간 시작 위치({start_index})가 대상 파일 수({total})를 넘어섭니다. 병합할 파일이 없습니다")]
    PortionOutOfRange { start_index: usize, total: usize },

    /// 구간 선택 결과가 비어 있음
    #[error("구간 선택 결과 파일이 0개입니다. 병합할 파일이 없습니다")]
    EmptySelection,

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 출력 파일 쓰기 실패
    #[error("출력 파일 쓰기 실패 ({path}): {reason}")]
    OutputWrite { path: PathBuf, reason: String },
}

/// fmerge 결과 타입 별칭
pub type Result<T> = std::result::Result<T, MergeError>;
