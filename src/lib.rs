//! fmerge - FOLDER TO TEXT MERGER
//!
//! 폴더 내의 텍스트 파일들을 하나의 텍스트 파일로 병합하는 CLI 도구입니다.
//! 전체 대상 파일 중 일부 구간(예: "가운데 1/3")만 잘라서 병합할 수 있습니다.
//!
//! # 주요 기능
//!
//! - 🔁 **결정적 순서**: 폴더마다 이름 순으로 탐색하고 상대 경로로 다시 정렬
//! - 🚫 **자기 제외**: 이전 실행의 출력 파일(`<이름>_*<확장자>`)은 병합 대상에서 제외
//! - 🔍 **필터링**: 확장자 허용 목록(대소문자 무시)과 최대 파일 크기
//! - ✂️ **구간 병합**: `1/2`, `3/5:4/5`, `3/5:` 형식의 구간 지정
//! - 🧪 **드라이런 모드**: 실제 병합 없이 선택될 파일 목록 미리 확인
//! - 📝 **리포트**: 건너뛴 파일 로그와 JSON 리포트 출력
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! fmerge ./src -e py,txt
//!
//! # 세 번째부터 네 번째 1/5 구간만 병합
//! fmerge ./src -p 3/5:4/5
//!
//! # 마지막 3/5 구간
//! fmerge ./src -p 3/5:
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fraction;
pub mod merger;
pub mod pattern;
pub mod portion;
pub mod scanner;
pub mod stats;

use serde::Serialize;
use std::path::PathBuf;

// Re-exports for convenient access
pub use cli::Args;
pub use config::MergeConfig;
pub use error::{FractionError, MergeError, Result};
pub use fraction::{parse_fraction, parse_portion_spec, PortionSpec};
pub use merger::{MergeOutcome, Merger};
pub use pattern::{ExtensionFilter, OutputMatcher};
pub use portion::{select, Selection};
pub use scanner::{EligibleFile, ScanOutcome, Scanner, SkipReason, SkippedFile};
pub use stats::{format_bytes, Statistics};

/// 병합 실행 한 번의 결과
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// 탐색한 폴더 절대 경로
    pub search_dir: PathBuf,
    /// 병합 대상 파일 수
    pub total_eligible: usize,
    /// 선택 범위 시작 번호 (1부터)
    pub start_label: usize,
    /// 선택 범위 끝 번호 (포함)
    pub end_label: usize,
    /// 구간 설명 (구간 지정이 없으면 None)
    pub portion: Option<String>,
    /// 출력 파일 절대 경로
    pub output_path: PathBuf,
    /// 포함된 파일의 상대 경로
    pub included: Vec<String>,
    /// 건너뛴 파일 (탐색 + 읽기)
    pub skipped: Vec<SkippedFile>,
    /// 쓴 총 바이트
    pub bytes_written: u64,
}

impl MergeReport {
    /// 단계별 결과로부터 리포트 생성
    pub fn new(
        search_dir: PathBuf,
        scan_skipped: Vec<SkippedFile>,
        selection: &Selection,
        merge: MergeOutcome,
    ) -> Self {
        let mut skipped = scan_skipped;
        skipped.extend(merge.skipped);

        Self {
            search_dir,
            total_eligible: selection.total_eligible,
            start_label: selection.start_label,
            end_label: selection.end_label,
            portion: selection.portion.map(|p| p.label()),
            output_path: merge.output_path,
            included: merge.included.into_iter().map(|f| f.relative_path).collect(),
            skipped,
            bytes_written: merge.bytes_written,
        }
    }
}

/// 탐색 결과가 비어 있으면 실행 중단
pub fn ensure_eligible(scan: &ScanOutcome) -> Result<()> {
    if scan.files.is_empty() {
        return Err(MergeError::EmptyEligibleSet);
    }
    Ok(())
}

/// 탐색 → 구간 선택 → 병합 전체 실행
///
/// 폴더/구간/선택 단계의 실패만 에러로 반환하며, 개별 파일 문제는
/// 리포트의 `skipped`에 기록됩니다.
pub fn merge_directory(config: &MergeConfig) -> Result<MergeReport> {
    let scan = Scanner::new(config)?.scan();
    ensure_eligible(&scan)?;

    let ScanOutcome {
        search_dir,
        files,
        skipped,
    } = scan;

    let selection = select(files, config.portion.as_ref())?;
    let merge = Merger::new(config, &search_dir).merge(&selection)?;

    Ok(MergeReport::new(search_dir, skipped, &selection, merge))
}
