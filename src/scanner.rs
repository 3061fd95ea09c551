//! 폴더 탐색 모듈
//!
//! 대상 폴더를 결정적인 순서로 탐색하고 제외/필터 규칙을 적용하여
//! 병합 대상 파일 목록을 만듭니다.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::pattern::{ExtensionFilter, OutputMatcher};

/// 병합 대상 파일
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleFile {
    /// 파일 이름
    pub display_name: String,
    /// 탐색 루트 기준 상대 경로
    pub relative_path: String,
    /// 절대 경로
    pub absolute_path: PathBuf,
}

/// 파일을 건너뛴 이유
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// 이전 실행의 출력 파일
    GeneratedOutput,
    /// 허용되지 않은 확장자
    ExtensionNotAllowed { extension: String },
    /// 최대 크기 초과
    TooLarge { size: u64, limit: u64 },
    /// 메타데이터 확인 실패
    Inaccessible { reason: String },
    /// UTF-8 텍스트가 아님
    NotText,
    /// 읽기 실패
    ReadFailed { reason: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::GeneratedOutput => write!(f, "이전 병합 결과 파일"),
            SkipReason::ExtensionNotAllowed { extension } => {
                write!(f, "허용되지 않은 확장자 '{}'", extension)
            }
            SkipReason::TooLarge { size, limit } => {
                write!(f, "크기 {} 바이트가 최대 {} 바이트를 초과", size, limit)
            }
            SkipReason::Inaccessible { reason } => write!(f, "접근할 수 없음: {}", reason),
            SkipReason::NotText => write!(f, "텍스트 파일이 아님"),
            SkipReason::ReadFailed { reason } => write!(f, "읽기 실패: {}", reason),
        }
    }
}

/// 건너뛴 파일 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub fn new(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// 탐색 결과
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// 탐색한 절대 경로
    pub search_dir: PathBuf,
    /// 상대 경로 순으로 정렬된 병합 대상
    pub files: Vec<EligibleFile>,
    /// 건너뛴 파일 (탐색 순서)
    pub skipped: Vec<SkippedFile>,
}

/// 폴더 탐색기
pub struct Scanner {
    search_dir: PathBuf,
    output_matcher: OutputMatcher,
    extension_filter: ExtensionFilter,
    max_size_bytes: u64,
}

impl Scanner {
    /// 설정으로부터 탐색기 생성
    ///
    /// 대상 폴더는 현재 작업 폴더 기준으로 해석되며, 폴더가 아니면
    /// `DirectoryNotFound`를 반환합니다.
    pub fn new(config: &MergeConfig) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| MergeError::CurrentDirectory {
            reason: e.to_string(),
        })?;
        let search_dir = cwd.join(&config.target_directory);

        if !search_dir.is_dir() {
            return Err(MergeError::DirectoryNotFound { path: search_dir });
        }

        let (base, ext) = config.split_output_name();
        let output_matcher = OutputMatcher::new(&config.output_filename, base, ext)?;

        Ok(Self {
            search_dir,
            output_matcher,
            extension_filter: ExtensionFilter::new(config.allowed_extensions.clone()),
            max_size_bytes: config.max_size_bytes,
        })
    }

    /// 탐색 루트 (절대 경로)
    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    /// 폴더를 탐색하여 병합 대상 목록 생성
    pub fn scan(&self) -> ScanOutcome {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        // 각 단계에서 파일 먼저, 그 다음 하위 폴더를 이름 순으로 방문
        let walker = WalkDir::new(&self.search_dir)
            .min_depth(1)
            .sort_by(compare_entries);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(&self.search_dir).to_path_buf();
                    skipped.push(SkippedFile::new(
                        path,
                        SkipReason::Inaccessible {
                            reason: e.to_string(),
                        },
                    ));
                    continue;
                }
            };

            let path = entry.path();
            let file_type = entry.file_type();
            // 심볼릭 링크는 대상이 폴더일 때만 제외 (깨진 링크는 check_file에서 보고)
            if file_type.is_dir() || (file_type.is_symlink() && path.is_dir()) {
                continue;
            }
            if !file_type.is_file() && !file_type.is_symlink() {
                continue;
            }

            match self.check_file(path) {
                Ok(file) => files.push(file),
                Err(reason) => skipped.push(SkippedFile::new(path, reason)),
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        ScanOutcome {
            search_dir: self.search_dir.clone(),
            files,
            skipped,
        }
    }

    /// 파일 하나에 제외/확장자/크기 규칙 적용
    fn check_file(&self, path: &Path) -> std::result::Result<EligibleFile, SkipReason> {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.output_matcher.matches(&display_name) {
            return Err(SkipReason::GeneratedOutput);
        }

        let extension = ExtensionFilter::extension_of(path);
        if !self.extension_filter.allows(&extension) {
            return Err(SkipReason::ExtensionNotAllowed { extension });
        }

        let size = std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| SkipReason::Inaccessible {
                reason: e.to_string(),
            })?;

        if size > self.max_size_bytes {
            return Err(SkipReason::TooLarge {
                size,
                limit: self.max_size_bytes,
            });
        }

        let relative_path = path
            .strip_prefix(&self.search_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        Ok(EligibleFile {
            display_name,
            relative_path,
            absolute_path: path.to_path_buf(),
        })
    }
}

/// 파일을 폴더보다 앞에, 같은 종류끼리는 이름 순으로 정렬
fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}
