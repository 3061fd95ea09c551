//! 파일 병합 모듈
//!
//! 선택된 파일들을 읽어 구분자 블록과 함께 하나의 텍스트 파일로 씁니다.
//! 개별 파일을 읽지 못하면 그 파일만 건너뛰고 계속 진행합니다.

use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::portion::Selection;
use crate::scanner::{EligibleFile, SkipReason, SkippedFile};

const FILE_HEADER_PREFIX: &str = "=== File: ";
const FILE_HEADER_SUFFIX: &str = " ===";
const PATH_PREFIX: &str = "Path: ";
const CONTENT_START: &str = "---- File Content Start ----";
const CONTENT_END: &str = "---- File Content End ----";

/// 병합 결과
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// 생성된 출력 파일 절대 경로
    pub output_path: PathBuf,
    /// 실제로 포함된 파일
    pub included: Vec<EligibleFile>,
    /// 읽기 단계에서 건너뛴 파일
    pub skipped: Vec<SkippedFile>,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
}

/// 파일 병합기
pub struct Merger<'a> {
    config: &'a MergeConfig,
    search_dir: PathBuf,
}

impl<'a> Merger<'a> {
    /// 새 병합기 생성
    ///
    /// # Arguments
    /// * `config` - 병합 설정
    /// * `search_dir` - 탐색 루트 절대 경로 (출력 파일이 여기에 생성됨)
    pub fn new(config: &'a MergeConfig, search_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            search_dir: search_dir.into(),
        }
    }

    /// 선택 결과에 대한 출력 파일 경로
    pub fn output_path(&self, selection: &Selection) -> PathBuf {
        let name = self.config.output_name_with_suffix(&selection.range_suffix());
        self.search_dir.join(name)
    }

    /// 선택된 파일들을 병합
    pub fn merge(&self, selection: &Selection) -> Result<MergeOutcome> {
        self.merge_with_progress(selection, |_| {})
    }

    /// 파일 하나를 처리할 때마다 `on_file`을 호출하며 병합
    pub fn merge_with_progress<F>(&self, selection: &Selection, mut on_file: F) -> Result<MergeOutcome>
    where
        F: FnMut(&EligibleFile),
    {
        let output_path = self.output_path(selection);
        let write_error = |e: std::io::Error| MergeError::OutputWrite {
            path: output_path.clone(),
            reason: e.to_string(),
        };

        // 항상 새로 생성 (기존 파일은 덮어씀)
        let file = File::create(&output_path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        let mut outcome = MergeOutcome::default();

        for eligible in &selection.files {
            match read_text(&eligible.absolute_path, self.config.mmap_threshold) {
                Ok(content) => {
                    outcome.bytes_read += content.len() as u64;
                    outcome.bytes_written +=
                        write_block(&mut writer, eligible, &content).map_err(write_error)?;
                    outcome.included.push(eligible.clone());
                }
                Err(reason) => {
                    outcome
                        .skipped
                        .push(SkippedFile::new(&eligible.absolute_path, reason));
                }
            }
            on_file(eligible);
        }

        writer.flush().map_err(write_error)?;
        outcome.output_path = output_path;
        Ok(outcome)
    }
}

/// 파일 하나를 UTF-8 텍스트로 읽기
///
/// 크기가 `mmap_threshold` 이상이면 메모리 매핑을 사용합니다.
pub fn read_text(path: &Path, mmap_threshold: u64) -> std::result::Result<String, SkipReason> {
    let read_failed = |e: std::io::Error| SkipReason::ReadFailed {
        reason: e.to_string(),
    };

    let file = File::open(path).map_err(read_failed)?;
    let size = file.metadata().map(|m| m.len()).map_err(read_failed)?;

    if size > 0 && size >= mmap_threshold {
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| SkipReason::ReadFailed {
                reason: format!("메모리 매핑 실패: {}", e),
            })?
        };
        return std::str::from_utf8(&mmap)
            .map(str::to_owned)
            .map_err(|_| SkipReason::NotText);
    }

    let mut bytes = Vec::with_capacity(size as usize);
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(read_failed)?;
    String::from_utf8(bytes).map_err(|_| SkipReason::NotText)
}

/// 파일 블록 하나를 쓰고 쓴 바이트 수를 반환
pub fn write_block<W: Write>(
    writer: &mut W,
    file: &EligibleFile,
    content: &str,
) -> std::io::Result<u64> {
    let block = format!(
        "\n{}{}{}\n{}{}\n{}\n{}\n{}\n\n",
        FILE_HEADER_PREFIX,
        file.display_name,
        FILE_HEADER_SUFFIX,
        PATH_PREFIX,
        file.relative_path,
        CONTENT_START,
        content,
        CONTENT_END
    );
    writer.write_all(block.as_bytes())?;
    Ok(block.len() as u64)
}
