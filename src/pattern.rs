//! 패턴 매칭 모듈
//!
//! 이전 실행이 만든 출력 파일을 걸러내는 글로브 매처와 확장자 필터를 담당합니다.

use glob::Pattern;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{MergeError, Result};

/// 출력 파일 자기 제외 매처
///
/// 출력 파일 이름과 정확히 같은 파일, 또는 `<기본이름>_*<확장자>` 형태의
/// 이전 구간 출력 파일을 찾아냅니다. 파일 이름만 보고 판단하므로
/// 우연히 같은 형태의 파일도 제외될 수 있습니다.
#[derive(Debug)]
pub struct OutputMatcher {
    output_filename: String,
    generated: Option<Pattern>,
}

impl OutputMatcher {
    /// 새 출력 파일 매처 생성
    ///
    /// # Arguments
    /// * `output_filename` - 설정된 출력 파일 이름
    /// * `base` - 확장자를 뺀 출력 파일 이름 (비어 있으면 정확한 이름만 비교)
    /// * `ext` - '.'을 포함한 확장자 (없으면 빈 문자열)
    ///
    /// # Examples
    /// ```
    /// use fmerge::pattern::OutputMatcher;
    ///
    /// let matcher = OutputMatcher::new("merged_output.txt", "merged_output", ".txt").unwrap();
    /// assert!(matcher.matches("merged_output.txt"));
    /// assert!(matcher.matches("merged_output_1-10.txt"));
    /// assert!(!matcher.matches("merged.txt"));
    /// ```
    pub fn new(output_filename: &str, base: &str, ext: &str) -> Result<Self> {
        let generated = if base.is_empty() {
            None
        } else {
            let raw = format!("{}_*{}", Pattern::escape(base), Pattern::escape(ext));
            Some(Pattern::new(&raw).map_err(|_| MergeError::InvalidPattern { pattern: raw.clone() })?)
        };

        Ok(Self {
            output_filename: output_filename.to_string(),
            generated,
        })
    }

    /// 파일 이름이 출력 파일(또는 이전 구간 출력)인지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        if file_name == self.output_filename {
            return true;
        }
        match &self.generated {
            Some(p) => p.matches(file_name),
            None => false,
        }
    }
}

/// 확장자 허용 목록 필터
#[derive(Debug, Default)]
pub struct ExtensionFilter {
    allowed: Option<BTreeSet<String>>,
}

impl ExtensionFilter {
    /// 새 확장자 필터 생성 (None이면 모든 파일 허용)
    pub fn new(allowed: Option<BTreeSet<String>>) -> Self {
        Self { allowed }
    }

    /// 파일 경로의 소문자 확장자 ('.' 포함, 없으면 빈 문자열)
    pub fn extension_of(path: &Path) -> String {
        path.extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// 확장자가 허용되는지 확인
    pub fn allows(&self, extension: &str) -> bool {
        match &self.allowed {
            Some(set) => set.contains(extension),
            None => true,
        }
    }
}
