//! 병합 설정 모듈
//!
//! 실행 한 번에 필요한 모든 입력값을 담는 [`MergeConfig`]를 정의합니다.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::Result;
use crate::fraction::{parse_portion_spec, PortionSpec};

/// 기본 출력 파일 이름
pub const DEFAULT_OUTPUT_FILENAME: &str = "merged_output.txt";

/// 기본 최대 파일 크기 (바이트)
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 1_000_000;

/// 메모리 매핑을 사용할 파일 크기 임계값
pub const DEFAULT_MMAP_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// 병합 설정
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// 대상 폴더 (현재 작업 폴더 기준)
    pub target_directory: PathBuf,
    /// 출력 파일 이름
    pub output_filename: String,
    /// 허용 확장자 (소문자, '.' 포함). None이면 전체 허용
    pub allowed_extensions: Option<BTreeSet<String>>,
    /// 최대 파일 크기
    pub max_size_bytes: u64,
    /// 구간 지정
    pub portion: Option<PortionSpec>,
    /// 이 크기 이상이면 메모리 매핑으로 읽음
    pub mmap_threshold: u64,
}

impl MergeConfig {
    /// 기본 설정 생성
    pub fn new(target_directory: impl Into<PathBuf>) -> Self {
        Self {
            target_directory: target_directory.into(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            allowed_extensions: None,
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            portion: None,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }

    /// 출력 파일 이름 설정
    pub fn with_output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = name.into();
        self
    }

    /// 허용 확장자 설정
    ///
    /// `"py"`, `".PY"` 모두 `".py"`로 정규화됩니다. 빈 목록이면 필터를 사용하지 않습니다.
    pub fn with_extensions<I, S>(mut self, extensions: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .map(|exts| {
                exts.into_iter()
                    .filter_map(|e| normalize_extension(e.as_ref()))
                    .collect::<BTreeSet<_>>()
            })
            .filter(|set| !set.is_empty());
        self
    }

    /// 최대 파일 크기 설정
    pub fn with_max_size_bytes(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    /// 검증된 구간 지정 설정
    pub fn with_portion(mut self, portion: Option<PortionSpec>) -> Self {
        self.portion = portion;
        self
    }

    /// 구간 지정 문자열을 파싱하여 설정
    pub fn with_portion_str(mut self, spec: Option<&str>) -> Result<Self> {
        self.portion = match spec {
            Some(s) if !s.is_empty() => Some(parse_portion_spec(s)?),
            _ => None,
        };
        Ok(self)
    }

    /// 출력 파일 이름을 (기본 이름, 확장자)로 분리
    ///
    /// # Examples
    /// ```
    /// use fmerge::config::MergeConfig;
    ///
    /// let config = MergeConfig::new(".").with_output_filename("merged_output.txt");
    /// assert_eq!(config.split_output_name(), ("merged_output", ".txt"));
    /// ```
    pub fn split_output_name(&self) -> (&str, &str) {
        split_extension(&self.output_filename)
    }

    /// 선택 범위 접미사를 붙인 최종 출력 파일 이름
    pub fn output_name_with_suffix(&self, suffix: &str) -> String {
        match self.split_output_name() {
            ("", _) => format!("{}{}", self.output_filename, suffix),
            (base, ext) => format!("{}{}{}", base, suffix, ext),
        }
    }
}

/// 확장자 하나를 소문자 + '.' 접두 형식으로 정규화
fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{}", lower))
    }
}

/// 마지막 경로 요소의 마지막 '.'을 기준으로 분리 (앞쪽 '.'은 확장자가 아님)
fn split_extension(name: &str) -> (&str, &str) {
    let component_start = name.rfind(|c: char| c == '/' || c == '\\').map(|i| i + 1).unwrap_or(0);
    let component = &name[component_start..];
    let leading_dots = component.len() - component.trim_start_matches('.').len();

    match component.rfind('.') {
        Some(dot) if dot >= leading_dots => {
            let split = component_start + dot;
            (&name[..split], &name[split..])
        }
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FractionError, MergeError};

    #[test]
    fn test_defaults() {
        let config = MergeConfig::new("src");
        assert_eq!(config.output_filename, "merged_output.txt");
        assert_eq!(config.max_size_bytes, 1_000_000);
        assert!(config.allowed_extensions.is_none());
        assert!(config.portion.is_none());
    }

    #[test]
    fn test_extension_normalization() {
        let config = MergeConfig::new(".").with_extensions(Some(vec!["py", ".TXT", " ", "Rs"]));
        let exts: Vec<_> = config.allowed_extensions.unwrap().into_iter().collect();
        assert_eq!(exts, vec![".py", ".rs", ".txt"]);
    }

    #[test]
    fn test_empty_extension_list_disables_filter() {
        let config = MergeConfig::new(".").with_extensions(Some(Vec::<String>::new()));
        assert!(config.allowed_extensions.is_none());
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("merged_output.txt"), ("merged_output", ".txt"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("output"), ("output", ""));
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension("..out.md"), ("..out", ".md"));
        assert_eq!(split_extension("dir.d/out"), ("dir.d/out", ""));
    }

    #[test]
    fn test_output_name_with_suffix() {
        let config = MergeConfig::new(".");
        assert_eq!(config.output_name_with_suffix("_1-4"), "merged_output_1-4.txt");

        let bare = MergeConfig::new(".").with_output_filename("bundle");
        assert_eq!(bare.output_name_with_suffix("_2-3"), "bundle_2-3");
    }

    #[test]
    fn test_with_portion_str() {
        let config = MergeConfig::new(".").with_portion_str(Some("1/2")).unwrap();
        assert_eq!(config.portion.unwrap().end_segment, Some(1));

        let none = MergeConfig::new(".").with_portion_str(Some("")).unwrap();
        assert!(none.portion.is_none());

        assert!(matches!(
            MergeConfig::new(".").with_portion_str(Some("  ")),
            Err(MergeError::InvalidPortion(FractionError::MissingSlash { .. }))
        ));

        assert!(MergeConfig::new(".").with_portion_str(Some("0/3")).is_err());
    }
}
