//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 [`MergeConfig`] 변환을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{MergeConfig, DEFAULT_MAX_SIZE_BYTES, DEFAULT_OUTPUT_FILENAME};
use crate::error::Result;

/// fmerge CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "fmerge",
    author = "YourName <your@email.com>",
    version,
    about = "FOLDER TO TEXT MERGER - 폴더 내 텍스트 파일들을 하나의 파일로 병합하는 CLI 도구",
    long_about = r#"
FOLDER TO TEXT MERGER
=====================

지정된 폴더 내의 텍스트 파일을 이름 순으로 탐색하여
하나의 텍스트 파일로 병합합니다.

특징:
  • 결정적인 파일 순서 (상대 경로 순)
  • 확장자/크기 필터
  • 구간 병합 (전체 파일을 N등분하여 일부만 병합)
  • 이전 병합 결과 파일 자동 제외

구간 지정:
  1/2       처음 1/2
  3/5:4/5   세 번째부터 네 번째 1/5 구간
  3/5:      세 번째 1/5 구간부터 끝까지

예제:
  fmerge ./src
  fmerge ./src -e py,txt -o bundle.txt
  fmerge ./src -p 3/5:4/5 --dry-run
  fmerge ./src -m 200000 --log skipped.log --report report.json
"#
)]
pub struct Args {
    /// 병합할 폴더 경로 (현재 폴더 기준)
    pub target: PathBuf,

    /// 허용할 확장자 (쉼표로 구분, 예: "py,txt")
    #[arg(short, long)]
    pub extensions: Option<String>,

    /// 병합할 구간 (예: "1/2", "3/5:4/5", "3/5:")
    #[arg(short, long)]
    pub portion: Option<String>,

    /// 출력 파일 이름 (대상 폴더 안에 생성)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILENAME)]
    pub output: String,

    /// 포함할 최대 파일 크기 (바이트)
    #[arg(short, long, default_value_t = DEFAULT_MAX_SIZE_BYTES)]
    pub max_size: u64,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 병합 없이 선택될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 건너뛴 파일 로그 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// JSON 리포트 경로
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    /// 확장자 목록을 파싱하여 벡터로 반환
    pub fn get_extensions(&self) -> Option<Vec<String>> {
        self.extensions
            .as_ref()
            .map(|e| {
                e.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|exts| !exts.is_empty())
    }

    /// 병합 설정 생성 (구간 지정 파싱 포함)
    pub fn to_config(&self) -> Result<MergeConfig> {
        MergeConfig::new(&self.target)
            .with_output_filename(self.output.clone())
            .with_extensions(self.get_extensions())
            .with_max_size_bytes(self.max_size)
            .with_portion_str(self.portion.as_deref())
    }
}
