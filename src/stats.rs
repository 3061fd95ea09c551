//! 통계 및 유틸리티 모듈
//!
//! 병합 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

use crate::merger::MergeOutcome;
use crate::portion::Selection;
use crate::scanner::ScanOutcome;

/// 병합 통계 구조체
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    /// 병합 대상 파일 수
    pub total_eligible: usize,
    /// 구간 선택된 파일 수
    pub selected: usize,
    /// 실제 포함된 파일 수
    pub included: usize,
    /// 탐색 단계에서 건너뛴 파일 수
    pub skipped_on_scan: usize,
    /// 읽기 단계에서 건너뛴 파일 수
    pub skipped_on_read: usize,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 탐색 결과 반영
    pub fn record_scan(&mut self, scan: &ScanOutcome) {
        self.total_eligible = scan.files.len();
        self.skipped_on_scan = scan.skipped.len();
    }

    /// 구간 선택 결과 반영
    pub fn record_selection(&mut self, selection: &Selection) {
        self.selected = selection.len();
    }

    /// 병합 결과 반영
    pub fn record_merge(&mut self, merge: &MergeOutcome) {
        self.included = merge.included.len();
        self.skipped_on_read = merge.skipped.len();
        self.bytes_read = merge.bytes_read;
        self.bytes_written = merge.bytes_written;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 병합 통계 요약 출력
    pub fn print_summary(&self) {
        let skipped = self.skipped_on_scan + self.skipped_on_read;

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 병합 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 대상 파일:    {}",
            "📁".bright_cyan(),
            self.total_eligible
        );
        println!("  {} 선택 파일:    {}", "🎯".bright_cyan(), self.selected);
        println!(
            "  {} 포함:         {}",
            "✅".bright_green(),
            self.included.to_string().green()
        );

        if skipped > 0 {
            println!(
                "  {} 건너뜀:       {}",
                "⏭️".bright_yellow(),
                skipped.to_string().yellow()
            );
        } else {
            println!("  {} 건너뜀:       {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use fmerge::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
