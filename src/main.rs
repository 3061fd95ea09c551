//! fmerge - FOLDER TO TEXT MERGER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use fmerge::{
    cli::Args,
    config::MergeConfig,
    ensure_eligible,
    merger::Merger,
    portion::{select, Selection},
    scanner::{ScanOutcome, Scanner, SkipReason, SkippedFile},
    stats::Statistics,
    MergeReport,
};

fn main() -> Result<()> {
    let args = Args::parse();

    // 구간 지정은 탐색 전에 검증
    let config = args.to_config()?;

    print_header(&args, &config);

    let mut stats = Statistics::new();

    let scanner = Scanner::new(&config)?;
    let scan = scanner.scan();
    stats.record_scan(&scan);
    print_skipped(&scan.skipped, args.verbose);

    if let Err(e) = ensure_eligible(&scan) {
        write_skip_log_if_requested(&args, &scan.skipped)?;
        anyhow::bail!(e);
    }

    println!(
        "  {} 병합 대상 파일 수: {}",
        "📋".bright_white(),
        scan.files.len().to_string().bright_green()
    );

    let ScanOutcome {
        search_dir,
        files,
        skipped: scan_skipped,
    } = scan;

    let selection = select(files, config.portion.as_ref())?;
    stats.record_selection(&selection);
    print_selection(&selection);

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&selection);
        return Ok(());
    }

    run_merge(&args, &config, search_dir, scan_skipped, selection, stats)
}

/// 병합 실행 및 결과 출력
fn run_merge(
    args: &Args,
    config: &MergeConfig,
    search_dir: PathBuf,
    scan_skipped: Vec<SkippedFile>,
    selection: Selection,
    mut stats: Statistics,
) -> Result<()> {
    println!("\n{}", "💾 병합 파일 저장 중...".bright_cyan());

    let pb = create_progress_bar(selection.len());
    let merger = Merger::new(config, &search_dir);
    let outcome = merger.merge_with_progress(&selection, |file| {
        pb.inc(1);
        if args.verbose {
            pb.println(format!("  {} {}", "✓".green(), file.relative_path));
        }
    })?;
    pb.finish_with_message("완료!");

    stats.record_merge(&outcome);
    print_skipped(&outcome.skipped, args.verbose);

    let report = MergeReport::new(search_dir, scan_skipped, &selection, outcome);

    if let Some(ref log_path) = args.log {
        write_skip_log(log_path, &report.skipped)?;
    }
    if let Some(ref report_path) = args.report {
        write_report(report_path, &report)?;
    }

    stats.print_summary();

    println!(
        "\n{} 병합 완료: {}\n",
        "✅".bright_green(),
        report.output_path.display()
    );

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, config: &MergeConfig) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 FOLDER TO TEXT MERGER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 대상 폴더: {:?}", "📂".bright_cyan(), args.target);

    if !args.dry_run {
        println!("  {} 출력 파일: {}", "📄".bright_green(), config.output_filename);
    }

    if let Some(ref exts) = config.allowed_extensions {
        let list: Vec<&str> = exts.iter().map(String::as_str).collect();
        println!("  {} 허용 확장자: {}", "🔍".bright_magenta(), list.join(", "));
    }

    println!(
        "  {} 최대 크기: {} 바이트",
        "📏".bright_white(),
        config.max_size_bytes
    );

    if let Some(ref portion) = config.portion {
        println!("  {} 구간: {}", "✂️".bright_cyan(), portion);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 병합 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 구간 선택 결과 출력
fn print_selection(selection: &Selection) {
    match selection.portion {
        Some(ref portion) => println!(
            "  {} 구간 {}: 대상 {}개 중 {}개 병합 ({}-{})",
            "ℹ️".bright_blue(),
            portion,
            selection.total_eligible,
            selection.len().to_string().bright_green(),
            selection.start_label,
            selection.end_label
        ),
        None => println!(
            "  {} 대상 파일 {}개 전체 병합",
            "ℹ️".bright_blue(),
            selection.total_eligible.to_string().bright_green()
        ),
    }
}

/// 드라이런 출력
fn print_dry_run(selection: &Selection) {
    println!("\n{}", "📋 병합 예정 파일 목록:".bright_cyan());
    for (i, file) in selection.files.iter().enumerate() {
        println!("  {}. {}", selection.start_label + i, file.relative_path);
    }
    println!(
        "\n{} 총 {} 개의 파일이 병합될 예정입니다.",
        "ℹ️".bright_blue(),
        selection.len().to_string().bright_green()
    );
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    pb.set_style(style);
    pb
}

/// 건너뛴 파일 출력
fn print_skipped(skipped: &[SkippedFile], verbose: bool) {
    for entry in skipped {
        let icon = match entry.reason {
            SkipReason::GeneratedOutput => {
                if !verbose {
                    continue;
                }
                "🚫".normal()
            }
            SkipReason::Inaccessible { .. } | SkipReason::ReadFailed { .. } => "⚠️".bright_red(),
            _ => "⏭️".bright_yellow(),
        };
        println!(
            "  {} 건너뜀 {}: {}",
            icon,
            entry.path.display(),
            entry.reason.to_string().dimmed()
        );
    }
}

/// `--log`가 지정된 경우에만 로그 작성
fn write_skip_log_if_requested(args: &Args, skipped: &[SkippedFile]) -> Result<()> {
    match args.log {
        Some(ref log_path) => write_skip_log(log_path, skipped),
        None => Ok(()),
    }
}

/// 건너뛴 파일 로그 작성
fn write_skip_log(log_path: &Path, skipped: &[SkippedFile]) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("로그 파일을 만들 수 없습니다: {:?}", log_path))?;

    writeln!(log_file, "fmerge 건너뛴 파일 로그")?;
    writeln!(log_file, "생성 시간: {}", unix_now())?;
    writeln!(log_file, "건너뛴 파일 수: {}", skipped.len())?;
    writeln!(log_file, "{}", "=".repeat(50))?;

    for entry in skipped {
        writeln!(log_file, "\n파일: {}", entry.path.display())?;
        writeln!(log_file, "이유: {}", entry.reason)?;
    }

    println!("\n{} 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// JSON 리포트 작성
fn write_report(report_path: &Path, report: &MergeReport) -> Result<()> {
    let file = File::create(report_path)
        .with_context(|| format!("리포트 파일을 만들 수 없습니다: {:?}", report_path))?;
    serde_json::to_writer_pretty(file, report).context("리포트 직렬화 실패")?;

    println!("{} 리포트 저장: {:?}", "📝".bright_cyan(), report_path);

    Ok(())
}

/// 현재 시간 문자열 반환
fn unix_now() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("Unix timestamp: {}", duration.as_secs())
}
