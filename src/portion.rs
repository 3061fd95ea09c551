//! 구간 선택 모듈
//!
//! 정렬된 병합 대상 목록에서 구간 지정에 해당하는 연속 구간을 계산합니다.
//! 시작은 내림, 끝은 올림으로 계산하므로 인접한 구간을 합치면 전체 목록을
//! 빠짐없이 덮습니다.

use crate::error::{FractionError, MergeError, Result};
use crate::fraction::PortionSpec;
use crate::scanner::EligibleFile;

/// 구간 선택 결과
#[derive(Debug, Clone)]
pub struct Selection {
    /// 선택된 파일 (원래 순서 유지)
    pub files: Vec<EligibleFile>,
    /// 1부터 시작하는 시작 번호 (포함)
    pub start_label: usize,
    /// 1부터 시작하는 끝 번호 (포함)
    pub end_label: usize,
    /// 전체 병합 대상 수
    pub total_eligible: usize,
    /// 적용된 구간 지정
    pub portion: Option<PortionSpec>,
}

impl Selection {
    /// 출력 파일 이름 접미사 (`_<시작>-<끝>`)
    pub fn range_suffix(&self) -> String {
        if self.files.is_empty() {
            String::new()
        } else {
            format!("_{}-{}", self.start_label, self.end_label)
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 구간의 0 기반 인덱스 범위 `[start, end)` 계산
///
/// # Arguments
/// * `total` - 전체 파일 수
/// * `portion` - 구간 지정
///
/// # Returns
/// 시작 인덱스(포함)와 끝 인덱스(제외). 끝은 `[start, total]`로 잘립니다.
///
/// # Examples
/// ```
/// use fmerge::fraction::PortionSpec;
/// use fmerge::portion::slice_bounds;
///
/// let spec: PortionSpec = "3/5:4/5".parse().unwrap();
/// assert_eq!(slice_bounds(10, &spec), (4, 8));
/// ```
pub fn slice_bounds(total: usize, portion: &PortionSpec) -> (usize, usize) {
    let t = total as u128;
    let d = portion.denominator as u128;

    let start = ((portion.start_segment as u128).saturating_sub(1) * t) / d;
    let end = match portion.end_segment {
        None => t,
        Some(e) => (e as u128 * t).div_ceil(d),
    };

    let end = end.min(t).max(start);
    (start as usize, end as usize)
}

/// 구간 지정에 따라 병합할 파일 선택
///
/// 구간 지정이 없으면 전체 목록을 `[1, T]`로 반환합니다.
pub fn select(eligible: Vec<EligibleFile>, portion: Option<&PortionSpec>) -> Result<Selection> {
    let total = eligible.len();

    let Some(spec) = portion else {
        return Ok(Selection {
            files: eligible,
            start_label: 1,
            end_label: total,
            total_eligible: total,
            portion: None,
        });
    };

    // 필드가 공개되어 있으므로 0으로 나누기 전에 확인
    if spec.denominator == 0 {
        return Err(FractionError::NonPositiveDenominator { denominator: 0 }.into());
    }
    if spec.start_segment == 0 {
        return Err(FractionError::NonPositiveNumerator { numerator: 0 }.into());
    }

    let (start, end) = slice_bounds(total, spec);
    if start >= total {
        return Err(MergeError::PortionOutOfRange {
            start_index: start,
            total,
        });
    }

    let files: Vec<EligibleFile> = eligible.into_iter().skip(start).take(end - start).collect();
    if files.is_empty() {
        return Err(MergeError::EmptySelection);
    }

    Ok(Selection {
        files,
        start_label: start + 1,
        end_label: end,
        total_eligible: total,
        portion: Some(*spec),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::parse_portion_spec;

    fn files(n: usize) -> Vec<EligibleFile> {
        (0..n)
            .map(|i| EligibleFile {
                display_name: format!("f{:03}.txt", i),
                relative_path: format!("f{:03}.txt", i),
                absolute_path: format!("/tmp/f{:03}.txt", i).into(),
            })
            .collect()
    }

    fn spec(s: &str) -> PortionSpec {
        parse_portion_spec(s).unwrap()
    }

    #[test]
    fn test_no_portion_selects_all() {
        let selection = select(files(7), None).unwrap();
        assert_eq!(selection.len(), 7);
        assert_eq!((selection.start_label, selection.end_label), (1, 7));
        assert_eq!(selection.range_suffix(), "_1-7");
    }

    #[test]
    fn test_middle_fifths_of_ten() {
        let selection = select(files(10), Some(&spec("3/5:4/5"))).unwrap();
        let names: Vec<_> = selection.files.iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(names, vec!["f004.txt", "f005.txt", "f006.txt", "f007.txt"]);
        assert_eq!((selection.start_label, selection.end_label), (5, 8));
        assert_eq!(selection.range_suffix(), "_5-8");
    }

    #[test]
    fn test_whole_portion_selects_everything() {
        for t in 1..=25 {
            let selection = select(files(t), Some(&spec("1/1"))).unwrap();
            assert_eq!(selection.len(), t);
            assert_eq!((selection.start_label, selection.end_label), (1, t));
        }
    }

    #[test]
    fn test_even_partition_has_no_gap_or_overlap() {
        for d in 1..=6usize {
            for multiple in 1..=4 {
                let t = d * multiple;
                let mut covered = Vec::new();
                for k in 1..=d {
                    let selection =
                        select(files(t), Some(&spec(&format!("{k}/{d}:{k}/{d}")))).unwrap();
                    assert_eq!(selection.len(), multiple);
                    covered.extend(selection.files);
                }
                assert_eq!(covered, files(t));
            }
        }
    }

    #[test]
    fn test_uneven_portions_cover_everything() {
        for t in 1..=20usize {
            for d in 1..=7u64 {
                let mut covered = std::collections::BTreeSet::new();
                for k in 1..=d {
                    let (start, end) = slice_bounds(t, &spec(&format!("{k}/{d}:{k}/{d}")));
                    covered.extend(start..end);
                }
                assert_eq!(covered.len(), t, "t={t} d={d}");
            }
        }
    }

    #[test]
    fn test_open_end_runs_to_last_file() {
        let selection = select(files(9), Some(&spec("2/3:"))).unwrap();
        assert_eq!((selection.start_label, selection.end_label), (4, 9));
    }

    #[test]
    fn test_bare_fraction_takes_leading_part() {
        let selection = select(files(9), Some(&spec("1/3"))).unwrap();
        assert_eq!((selection.start_label, selection.end_label), (1, 3));
    }

    #[test]
    fn test_start_at_total_is_out_of_range() {
        let unchecked = PortionSpec {
            start_segment: 4,
            denominator: 3,
            end_segment: None,
        };
        assert!(matches!(
            select(files(6), Some(&unchecked)),
            Err(MergeError::PortionOutOfRange {
                start_index: 6,
                total: 6
            })
        ));
    }

    #[test]
    fn test_zero_denominator_is_rejected() {
        let unchecked = PortionSpec {
            start_segment: 1,
            denominator: 0,
            end_segment: None,
        };
        assert!(matches!(
            select(files(3), Some(&unchecked)),
            Err(MergeError::InvalidPortion(
                FractionError::NonPositiveDenominator { denominator: 0 }
            ))
        ));
    }

    #[test]
    fn test_zero_start_segment_is_rejected() {
        let unchecked = PortionSpec {
            start_segment: 0,
            denominator: 2,
            end_segment: Some(1),
        };
        assert!(matches!(
            select(files(4), Some(&unchecked)),
            Err(MergeError::InvalidPortion(
                FractionError::NonPositiveNumerator { numerator: 0 }
            ))
        ));
    }

    #[test]
    fn test_empty_list_with_portion_is_out_of_range() {
        assert!(matches!(
            select(Vec::new(), Some(&spec("1/2"))),
            Err(MergeError::PortionOutOfRange { .. })
        ));
    }
}
