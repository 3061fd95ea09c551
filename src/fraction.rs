//! 분수 파싱 모듈
//!
//! `"N/D"`, `"N1/D:N2/D"`, `"N/D:"` 형식의 구간 지정 문자열을 검증된
//! [`PortionSpec`]으로 변환합니다.

use serde::Serialize;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use crate::error::FractionError;

/// 검증된 구간 지정
///
/// 전체 대상 파일을 `denominator`개의 같은 구간으로 나누었을 때
/// `start_segment`번째부터 `end_segment`번째까지(포함)를 의미합니다.
/// `end_segment`가 없으면 마지막 구간까지입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortionSpec {
    pub start_segment: u64,
    pub denominator: u64,
    pub end_segment: Option<u64>,
}

impl PortionSpec {
    /// 범위 규칙을 검증하여 구간 지정 생성
    pub fn new(
        start_segment: u64,
        denominator: u64,
        end_segment: Option<u64>,
    ) -> Result<Self, FractionError> {
        if start_segment > denominator {
            return Err(FractionError::StartExceedsDenominator {
                start: start_segment,
                denominator,
            });
        }

        if let Some(end) = end_segment {
            if end > denominator {
                return Err(FractionError::EndExceedsDenominator { end, denominator });
            }
            if end < start_segment {
                return Err(FractionError::EndBeforeStart {
                    start: start_segment,
                    end,
                });
            }
        }

        Ok(Self {
            start_segment,
            denominator,
            end_segment,
        })
    }

    /// 사람이 읽기 쉬운 구간 설명
    ///
    /// # Examples
    /// ```
    /// use fmerge::fraction::PortionSpec;
    ///
    /// let spec: PortionSpec = "3/5:4/5".parse().unwrap();
    /// assert_eq!(spec.label(), "3/5 through 4/5");
    /// ```
    pub fn label(&self) -> String {
        let d = self.denominator;
        match self.end_segment {
            None => format!("{}/{} through end", self.start_segment, d),
            Some(end) if self.start_segment == 1 => format!("first {}/{}", end, d),
            Some(end) if self.start_segment == end => format!("{}/{}", end, d),
            Some(end) => format!("{}/{} through {}/{}", self.start_segment, d, end, d),
        }
    }
}

impl fmt::Display for PortionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PortionSpec {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_portion_spec(s)
    }
}

/// 단일 분수 `"N/D"` 파싱
///
/// # Arguments
/// * `spec` - 분수 문자열
///
/// # Returns
/// `(분자, 분모)` 또는 위반한 규칙에 해당하는 에러
///
/// # Examples
/// ```
/// use fmerge::fraction::parse_fraction;
///
/// assert_eq!(parse_fraction("2/3").unwrap(), (2, 3));
/// assert!(parse_fraction("4/3").is_err());
/// ```
pub fn parse_fraction(spec: &str) -> Result<(u64, u64), FractionError> {
    let (numerator_str, denominator_str) =
        spec.split_once('/').ok_or_else(|| FractionError::MissingSlash {
            input: spec.to_string(),
        })?;

    let numerator_str = numerator_str.trim();
    let denominator_str = denominator_str.trim();
    if numerator_str.is_empty() || denominator_str.is_empty() {
        return Err(FractionError::MissingPart {
            input: spec.to_string(),
        });
    }

    let parse_part = |part: &str| -> Result<i64, FractionError> {
        part.parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                FractionError::IntegerOutOfRange {
                    input: spec.to_string(),
                }
            }
            _ => FractionError::NotInteger {
                input: spec.to_string(),
            },
        })
    };
    let numerator = parse_part(numerator_str)?;
    let denominator = parse_part(denominator_str)?;

    if denominator <= 0 {
        return Err(FractionError::NonPositiveDenominator { denominator });
    }
    if numerator <= 0 {
        return Err(FractionError::NonPositiveNumerator { numerator });
    }
    if numerator > denominator {
        return Err(FractionError::NumeratorExceedsDenominator {
            numerator,
            denominator,
        });
    }

    // 위 검사로 둘 다 양수임이 보장됨
    Ok((numerator as u64, denominator as u64))
}

/// 구간 지정 문자열 파싱
///
/// - `"N/D"`: 처음부터 N번째 구간까지
/// - `"S/D:E/D"`: S번째부터 E번째 구간까지
/// - `"S/D:"`: S번째 구간부터 끝까지
pub fn parse_portion_spec(spec: &str) -> Result<PortionSpec, FractionError> {
    let (start, denominator, end) = match spec.split_once(':') {
        Some((start_part, end_part)) => {
            let (start, denominator) = parse_fraction(start_part.trim())?;

            let end_part = end_part.trim();
            let end = if end_part.is_empty() {
                None
            } else {
                let (end, end_denominator) = parse_fraction(end_part)?;
                if end_denominator != denominator {
                    return Err(FractionError::DenominatorMismatch {
                        start: denominator,
                        end: end_denominator,
                    });
                }
                Some(end)
            };

            (start, denominator, end)
        }
        None => {
            let (end, denominator) = parse_fraction(spec.trim())?;
            (1, denominator, Some(end))
        }
    };

    PortionSpec::new(start, denominator, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fraction_valid() {
        assert_eq!(parse_fraction("1/2").unwrap(), (1, 2));
        assert_eq!(parse_fraction(" 3 / 5 ").unwrap(), (3, 5));
        assert_eq!(parse_fraction("7/7").unwrap(), (7, 7));
    }

    #[test]
    fn test_parse_fraction_syntax_errors() {
        assert!(matches!(
            parse_fraction("12"),
            Err(FractionError::MissingSlash { .. })
        ));
        assert!(matches!(
            parse_fraction("/2"),
            Err(FractionError::MissingPart { .. })
        ));
        assert!(matches!(
            parse_fraction("1/ "),
            Err(FractionError::MissingPart { .. })
        ));
        assert!(matches!(
            parse_fraction("a/2"),
            Err(FractionError::NotInteger { .. })
        ));
        assert!(matches!(
            parse_fraction("1/2/3"),
            Err(FractionError::NotInteger { .. })
        ));
    }

    #[test]
    fn test_parse_fraction_overflow() {
        assert!(matches!(
            parse_fraction("99999999999999999999/3"),
            Err(FractionError::IntegerOutOfRange { .. })
        ));
        assert!(matches!(
            parse_fraction("1/-99999999999999999999"),
            Err(FractionError::IntegerOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_fraction_range_errors() {
        assert_eq!(
            parse_fraction("1/0"),
            Err(FractionError::NonPositiveDenominator { denominator: 0 })
        );
        assert_eq!(
            parse_fraction("0/3"),
            Err(FractionError::NonPositiveNumerator { numerator: 0 })
        );
        assert_eq!(
            parse_fraction("-1/3"),
            Err(FractionError::NonPositiveNumerator { numerator: -1 })
        );
        assert_eq!(
            parse_fraction("4/3"),
            Err(FractionError::NumeratorExceedsDenominator {
                numerator: 4,
                denominator: 3
            })
        );
    }

    #[test]
    fn test_bare_fraction_starts_at_first_segment() {
        for d in 1..=8 {
            for s in 1..=d {
                let spec = parse_portion_spec(&format!("{}/{}", s, d)).unwrap();
                assert_eq!(spec.start_segment, 1);
                assert_eq!(spec.end_segment, Some(s));
                assert_eq!(spec.denominator, d);
            }
        }
    }

    #[test]
    fn test_parse_range_and_open_end() {
        let spec = parse_portion_spec("3/5:4/5").unwrap();
        assert_eq!(
            spec,
            PortionSpec {
                start_segment: 3,
                denominator: 5,
                end_segment: Some(4)
            }
        );

        let open = parse_portion_spec("3/5:").unwrap();
        assert_eq!(open.start_segment, 3);
        assert_eq!(open.end_segment, None);
    }

    #[test]
    fn test_parse_portion_errors() {
        assert_eq!(
            parse_portion_spec("1/2:1/3"),
            Err(FractionError::DenominatorMismatch { start: 2, end: 3 })
        );
        assert_eq!(
            parse_portion_spec("3/5:2/5"),
            Err(FractionError::EndBeforeStart { start: 3, end: 2 })
        );
        assert!(matches!(
            parse_portion_spec(":1/2"),
            Err(FractionError::MissingSlash { .. })
        ));
    }

    #[test]
    fn test_new_rejects_out_of_range_segments() {
        assert_eq!(
            PortionSpec::new(4, 3, None),
            Err(FractionError::StartExceedsDenominator {
                start: 4,
                denominator: 3
            })
        );
        assert_eq!(
            PortionSpec::new(1, 3, Some(5)),
            Err(FractionError::EndExceedsDenominator {
                end: 5,
                denominator: 3
            })
        );
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let errors = [
            parse_portion_spec("0/3").unwrap_err(),
            parse_portion_spec("4/3").unwrap_err(),
            parse_portion_spec("1/2:1/3").unwrap_err(),
            parse_portion_spec("2/3:1/3").unwrap_err(),
            parse_portion_spec("1/0").unwrap_err(),
        ];
        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_label() {
        assert_eq!(parse_portion_spec("2/3").unwrap().label(), "first 2/3");
        assert_eq!(parse_portion_spec("2/3:2/3").unwrap().label(), "2/3");
        assert_eq!(parse_portion_spec("2/3:").unwrap().label(), "2/3 through end");
        assert_eq!(
            parse_portion_spec("2/5:4/5").unwrap().to_string(),
            "2/5 through 4/5"
        );
    }
}
