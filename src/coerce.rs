//! 사용자가 입력한 자유 형식 문자열을 숫자로 강제 변환한다.
//!
//! 변환은 절대 실패하지 않는다. 숫자로 해석할 수 없는 입력은 0으로 취급한다.

/// 문자열 앞부분의 10진 실수 접두어를 읽어 `f64`로 변환한다.
///
/// 앞쪽 공백은 무시하고, 가장 긴 유효 접두어만 사용한다(`"250000abc"` → 250000).
/// 빈 문자열, 숫자로 시작하지 않는 문자열, 무한대/NaN 결과는 모두 0이 된다.
pub fn coerce_f64(raw: &str) -> f64 {
    match float_prefix(raw).and_then(|s| s.parse::<f64>().ok()) {
        // -0도 0으로 정규화
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// 문자열 앞부분의 10진 정수 접두어를 읽어 `i64`로 변환한다.
///
/// 부호 하나와 숫자열만 읽는다(`"24.9"` → 24, `" 36 meses"` → 36).
/// 숫자가 없으면 0, 범위를 벗어나면 `i64` 경계값으로 포화한다.
pub fn coerce_i64(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}

/// `[+-]digits[.digits][(e|E)[+-]digits]` 형태의 가장 긴 접두어를 돌려준다.
fn float_prefix(raw: &str) -> Option<&str> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let scan_digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = scan_digits(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = scan_digits(end + 1);
        if frac_end > end + 1 {
            digit_count += frac_end - end - 1;
            end = frac_end;
        }
    }
    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = scan_digits(exp);
        // 지수부에 숫자가 없으면 'e' 앞까지만 사용
        if exp_end > exp {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_takes_longest_numeric_prefix() {
        assert_eq!(coerce_f64("250000"), 250000.0);
        assert_eq!(coerce_f64("  250000abc"), 250000.0);
        assert_eq!(coerce_f64("12.5.3"), 12.5);
        assert_eq!(coerce_f64("1e3"), 1000.0);
        assert_eq!(coerce_f64("2e"), 2.0);
        assert_eq!(coerce_f64(".5"), 0.5);
        assert_eq!(coerce_f64("-7"), -7.0);
        assert_eq!(coerce_f64("12."), 12.0);
    }

    #[test]
    fn float_degrades_to_zero() {
        assert_eq!(coerce_f64(""), 0.0);
        assert_eq!(coerce_f64("   "), 0.0);
        assert_eq!(coerce_f64("abc"), 0.0);
        assert_eq!(coerce_f64("$250000"), 0.0);
        assert_eq!(coerce_f64("."), 0.0);
        assert_eq!(coerce_f64("-"), 0.0);
        assert_eq!(coerce_f64("inf"), 0.0);
        assert_eq!(coerce_f64("NaN"), 0.0);
        assert_eq!(coerce_f64("1e400"), 0.0);
        assert!(coerce_f64("-0").is_sign_positive());
    }

    #[test]
    fn integer_stops_at_first_non_digit() {
        assert_eq!(coerce_i64("24"), 24);
        assert_eq!(coerce_i64("24.9"), 24);
        assert_eq!(coerce_i64(" 36 meses"), 36);
        assert_eq!(coerce_i64("-12"), -12);
        assert_eq!(coerce_i64("+6"), 6);
        assert_eq!(coerce_i64("0x1A"), 0);
        assert_eq!(coerce_i64("1e3"), 1);
    }

    #[test]
    fn integer_degrades_to_zero_or_saturates() {
        assert_eq!(coerce_i64(""), 0);
        assert_eq!(coerce_i64("meses"), 0);
        assert_eq!(coerce_i64("-"), 0);
        assert_eq!(coerce_i64("99999999999999999999999"), i64::MAX);
        assert_eq!(coerce_i64("-99999999999999999999999"), i64::MIN);
    }
}
