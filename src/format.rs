/// 금액을 아르헨티나 페소 표기(`$ 504.000,00`)로 만든다.
///
/// 천 단위는 `.`, 소수점은 `,`를 쓰고 소수 둘째 자리까지 반올림한다.
/// 유한하지 않은 값은 0으로 표시한다.
pub fn format_ars(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let frac = (cents - whole * 100.0) as u64;
    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}$ {},{frac:02}", group_thousands(whole as u64))
}

/// 이자율을 소수 첫째 자리까지 표시한다. `decimal_comma`면 `7,6`처럼 쉼표를 쓴다.
pub fn format_percent(percent: f64, decimal_comma: bool) -> String {
    let s = format!("{percent:.1}");
    if decimal_comma {
        s.replace('.', ",")
    } else {
        s
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
