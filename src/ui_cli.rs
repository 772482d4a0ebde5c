use std::fmt::Write as _;
use std::io::{self, Write};

use crate::app::AppError;
use crate::engine::{ContractInput, CostResult, MAX_DURATION_MONTHS, MIN_DURATION_MONTHS};
use crate::format::format_ars;
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Duration,
    Rent,
    Expenses,
    Exit,
}

impl MenuChoice {
    pub fn parse(sel: &str) -> Option<Self> {
        match sel.trim() {
            "1" => Some(MenuChoice::Duration),
            "2" => Some(MenuChoice::Rent),
            "3" => Some(MenuChoice::Expenses),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_DURATION));
    println!("{}", tr.t(keys::MAIN_MENU_RENT));
    println!("{}", tr.t(keys::MAIN_MENU_EXPENSES));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        // EOF
        if sel.is_empty() {
            return Ok(MenuChoice::Exit);
        }
        if let Some(choice) = MenuChoice::parse(&sel) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력 종료(EOF)는 빈 문자열이다.
pub fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 입력과 계산 결과를 화면용 텍스트로 만든다.
pub fn render_quote(tr: &Translator, input: &ContractInput, result: &CostResult) -> String {
    let mut out = String::new();
    let months = tr.months(input.duration_months);
    let _ = writeln!(out, "{}", tr.t(keys::CONTRACT_HEADING));
    let _ = writeln!(out, "  {}: {months}", tr.t(keys::DURATION_LABEL));
    if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&input.duration_months) {
        let _ = writeln!(out, "  ({})", tr.t(keys::DURATION_RANGE_HINT));
    }
    let _ = writeln!(out, "  {}: {}", tr.t(keys::RENT_LABEL), format_ars(input.rent));
    let _ = writeln!(
        out,
        "  {}: {}",
        tr.t(keys::EXPENSES_LABEL),
        format_ars(input.expenses)
    );
    let _ = writeln!(
        out,
        "{}: {} ({})",
        tr.t(keys::TOTAL_TITLE),
        format_ars(result.total),
        tr.tf(keys::TOTAL_CAPTION, &[("n", input.duration_months.to_string())])
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", tr.t(keys::OPTIONS_HEADING));
    let _ = writeln!(
        out,
        "  {}: {} | {}",
        tr.t(keys::UPFRONT_TITLE),
        format_ars(result.upfront),
        tr.t(keys::UPFRONT_CAPTION)
    );
    for quote in &result.plans {
        let _ = writeln!(
            out,
            "  {}: {} | {}",
            tr.tf(keys::PLAN_TITLE, &[("n", quote.installments.to_string())]),
            format_ars(quote.amount),
            tr.interest_label(quote.label)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;
    use crate::rates::{PlanId, RateTable};

    #[test]
    fn menu_parses_known_options_only() {
        assert_eq!(MenuChoice::parse(" 1\n"), Some(MenuChoice::Duration));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Expenses));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("9"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn quote_lists_every_plan() {
        let tr = Translator::new("es");
        let input = ContractInput::default();
        let rates = RateTable::with_defaults().with(PlanId::Three, 1.0);
        let text = render_quote(&tr, &input, &compute(&input, &rates));
        assert!(text.contains("Total: $ 504.000,00 (Contrato de 24 meses)"));
        assert!(text.contains("1 Pago al Contado: $ 403.200,00 | Incluye 20% de descuento."));
        assert!(text.contains("3 Pagos de: $ 168.000,00 | Cuotas sin interés."));
        assert!(text.contains("6 Pagos de: $ 95.256,00 | 13,5% de interés."));
        assert!(text.contains("12 Pagos de: $ 52.710,00 | 25,5% de interés."));
        assert!(!text.contains("Rango sugerido"));
    }

    #[test]
    fn out_of_range_duration_shows_hint() {
        let tr = Translator::new("en");
        let input = ContractInput {
            duration_months: 72,
            ..ContractInput::default()
        };
        let text = render_quote(&tr, &input, &compute(&input, &RateTable::with_defaults()));
        assert!(text.contains("Suggested range: 6 to 60 months."));
        assert!(text.contains("Contract of 72 months"));
    }
}
