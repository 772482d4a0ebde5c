use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ConfigError;
use crate::engine::{compute, ContractInput, CostResult};
use crate::i18n::{keys, Translator};
use crate::rates::RateTable;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 화면이 들고 있는 입력 원문 세 개와 그로부터 계산한 결과.
///
/// 입력이 하나라도 바뀌면 결과를 처음부터 다시 계산한다.
#[derive(Debug, Clone)]
pub struct Session {
    duration: String,
    rent: String,
    expenses: String,
    rates: RateTable,
    result: CostResult,
}

impl Session {
    pub fn new(initial: ContractInput, rates: RateTable) -> Self {
        let result = compute(&initial, &rates);
        Self {
            duration: initial.duration_months.to_string(),
            rent: initial.rent.to_string(),
            expenses: initial.expenses.to_string(),
            rates,
            result,
        }
    }

    /// 현재 원문을 강제 변환한 입력.
    pub fn input(&self) -> ContractInput {
        ContractInput::from_raw(&self.duration, &self.rent, &self.expenses)
    }

    pub fn result(&self) -> &CostResult {
        &self.result
    }

    pub fn set_duration(&mut self, raw: &str) -> &CostResult {
        self.duration = raw.trim().to_string();
        self.recompute()
    }

    pub fn set_rent(&mut self, raw: &str) -> &CostResult {
        self.rent = raw.trim().to_string();
        self.recompute()
    }

    pub fn set_expenses(&mut self, raw: &str) -> &CostResult {
        self.expenses = raw.trim().to_string();
        self.recompute()
    }

    fn recompute(&mut self) -> &CostResult {
        let input = self.input();
        self.result = compute(&input, &self.rates);
        debug!(?input, total = self.result.total, "recomputed quote");
        &self.result
    }
}

/// `--json` 출력 형식.
#[derive(Debug, Serialize)]
pub struct QuoteReport<'a> {
    pub input: &'a ContractInput,
    pub result: &'a CostResult,
}

pub fn quote_json(input: &ContractInput, result: &CostResult) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&QuoteReport { input, result })?)
}

/// 실행을 중단시킨 오류를 로그와 표준 에러에 남긴다.
pub fn report_fatal(err: &AppError) {
    error!(error = %err, "cli failed");
    eprintln!("Error: {err}");
}

/// 대화형 CLI의 메인 루프를 실행한다. 입력을 바꿀 때마다 견적을 다시 출력한다.
pub fn run(session: &mut Session, tr: &Translator) -> Result<(), AppError> {
    println!("{}", ui_cli::render_quote(tr, &session.input(), session.result()));
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Duration => {
                let raw = ui_cli::read_line(tr.t(keys::PROMPT_DURATION))?;
                session.set_duration(&raw);
            }
            MenuChoice::Rent => {
                let raw = ui_cli::read_line(tr.t(keys::PROMPT_RENT))?;
                session.set_rent(&raw);
            }
            MenuChoice::Expenses => {
                let raw = ui_cli::read_line(tr.t(keys::PROMPT_EXPENSES))?;
                session.set_expenses(&raw);
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
        println!("{}", ui_cli::render_quote(tr, &session.input(), session.result()));
    }
    Ok(())
}
