//! 보증 비용 계산 로직을 라이브러리로 분리하여 CLI와 GUI 위젯이 함께 사용한다.

pub mod app;
pub mod coerce;
pub mod config;
pub mod engine;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod rates;
pub mod resize;
pub mod ui_cli;

pub use engine::{compute, compute_raw, ContractInput, CostResult, PlanQuote};
pub use rates::{InterestLabel, PlanId, RateTable};
