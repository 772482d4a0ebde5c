//! 보증 비용 계산 엔진.
//!
//! 입력 세 개와 배율 표만으로 결과가 정해지는 순수 함수다. 내부 상태가 없으므로
//! 입력이 바뀔 때마다(키 입력마다) 다시 호출해도 된다.

use serde::Serialize;

use crate::coerce::{coerce_f64, coerce_i64};
use crate::rates::{InterestLabel, PlanId, RateTable};

/// (월세 + 관리비) × 개월 수에 곱하는 보증 비용 계수.
pub const COST_FACTOR: f64 = 0.07;
/// 일시불 납부 배율(20% 할인).
pub const UPFRONT_FACTOR: f64 = 0.80;
/// 화면에서 제공하는 계약 기간 범위. 엔진은 이 범위를 강제하지 않는다.
pub const MIN_DURATION_MONTHS: i64 = 6;
pub const MAX_DURATION_MONTHS: i64 = 60;

/// 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractInput {
    /// 계약 기간 [개월]
    pub duration_months: i64,
    /// 첫 달 월세
    pub rent: f64,
    /// 첫 달 관리비(expensas)
    pub expenses: f64,
}

impl Default for ContractInput {
    fn default() -> Self {
        Self {
            duration_months: 24,
            rent: 250_000.0,
            expenses: 50_000.0,
        }
    }
}

impl ContractInput {
    /// 자유 형식 문자열 입력을 강제 변환해 만든다. 잘못된 값은 0이 된다.
    pub fn from_raw(duration: &str, rent: &str, expenses: &str) -> Self {
        Self {
            duration_months: coerce_i64(duration),
            rent: coerce_f64(rent),
            expenses: coerce_f64(expenses),
        }
    }
}

/// 할부 플랜 하나의 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanQuote {
    pub plan: PlanId,
    pub installments: u32,
    /// 적용된 총상환 배율
    pub rate: f64,
    /// 회당 납부액
    pub amount: f64,
    pub label: InterestLabel,
}

/// 계산 결과 스냅샷. 입력이 바뀌면 새로 만든다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostResult {
    /// 계약 전체 보증 비용
    pub total: f64,
    /// 일시불 납부액
    pub upfront: f64,
    /// `PlanId::ALL` 순서의 할부 플랜
    pub plans: [PlanQuote; 3],
}

impl CostResult {
    pub fn plan(&self, plan: PlanId) -> Option<&PlanQuote> {
        self.plans.iter().find(|q| q.plan == plan)
    }
}

/// 보증 비용과 납부 플랜을 계산한다.
///
/// ```text
/// total         = (rent + expenses) * duration * 0.07
/// upfront       = total * 0.80
/// planAmount(n) = total * rates[n] / n
/// ```
///
/// 어떤 입력에도 실패하지 않으며, 유한하지 않은 중간값은 0으로 바꾼다.
pub fn compute(input: &ContractInput, rates: &RateTable) -> CostResult {
    let total = finite_or_zero(
        (input.rent + input.expenses) * input.duration_months as f64 * COST_FACTOR,
    );
    let upfront = finite_or_zero(total * UPFRONT_FACTOR);
    let plans = PlanId::ALL.map(|plan| {
        let rate = rates.rate(plan);
        let installments = plan.installments();
        PlanQuote {
            plan,
            installments,
            rate,
            amount: finite_or_zero(total * rate / f64::from(installments)),
            label: InterestLabel::from_rate(rate),
        }
    });
    CostResult {
        total,
        upfront,
        plans,
    }
}

/// 문자열 입력을 그대로 받아 계산한다.
pub fn compute_raw(duration: &str, rent: &str, expenses: &str, rates: &RateTable) -> CostResult {
    compute(&ContractInput::from_raw(duration, rent, expenses), rates)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
