use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::coerce::coerce_f64;

/// 할부 플랜 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    /// 3회 분할
    Three,
    /// 6회 분할
    Six,
    /// 12회 분할
    Twelve,
}

impl PlanId {
    /// 표시 순서대로 나열한 전체 플랜.
    pub const ALL: [PlanId; 3] = [PlanId::Three, PlanId::Six, PlanId::Twelve];

    /// 분할 납부 횟수. 항상 0보다 크다.
    pub fn installments(self) -> u32 {
        match self {
            PlanId::Three => 3,
            PlanId::Six => 6,
            PlanId::Twelve => 12,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PlanId::Three => "three",
            PlanId::Six => "six",
            PlanId::Twelve => "twelve",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "three" | "3" => Some(PlanId::Three),
            "six" | "6" => Some(PlanId::Six),
            "twelve" | "12" => Some(PlanId::Twelve),
            _ => None,
        }
    }

    /// 이자 배율을 덮어쓰는 환경 변수 이름.
    pub fn env_var(self) -> &'static str {
        match self {
            PlanId::Three => "RATE_THREE",
            PlanId::Six => "RATE_SIX",
            PlanId::Twelve => "RATE_TWELVE",
        }
    }

    /// 설정이 없을 때 쓰는 기본 총상환 배율.
    pub fn default_rate(self) -> f64 {
        match self {
            PlanId::Three => 1.076,
            PlanId::Six => 1.135,
            PlanId::Twelve => 1.255,
        }
    }
}

/// 플랜별 이자 표시 상태.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum InterestLabel {
    /// 배율이 정확히 1
    NoInterest,
    /// 소수 첫째 자리까지 반올림한 이자율(%)
    Interest(f64),
}

impl InterestLabel {
    pub fn from_rate(rate: f64) -> Self {
        if rate == 1.0 {
            InterestLabel::NoInterest
        } else {
            InterestLabel::Interest(interest_percent(rate))
        }
    }
}

/// 총상환 배율을 이자율(%)로 바꾼다. 소수 첫째 자리, .5는 올림.
pub fn interest_percent(rate: f64) -> f64 {
    ((rate - 1.0) * 1000.0 + 0.5).floor() / 10.0
}

/// 플랜별 총상환 배율 표.
///
/// 표에 없는 플랜은 배율 1(무이자)로 취급한다. 프로세스 시작 시 한 번 만들어
/// 계산 함수에 명시적으로 넘긴다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    rates: BTreeMap<PlanId, f64>,
}

impl RateTable {
    /// 비어 있는 표. 모든 플랜이 무이자가 된다.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 내장 기본 배율(1.076 / 1.135 / 1.255)로 채운 표.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for plan in PlanId::ALL {
            table.set(plan, plan.default_rate());
        }
        table
    }

    /// 배율을 지정한다. 유한하지 않은 값은 무시한다.
    pub fn set(&mut self, plan: PlanId, rate: f64) {
        if rate.is_finite() {
            self.rates.insert(plan, rate);
        }
    }

    pub fn with(mut self, plan: PlanId, rate: f64) -> Self {
        self.set(plan, rate);
        self
    }

    /// 표에 등록된 배율. 없으면 None.
    pub fn get(&self, plan: PlanId) -> Option<f64> {
        self.rates.get(&plan).copied()
    }

    /// 계산에 쓰는 배율. 없으면 1.
    pub fn rate(&self, plan: PlanId) -> f64 {
        self.get(plan).unwrap_or(1.0)
    }

    /// 키 조회 함수로부터 표를 만든다. 값이 없거나 잘못되면 기본값을 쓴다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve(lookup, &Self::empty())
    }
}

/// 환경 변수 값 하나를 배율로 해석한다. 0이나 숫자가 아닌 값은 미설정으로 본다.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let v = coerce_f64(raw);
    if v == 0.0 {
        None
    } else {
        Some(v)
    }
}

/// 플랜별로 환경 변수 → 설정 파일 값 → 내장 기본값 순서로 배율을 정한다.
pub fn resolve<F>(lookup: F, fallback: &RateTable) -> RateTable
where
    F: Fn(&str) -> Option<String>,
{
    let mut table = RateTable::empty();
    for plan in PlanId::ALL {
        let var = plan.env_var();
        let from_env = lookup(var).and_then(|raw| {
            let parsed = parse_rate(&raw);
            if parsed.is_none() {
                warn!(env_var = var, value = %raw, "ignoring non-numeric rate override");
            }
            parsed
        });
        let from_file = fallback.get(plan).filter(|&rate| {
            if rate == 0.0 {
                warn!(plan = plan.key(), "ignoring zero rate from config");
            }
            rate != 0.0
        });
        let rate = from_env
            .or(from_file)
            .unwrap_or_else(|| plan.default_rate());
        if rate < 1.0 {
            warn!(plan = plan.key(), rate = rate, "rate multiplier below 1 implies a discount");
        }
        table.set(plan, rate);
    }
    debug!(?table, "resolved rate table");
    table
}
