use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::engine::ContractInput;
use crate::rates::{self, PlanId, RateTable};

/// 기본 설정 파일 경로(작업 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 플랜별 총상환 배율. 비워 두면 내장 기본값을 쓴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub three: Option<f64>,
    pub six: Option<f64>,
    pub twelve: Option<f64>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            three: Some(PlanId::Three.default_rate()),
            six: Some(PlanId::Six.default_rate()),
            twelve: Some(PlanId::Twelve.default_rate()),
        }
    }
}

impl RatesConfig {
    pub fn get(&self, plan: PlanId) -> Option<f64> {
        match plan {
            PlanId::Three => self.three,
            PlanId::Six => self.six,
            PlanId::Twelve => self.twelve,
        }
    }

    /// 지정된 값만 담은 배율 표.
    pub fn to_table(&self) -> RateTable {
        let mut table = RateTable::empty();
        for plan in PlanId::ALL {
            if let Some(rate) = self.get(plan) {
                table.set(plan, rate);
            }
        }
        table
    }
}

/// 화면을 처음 열 때 채워 둘 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    pub duration: i64,
    pub rent: f64,
    pub expenses: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        let input = ContractInput::default();
        Self {
            duration: input.duration_months,
            rent: input.rent,
            expenses: input.expenses,
        }
    }
}

impl InputDefaults {
    pub fn to_input(&self) -> ContractInput {
        ContractInput {
            duration_months: self.duration,
            rent: self.rent,
            expenses: self.expenses,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// auto / es / en
    pub language: String,
    /// 언어팩(TOML) 디렉터리
    pub language_pack_dir: Option<String>,
    pub rates: RatesConfig,
    pub defaults: InputDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            rates: RatesConfig::default(),
            defaults: InputDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정한 경로의 설정을 읽는다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

impl Config {
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 프로세스 환경 변수를 우선 적용해 배율 표를 만든다.
    pub fn resolve_rates(&self) -> RateTable {
        self.resolve_rates_with(|key| std::env::var(key).ok())
    }

    /// 환경 변수 조회를 주입받아 배율 표를 만든다.
    pub fn resolve_rates_with<F>(&self, lookup: F) -> RateTable
    where
        F: Fn(&str) -> Option<String>,
    {
        rates::resolve(lookup, &self.rates.to_table())
    }
}
