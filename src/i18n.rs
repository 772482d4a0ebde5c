use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

use crate::format::format_percent;
use crate::rates::InterestLabel;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const CONTRACT_HEADING: &str = "contract.heading";
    pub const DURATION_LABEL: &str = "contract.duration";
    pub const MONTHS: &str = "contract.months";
    pub const DURATION_RANGE_HINT: &str = "contract.duration_range_hint";
    pub const RENT_LABEL: &str = "contract.rent";
    pub const RENT_HINT: &str = "contract.rent_hint";
    pub const EXPENSES_LABEL: &str = "contract.expenses";
    pub const EXPENSES_HINT: &str = "contract.expenses_hint";

    pub const TOTAL_TITLE: &str = "result.total";
    pub const TOTAL_CAPTION: &str = "result.total_caption";
    pub const TOTAL_TIP: &str = "result.total_tip";

    pub const OPTIONS_HEADING: &str = "options.heading";
    pub const UPFRONT_TITLE: &str = "options.upfront";
    pub const UPFRONT_CAPTION: &str = "options.upfront_caption";
    pub const PLAN_TITLE: &str = "options.plan_title";
    pub const NO_INTEREST: &str = "options.no_interest";
    pub const INTEREST: &str = "options.interest";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DURATION: &str = "main_menu.duration";
    pub const MAIN_MENU_RENT: &str = "main_menu.rent";
    pub const MAIN_MENU_EXPENSES: &str = "main_menu.expenses";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_DURATION: &str = "prompt.duration";
    pub const PROMPT_RENT: &str = "prompt.rent";
    pub const PROMPT_EXPENSES: &str = "prompt.expenses";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Es,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Es
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(es/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 es로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        debug!(
            lang = lang_code,
            overrides_loaded = overrides.is_some(),
            "translator ready"
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 영어에 없으면 스페인어를 쓴다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| es(key)),
            Language::Es => es(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }

    /// "N meses" 형태의 기간 문자열.
    pub fn months(&self, n: i64) -> String {
        self.tf(keys::MONTHS, &[("n", n.to_string())])
    }

    /// 플랜의 이자 표시 문구.
    pub fn interest_label(&self, label: InterestLabel) -> String {
        match label {
            InterestLabel::NoInterest => self.t(keys::NO_INTEREST).to_string(),
            InterestLabel::Interest(pct) => {
                let pct = format_percent(pct, self.lang == Language::Es);
                self.tf(keys::INTEREST, &[("pct", pct)])
            }
        }
    }
}

/// `{key}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "es".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("es") => Some("es".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "es" => Some("es".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // es-ar 처럼 전체 코드를 먼저, 없으면 기본 코드(es)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

pub(crate) fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn es(key: &str) -> &'static str {
    use keys::*;
    match key {
        APP_TITLE => "Calculadora de Costos",
        APP_EXIT => "Hasta luego.",
        CONTRACT_HEADING => "Variables del Contrato",
        DURATION_LABEL => "Duración del Contrato",
        MONTHS => "{n} meses",
        DURATION_RANGE_HINT => "Rango sugerido: 6 a 60 meses.",
        RENT_LABEL => "Precio Primer Alquiler",
        RENT_HINT => "Ej: 250000",
        EXPENSES_LABEL => "Precio Primer Mes de Expensas",
        EXPENSES_HINT => "Ej: 50000",
        TOTAL_TITLE => "Total",
        TOTAL_CAPTION => "Contrato de {n} meses",
        TOTAL_TIP => "(alquiler + expensas) × meses × 7%",
        OPTIONS_HEADING => "Opciones de Pago",
        UPFRONT_TITLE => "1 Pago al Contado",
        UPFRONT_CAPTION => "Incluye 20% de descuento.",
        PLAN_TITLE => "{n} Pagos de",
        NO_INTEREST => "Cuotas sin interés.",
        INTEREST => "{pct}% de interés.",
        MAIN_MENU_TITLE => "\n=== Calculadora de Costos ===",
        MAIN_MENU_DURATION => "1) Duración del contrato",
        MAIN_MENU_RENT => "2) Precio primer alquiler",
        MAIN_MENU_EXPENSES => "3) Precio primer mes de expensas",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Opción: ",
        PROMPT_DURATION => "Duración (meses): ",
        PROMPT_RENT => "Alquiler: $ ",
        PROMPT_EXPENSES => "Expensas: $ ",
        INVALID_SELECTION_RETRY => "Opción inválida. Intente de nuevo.",
        _ => "",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        APP_TITLE => "Cost Calculator",
        APP_EXIT => "Goodbye.",
        CONTRACT_HEADING => "Contract Variables",
        DURATION_LABEL => "Contract Duration",
        MONTHS => "{n} months",
        DURATION_RANGE_HINT => "Suggested range: 6 to 60 months.",
        RENT_LABEL => "First Rent Payment",
        RENT_HINT => "e.g. 250000",
        EXPENSES_LABEL => "First Month's Building Expenses",
        EXPENSES_HINT => "e.g. 50000",
        TOTAL_TITLE => "Total",
        TOTAL_CAPTION => "Contract of {n} months",
        TOTAL_TIP => "(rent + expenses) × months × 7%",
        OPTIONS_HEADING => "Payment Options",
        UPFRONT_TITLE => "1 Upfront Payment",
        UPFRONT_CAPTION => "Includes 20% discount.",
        PLAN_TITLE => "{n} Payments of",
        NO_INTEREST => "No interest.",
        INTEREST => "{pct}% interest.",
        MAIN_MENU_TITLE => "\n=== Cost Calculator ===",
        MAIN_MENU_DURATION => "1) Contract duration",
        MAIN_MENU_RENT => "2) First rent payment",
        MAIN_MENU_EXPENSES => "3) First month's building expenses",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Option: ",
        PROMPT_DURATION => "Duration (months): ",
        PROMPT_RENT => "Rent: $ ",
        PROMPT_EXPENSES => "Expenses: $ ",
        INVALID_SELECTION_RETRY => "Invalid option. Try again.",
        _ => return None,
    };
    Some(s)
}
