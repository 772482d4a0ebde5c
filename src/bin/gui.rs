#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 계산기 위젯 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use egui::{Color32, RichText};
use std::path::PathBuf;
use tracing::{info, warn};

use rent_guarantee_calculator::{
    coerce, config,
    engine::{self, ContractInput, CostResult, MAX_DURATION_MONTHS, MIN_DURATION_MONTHS},
    format::format_ars,
    i18n::{self, keys},
    logging,
    rates::{InterestLabel, RateTable},
    resize::{JsonLineNotifier, ResizeReporter, SizeNotifier},
};

const BRAND: Color32 = Color32::from_rgb(0x35, 0x28, 0x84);
const BRAND_CAPTION: Color32 = Color32::from_rgb(0xD4, 0xF8, 0xF6);
const SLATE_FILL: Color32 = Color32::from_rgb(0xF8, 0xFA, 0xFC);
const SLATE_STROKE: Color32 = Color32::from_rgb(0xE2, 0xE8, 0xF0);
const SLATE_TEXT: Color32 = Color32::from_rgb(0x1E, 0x29, 0x3B);
const SLATE_CAPTION: Color32 = Color32::from_rgb(0x64, 0x74, 0x8B);
const GREEN_FILL: Color32 = Color32::from_rgb(0xF0, 0xFD, 0xF4);
const GREEN_STROKE: Color32 = Color32::from_rgb(0xBB, 0xF7, 0xD0);
const GREEN_TEXT: Color32 = Color32::from_rgb(0x14, 0x53, 0x2D);
const GREEN_CAPTION: Color32 = Color32::from_rgb(0x15, 0x80, 0x3D);

/// 이 폭보다 좁으면 두 열 대신 한 열로 쌓는다.
const TWO_COLUMN_MIN_WIDTH: f32 = 720.0;

#[derive(Parser)]
#[command(name = "rent_guarantee_calculator")]
#[command(about = "Rent guarantee cost calculator widget")]
struct Args {
    /// auto / es / en
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,

    /// Path to the config file (created with defaults when missing)
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Write {"frameHeight": N} messages to stdout for the embedding host
    #[arg(long)]
    report_size: bool,
}

type HostReporter = ResizeReporter<Box<dyn SizeNotifier>>;

fn main() -> Result<(), eframe::Error> {
    logging::init();
    let args = Args::parse();

    let mut app_cfg = config::load_or_create(&args.config).unwrap_or_else(|e| {
        warn!(error = %e, "config unavailable, using defaults");
        config::Config::default()
    });
    app_cfg.language = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    let rates = app_cfg.resolve_rates();
    let reporter = args.report_size.then(|| {
        let notifier: Box<dyn SizeNotifier> = Box::new(JsonLineNotifier::stdout());
        ResizeReporter::new(notifier)
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 620.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };
    let title =
        i18n::Translator::new_with_pack(&app_cfg.language, app_cfg.language_pack_dir.as_deref())
            .t(keys::APP_TITLE)
            .to_string();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, rates, reporter))),
    )
}

struct GuiApp {
    tr: i18n::Translator,
    rates: RateTable,
    duration: i64,
    rent_text: String,
    expenses_text: String,
    result: CostResult,
    reporter: Option<HostReporter>,
    mounted: bool,
}

impl GuiApp {
    fn new(config: config::Config, rates: RateTable, reporter: Option<HostReporter>) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!(lang = %lang_code, "GUI language resolved");
        let initial = config.defaults.to_input();
        Self {
            tr,
            result: engine::compute(&initial, &rates),
            rates,
            duration: initial.duration_months,
            rent_text: initial.rent.to_string(),
            expenses_text: initial.expenses.to_string(),
            reporter,
            mounted: false,
        }
    }

    /// 입력란 원문을 강제 변환한 현재 입력.
    fn input(&self) -> ContractInput {
        ContractInput {
            duration_months: self.duration,
            rent: coerce::coerce_f64(&self.rent_text),
            expenses: coerce::coerce_f64(&self.expenses_text),
        }
    }

    fn recompute(&mut self) {
        self.result = engine::compute(&self.input(), &self.rates);
    }

    /// 계약 변수 입력과 총액 카드. 입력이 바뀌었으면 true.
    fn ui_contract(&mut self, ui: &mut egui::Ui) -> bool {
        let tr = self.tr.clone();
        let mut changed = false;

        ui.heading(tr.t(keys::CONTRACT_HEADING));
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(format!("{}:", tr.t(keys::DURATION_LABEL)));
            ui.strong(RichText::new(tr.months(self.duration)).color(BRAND));
        });
        let slider = egui::Slider::new(&mut self.duration, MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS)
            .show_value(false);
        changed |= ui.add(slider).changed();
        ui.horizontal(|ui| {
            ui.small(tr.months(MIN_DURATION_MONTHS));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(tr.months(MAX_DURATION_MONTHS));
            });
        });
        ui.add_space(8.0);

        ui.label(tr.t(keys::RENT_LABEL));
        changed |= money_field(ui, &mut self.rent_text, tr.t(keys::RENT_HINT));
        ui.add_space(4.0);
        ui.label(tr.t(keys::EXPENSES_LABEL));
        changed |= money_field(ui, &mut self.expenses_text, tr.t(keys::EXPENSES_HINT));

        if changed {
            self.recompute();
        }

        ui.add_space(8.0);
        card(ui, SLATE_FILL, SLATE_STROKE, |ui| {
            ui.label(RichText::new(tr.t(keys::TOTAL_TITLE)).strong().color(SLATE_TEXT))
                .on_hover_text(tr.t(keys::TOTAL_TIP));
            ui.label(
                RichText::new(format_ars(self.result.total))
                    .size(24.0)
                    .strong()
                    .color(SLATE_TEXT),
            );
            ui.label(
                RichText::new(tr.tf(keys::TOTAL_CAPTION, &[("n", self.duration.to_string())]))
                    .small()
                    .color(SLATE_CAPTION),
            );
        });
        changed
    }

    /// 납부 방법 카드들.
    fn ui_options(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.heading(tr.t(keys::OPTIONS_HEADING));
        ui.separator();

        card(ui, BRAND, BRAND, |ui| {
            ui.label(
                RichText::new(tr.t(keys::UPFRONT_TITLE))
                    .size(20.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.label(
                RichText::new(format_ars(self.result.upfront))
                    .size(30.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.label(RichText::new(tr.t(keys::UPFRONT_CAPTION)).small().color(BRAND_CAPTION));
        });

        for quote in &self.result.plans {
            ui.add_space(6.0);
            let (fill, stroke, text, caption) = match quote.label {
                InterestLabel::NoInterest => (GREEN_FILL, GREEN_STROKE, GREEN_TEXT, GREEN_CAPTION),
                InterestLabel::Interest(_) => (SLATE_FILL, SLATE_STROKE, SLATE_TEXT, SLATE_CAPTION),
            };
            card(ui, fill, stroke, |ui| {
                ui.label(
                    RichText::new(tr.tf(keys::PLAN_TITLE, &[("n", quote.installments.to_string())]))
                        .strong()
                        .color(text),
                );
                ui.label(
                    RichText::new(format_ars(quote.amount))
                        .size(24.0)
                        .strong()
                        .color(text),
                );
                ui.label(RichText::new(tr.interest_label(quote.label)).small().color(caption));
            });
        }
    }

    /// 렌더링된 높이를 호스트에 알린다. 첫 프레임은 mount, 결과가 바뀌면 강제 전송.
    fn report_height(&mut self, height: f32, result_changed: bool) {
        let Some(reporter) = self.reporter.as_mut() else {
            return;
        };
        if !self.mounted {
            reporter.mount(height);
            self.mounted = true;
        } else if result_changed {
            reporter.result_changed(height);
        } else {
            reporter.observe(height);
        }
    }
}

fn money_field(ui: &mut egui::Ui, text: &mut String, hint: &str) -> bool {
    ui.horizontal(|ui| {
        ui.label("$");
        ui.add(
            egui::TextEdit::singleline(text)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        )
        .changed()
    })
    .inner
}

fn card<R>(
    ui: &mut egui::Ui,
    fill: Color32,
    stroke: Color32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut changed = false;
        let content_height = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if ui.available_width() >= TWO_COLUMN_MIN_WIDTH {
                    ui.columns(2, |cols| {
                        changed = self.ui_contract(&mut cols[0]);
                        self.ui_options(&mut cols[1]);
                    });
                } else {
                    changed = self.ui_contract(ui);
                    ui.add_space(12.0);
                    self.ui_options(ui);
                }
                ui.min_rect().height()
            })
            .inner;
        self.report_height(content_height, changed);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.teardown();
        }
    }
}
