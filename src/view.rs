//! Pure projection from [`ViewState`] to what the user sees.
//!
//! The projection decides visibility only; layout and styling are left to
//! whatever renders the [`View`]. An error banner and result sections are
//! never shown together.

use std::fmt;

use crate::config::{ServiceConfig, ABOUT_PREVIEW_CHARS};
use crate::models::{ChartKind, ChartRef, Figure, ModelKind, Query, StockInfo};
use crate::state::ViewState;

const SUBMIT_LABEL: &str = "Run Predictive Analysis";
const SUBMIT_LABEL_LOADING: &str = "Initiating Prediction...";

// ---------------------------------------------------------------------------
// AboutText - collapsible company blurb
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutText {
    pub text: String,
    pub expanded: bool,
}

impl AboutText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expanded: false,
        }
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Full text when expanded; otherwise the first characters followed by
    /// an ellipsis.
    pub fn display(&self) -> String {
        if self.expanded {
            self.text.clone()
        } else {
            let preview: String = self.text.chars().take(ABOUT_PREVIEW_CHARS).collect();
            format!("{}...", preview)
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Show Less"
        } else {
            "Show More"
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBanner {
    pub price: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub date: String,
    pub lstm: f64,
    pub xgboost: Option<f64>,
    pub hybrid: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    pub horizon_days: i64,
    pub rows: Vec<ForecastRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyCard {
    pub name: String,
    pub symbol: String,
    pub sector: String,
    pub market_cap: String,
    pub pe_ratio: String,
    pub about: AboutText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub kind: ChartKind,
    pub caption: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPanel {
    pub model: ModelKind,
    pub title: &'static str,
    pub images: Vec<ChartImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

/// Everything needed to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub submit: SubmitControl,
    pub error: Option<String>,
    pub price: Option<PriceBanner>,
    pub table: Option<ForecastTable>,
    pub company: Option<CompanyCard>,
    pub charts: Vec<ChartPanel>,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

pub fn project(state: &ViewState, query: &Query, config: &ServiceConfig) -> View {
    let submit = SubmitControl {
        enabled: !state.loading,
        label: if state.loading {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL
        },
    };

    if let Some(err) = &state.error {
        return View {
            submit,
            error: Some(err.clone()),
            price: None,
            table: None,
            company: None,
            charts: Vec::new(),
        };
    }

    let price = state.current_price.as_ref().and_then(|p| {
        if p.is_blank() {
            return None;
        }
        Some(PriceBanner {
            price: p.to_string(),
            name: state.stock_info.as_ref().map(|s| s.name.clone()),
            symbol: state.stock_info.as_ref().map(|s| s.symbol.clone()),
        })
    });

    let complete = state.forecasts.is_complete();
    let table = complete.then(|| forecast_table(state, query.forecast_days));
    let charts = if complete {
        chart_panels(state, config)
    } else {
        Vec::new()
    };

    View {
        submit,
        error: None,
        price,
        table,
        company: state.stock_info.as_ref().map(company_card),
        charts,
    }
}

fn forecast_table(state: &ViewState, horizon_days: i64) -> ForecastTable {
    let f = &state.forecasts;
    let rows = f
        .lstm
        .iter()
        .enumerate()
        .map(|(i, point)| ForecastRow {
            date: point.date_only().to_string(),
            lstm: point.value,
            xgboost: f.xgboost.get(i).map(|p| p.value),
            hybrid: f.hybrid.get(i).map(|p| p.value),
        })
        .collect();
    ForecastTable { horizon_days, rows }
}

fn company_card(info: &StockInfo) -> CompanyCard {
    let figure = |f: &Option<Figure>| f.as_ref().map(|v| v.to_string()).unwrap_or_default();
    CompanyCard {
        name: info.name.clone(),
        symbol: info.symbol.clone(),
        sector: info.sector.clone().unwrap_or_default(),
        market_cap: figure(&info.market_cap),
        pe_ratio: figure(&info.pe_ratio),
        about: AboutText::new(info.about.clone().unwrap_or_default()),
    }
}

fn chart_panels(state: &ViewState, config: &ServiceConfig) -> Vec<ChartPanel> {
    let panel = |model: ModelKind, entries: Vec<(ChartKind, &ChartRef)>| ChartPanel {
        model,
        title: model.title(),
        images: entries
            .into_iter()
            .map(|(kind, chart)| ChartImage {
                kind,
                caption: kind.caption(),
                url: config.graph_url(chart),
            })
            .collect(),
    };

    let charts = &state.charts;
    let mut panels = Vec::with_capacity(3);
    if let Some(c) = &charts.lstm {
        panels.push(panel(ModelKind::Lstm, c.entries()));
    }
    if let Some(c) = &charts.xgboost {
        panels.push(panel(ModelKind::Xgboost, c.entries()));
    }
    if let Some(c) = &charts.hybrid {
        panels.push(panel(ModelKind::Hybrid, c.entries()));
    }
    panels
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}]{}",
            self.submit.label,
            if self.submit.enabled { "" } else { " (disabled)" }
        )?;

        if let Some(err) = &self.error {
            return writeln!(f, "Error: {}", err);
        }

        if let Some(price) = &self.price {
            write!(f, "Current price: {}", price.price)?;
            if let (Some(name), Some(symbol)) = (&price.name, &price.symbol) {
                write!(f, " {} ({})", name, symbol)?;
            }
            writeln!(f)?;
        }

        if let Some(table) = &self.table {
            writeln!(f, "Forecast ({} Day Horizon)", table.horizon_days)?;
            writeln!(
                f,
                "Date\t{}\t{}\t{}",
                ModelKind::Lstm.column(),
                ModelKind::Xgboost.column(),
                ModelKind::Hybrid.column()
            )?;
            for row in &table.rows {
                writeln!(
                    f,
                    "{}\t{}\t{}\t{}",
                    row.date,
                    row.lstm,
                    cell(row.xgboost),
                    cell(row.hybrid)
                )?;
            }
        }

        if let Some(company) = &self.company {
            writeln!(f, "{} ({})", company.name, company.symbol)?;
            writeln!(f, "Sector: {}", company.sector)?;
            writeln!(f, "Market Cap: {}", company.market_cap)?;
            writeln!(f, "PE Ratio: {}", company.pe_ratio)?;
            writeln!(f, "{}", company.about.display())?;
        }

        for panel in &self.charts {
            writeln!(f, "{}", panel.title)?;
            for image in &panel.images {
                writeln!(f, "  {}: {}", image.caption, image.url)?;
            }
        }
        Ok(())
    }
}
