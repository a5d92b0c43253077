//! Text views of wizard state.
//!
//! Multi-line screens are askama templates under `templates/`, filled from
//! the view models below.

use askama::Template;

use crate::controller::SuggestionState;
use crate::domain::{Category, RankedStation, format_distance};
use crate::geolocation::GeoStatus;
use crate::report::{MAX_PHOTOS, ReportDraft, ReportReceipt};

const NO_LINE: &str = "Линия не указана";

// ============================================================================
// Templates
// ============================================================================

/// Suggestion list.
#[derive(Template)]
#[template(path = "panel.txt")]
pub struct PanelTemplate {
    pub rows: Vec<SuggestionView>,
}

/// The whole form at a glance.
#[derive(Template)]
#[template(path = "summary.txt")]
pub struct SummaryTemplate {
    pub photos: Vec<PhotoView>,
    pub max_photos: usize,
    pub category: String,
    pub station: String,
    pub description: String,
    pub location: String,
}

/// Success dialog after a submit.
#[derive(Template)]
#[template(path = "receipts.txt")]
pub struct ReceiptsTemplate {
    pub receipts: Vec<ReceiptView>,
}

/// Commands and category ids.
#[derive(Template)]
#[template(path = "help.txt")]
pub struct HelpTemplate {
    pub categories: Vec<CategoryView>,
}

// ============================================================================
// View Models
// ============================================================================

/// One suggestion row. Empty strings are left out of the output.
#[derive(Debug, Clone)]
pub struct SuggestionView {
    pub name: String,
    pub distance: String,
    pub line: String,
    pub color: String,
    pub city: String,
}

impl SuggestionView {
    pub fn from_ranked(station: &RankedStation) -> Self {
        let s = &station.station;
        Self {
            name: s.name.clone(),
            distance: station.distance_km.map(format_distance).unwrap_or_default(),
            line: line_or_placeholder(&s.line_name).to_string(),
            color: s.line_color.clone().unwrap_or_default(),
            city: s.city.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhotoView {
    pub file_name: String,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct ReceiptView {
    pub id: i64,
    pub category: String,
    pub station: String,
    pub status: String,
    pub photo_url: String,
    pub created: String,
}

impl ReceiptView {
    pub fn from_receipt(receipt: &ReportReceipt) -> Self {
        Self {
            id: receipt.id,
            category: receipt.category.clone(),
            station: receipt.station.clone().unwrap_or_else(|| "—".to_string()),
            status: receipt.status.clone(),
            photo_url: receipt.photo_url.clone().unwrap_or_default(),
            created: receipt
                .created_at()
                .map(|t| t.format("%d.%m.%Y, %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: &'static str,
    pub label: String,
}

// ============================================================================
// Rendering
// ============================================================================

fn render(template: &impl Template) -> String {
    template
        .render()
        .map(|text| text.trim_end().to_string())
        .unwrap_or_else(|e| format!("Ошибка отображения: {e}"))
}

fn line_or_placeholder(line_name: &str) -> &str {
    if line_name.is_empty() {
        NO_LINE
    } else {
        line_name
    }
}

/// The suggestion panel, or `None` while it is hidden.
pub fn panel(state: &SuggestionState) -> Option<String> {
    if !state.panel_open {
        return None;
    }

    let text = if state.loading {
        "  Загружаем станции…".to_string()
    } else if let Some(error) = &state.error {
        format!("  ⚠ {error}")
    } else if state.suggestions.is_empty() {
        "  Ничего не найдено".to_string()
    } else {
        render(&PanelTemplate {
            rows: state.suggestions.iter().map(SuggestionView::from_ranked).collect(),
        })
    };
    Some(text)
}

/// The "stations nearby" shortcut row, or `None` when it is empty.
pub fn nearby(state: &SuggestionState) -> Option<String> {
    if state.nearby.is_empty() {
        return None;
    }

    let chips: Vec<String> = state
        .nearby
        .iter()
        .enumerate()
        .map(|(i, s)| match s.distance_km {
            Some(km) => format!("{}) {} {}", i + 1, s.name(), format_distance(km)),
            None => format!("{}) {}", i + 1, s.name()),
        })
        .collect();

    Some(format!("Станции рядом: {}", chips.join("  ")))
}

/// One-screen summary of the whole form.
pub fn summary(state: &SuggestionState, draft: &ReportDraft, geo: GeoStatus) -> String {
    let station = match &state.selected {
        Some(s) => format!(
            "{} ({})",
            s.name(),
            line_or_placeholder(&s.station.line_name)
        ),
        None => "не выбрана".to_string(),
    };
    let location = match state.reference {
        Some(here) => format!("📍 {geo} ({here})"),
        None => geo.to_string(),
    };

    render(&SummaryTemplate {
        photos: draft
            .photos()
            .iter()
            .map(|p| PhotoView {
                file_name: p.file_name.clone(),
                size: p.bytes.len(),
            })
            .collect(),
        max_photos: MAX_PHOTOS,
        category: draft
            .category()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "не выбран".to_string()),
        station,
        description: draft.description().to_string(),
        location,
    })
}

/// The success dialog body.
pub fn receipts(receipts: &[ReportReceipt]) -> String {
    render(&ReceiptsTemplate {
        receipts: receipts.iter().map(ReceiptView::from_receipt).collect(),
    })
}

/// Commands followed by the category ids.
pub fn help() -> String {
    render(&HelpTemplate {
        categories: Category::ALL
            .iter()
            .map(|c| CategoryView {
                id: c.id(),
                label: c.to_string(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SUGGESTIONS_ERROR;
    use crate::domain::{Coordinate, StationCandidate};
    use crate::report::Photo;

    fn ranked(name: &str, km: Option<f64>) -> RankedStation {
        RankedStation {
            station: StationCandidate::named(name),
            distance_km: km,
        }
    }

    #[test]
    fn hidden_panel() {
        assert_eq!(panel(&SuggestionState::default()), None);
    }

    #[test]
    fn panel_meta_lines() {
        let mut state = SuggestionState {
            panel_open: true,
            loading: true,
            ..Default::default()
        };
        assert_eq!(panel(&state).unwrap(), "  Загружаем станции…");

        state.loading = false;
        state.error = Some(SUGGESTIONS_ERROR.to_string());
        assert!(panel(&state).unwrap().contains(SUGGESTIONS_ERROR));

        state.error = None;
        assert_eq!(panel(&state).unwrap(), "  Ничего не найдено");
    }

    #[test]
    fn panel_lists_suggestions() {
        let mut first = RankedStation {
            station: StationCandidate::named("Арбатская")
                .with_line("Филёвская")
                .with_color("#0099CC"),
            distance_km: Some(0.25),
        };
        first.station.city = "Москва".to_string();

        let state = SuggestionState {
            panel_open: true,
            suggestions: vec![first, ranked("Смоленская", None)],
            ..Default::default()
        };

        let text = panel(&state).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "   1. Арбатская · 250 м  [Филёвская] #0099CC • Москва");
        assert_eq!(lines[1], "   2. Смоленская  [Линия не указана]");
    }

    #[test]
    fn nearby_row() {
        let state = SuggestionState {
            nearby: vec![ranked("Арбатская", Some(0.25)), ranked("Смоленская", Some(1.34))],
            ..Default::default()
        };
        assert_eq!(
            nearby(&state).unwrap(),
            "Станции рядом: 1) Арбатская 250 м  2) Смоленская 1.3 км"
        );
        assert_eq!(nearby(&SuggestionState::default()), None);
    }

    #[test]
    fn summary_of_partial_form() {
        let mut draft = ReportDraft::new();
        draft.add_photos([Photo::new("a.jpg", vec![1, 2, 3])]);
        draft.set_category(Category::Graffiti);

        let state = SuggestionState {
            reference: Coordinate::new(55.75, 37.62),
            ..Default::default()
        };

        let text = summary(&state, &draft, GeoStatus::Located);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Фото: 1/6");
        assert_eq!(lines[1], "  1. a.jpg (3 байт)");
        assert_eq!(lines[2], "Тип дефекта: 🎨 Граффити");
        assert_eq!(lines[3], "Станция: не выбрана");
        assert!(lines[4].starts_with("📍 Местоположение определено"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn summary_with_description_and_station() {
        let mut draft = ReportDraft::new();
        draft.set_description("скол");
        let state = SuggestionState {
            selected: Some(ranked("Сокол", None)),
            ..Default::default()
        };

        let text = summary(&state, &draft, GeoStatus::Unsupported);
        assert!(text.starts_with("Фото: 0/6\nТип дефекта: не выбран\n"));
        assert!(text.contains("Станция: Сокол (Линия не указана)\nОписание: скол\n"));
        assert!(text.ends_with("Геолокация недоступна"));
    }

    #[test]
    fn receipts_dialog() {
        let body = r#"[{"id": 3, "category": "Пол", "station": "Сокол", "status": "pending",
                        "photo_url": "Пол/x.jpg", "created_at": "2024-05-01T12:30:00+03:00"},
                       {"id": 4, "category": "Пол", "station": null, "status": "pending"}]"#;
        let parsed = crate::report::parse_receipts(body).unwrap();

        let text = receipts(&parsed);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Ваши данные отправлены. Краткая информация по загруженным фото:",
                "  ID 3 · Пол · Сокол · pending",
                "     Фото: Пол/x.jpg",
                "     Создано: 01.05.2024, 12:30:00",
                "  ID 4 · Пол · — · pending",
            ]
        );
    }

    #[test]
    fn help_lists_commands_and_categories() {
        let text = help();
        assert!(text.starts_with("Введите название станции"));
        assert!(text.contains("  :send        отправить"));
        assert!(text.contains("  graffiti  🎨 Граффити"));
        for c in Category::ALL {
            assert!(text.contains(c.id()));
        }
    }
}
