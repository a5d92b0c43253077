//! Line-oriented front end for the report wizard.
//!
//! Plain lines go to the station query box, `:`-prefixed lines are
//! commands (see [`command`]). A background task prints the suggestion
//! panel whenever the controller publishes a new snapshot.

pub mod command;
pub mod render;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::controller::{SuggestionController, SuggestionState};
use crate::domain::RankedStation;
use crate::geolocation::GeoStatus;
use crate::report::{MAX_PHOTOS, Photo, ReportClient, ReportDraft};
use crate::suggest::SuggestionProvider;

use command::Command;

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

/// The whole form: suggestions, draft and the reports client.
pub struct Wizard<P> {
    controller: SuggestionController<P>,
    draft: ReportDraft,
    reports: ReportClient,
    geo: GeoStatus,
}

impl<P: SuggestionProvider + 'static> Wizard<P> {
    pub fn new(controller: SuggestionController<P>, reports: ReportClient) -> Self {
        Self {
            controller,
            draft: ReportDraft::new(),
            reports,
            geo: GeoStatus::Pending,
        }
    }

    /// Record the outcome of the position lookup.
    pub fn set_geo_status(&mut self, status: GeoStatus) {
        self.geo = status;
    }

    pub fn controller_mut(&mut self) -> &mut SuggestionController<P> {
        &mut self.controller
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    /// Read commands from stdin until `:quit` or end of input.
    pub async fn run(mut self) -> std::io::Result<()> {
        println!("{}", render::help());
        println!("{}", self.geo);

        let renderer = tokio::spawn(render_loop(self.controller.subscribe(), |text| {
            println!("{text}")
        }));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let reply = match command::parse(&line) {
                Ok(command) => self.handle(command).await,
                Err(e) => Reply::Text(e.to_string()),
            };
            match reply {
                Reply::Text(text) => println!("{text}"),
                Reply::Silent => {}
                Reply::Quit => break,
            }
        }

        renderer.abort();
        self.controller.abandon();
        Ok(())
    }

    /// Apply one command to the form.
    pub async fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Query(text) => {
                self.controller.on_input_change(&text);
                Reply::Silent
            }
            Command::Pick(n) => {
                let station = nth(&self.controller.snapshot().suggestions, n);
                match station {
                    Some(station) => {
                        let label = station.display_label();
                        self.controller.select(station);
                        Reply::Text(format!("Выбрана станция: {label}"))
                    }
                    None => Reply::Text(format!("Нет подсказки с номером {n}")),
                }
            }
            Command::Near(n) => {
                let station = nth(&self.controller.snapshot().nearby, n);
                match station {
                    Some(station) => {
                        let label = station.display_label();
                        self.controller.select(station);
                        Reply::Text(format!("Выбрана станция: {label}"))
                    }
                    None => Reply::Text(format!("Нет станции рядом с номером {n}")),
                }
            }
            Command::Category(category) => {
                self.draft.set_category(category);
                Reply::Text(format!("Тип дефекта: {category}"))
            }
            Command::Photo(path) => match Photo::from_path(&path).await {
                Ok(photo) => {
                    let name = photo.file_name.clone();
                    if self.draft.add_photos([photo]) == 0 {
                        Reply::Text(format!("Можно прикрепить не более {MAX_PHOTOS} фото"))
                    } else {
                        Reply::Text(format!(
                            "Фото {name} добавлено ({}/{MAX_PHOTOS})",
                            self.draft.photos().len()
                        ))
                    }
                }
                Err(e) => Reply::Text(format!("Не удалось прочитать {}: {e}", path.display())),
            },
            Command::RemovePhoto(n) => {
                match n.checked_sub(1).and_then(|i| self.draft.remove_photo(i)) {
                    Some(photo) => Reply::Text(format!("Фото {} удалено", photo.file_name)),
                    None => Reply::Text(format!("Нет фото с номером {n}")),
                }
            }
            Command::Describe(text) => {
                self.draft.set_description(text);
                Reply::Text("Описание сохранено".to_string())
            }
            Command::Send => self.send().await,
            Command::Reset => {
                self.reset();
                Reply::Text("Форма очищена".to_string())
            }
            Command::Status => Reply::Text(render::summary(
                &self.controller.snapshot(),
                &self.draft,
                self.geo,
            )),
            Command::Help => Reply::Text(render::help()),
            Command::Quit => Reply::Quit,
        }
    }

    async fn send(&mut self) -> Reply {
        let state = self.controller.snapshot();
        let submission =
            match self
                .draft
                .build(state.selected.as_ref(), &state.query, state.reference)
            {
                Ok(submission) => submission,
                Err(e) => return Reply::Text(e.to_string()),
            };

        println!("Отправляем данные…");
        match self.reports.submit(&submission).await {
            Ok(receipts) => {
                info!(reports = receipts.len(), "report submitted");
                self.reset();
                Reply::Text(format!(
                    "{}\nСпасибо! Дефект отправлен в систему.",
                    render::receipts(&receipts)
                ))
            }
            Err(e) => {
                warn!(error = %e, "report submission failed");
                Reply::Text(format!(
                    "{}\nОшибка отправки. Проверьте подключение к сети.",
                    e.user_message()
                ))
            }
        }
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.controller.reset();
    }
}

/// The 1-based `n`th entry of a list.
fn nth(list: &[RankedStation], n: usize) -> Option<RankedStation> {
    n.checked_sub(1).and_then(|i| list.get(i)).cloned()
}

/// Emit the panel and the nearby row each time they change.
///
/// The snapshot current at subscription is drawn first, so results stored
/// before the loop started are not lost.
async fn render_loop(
    mut rx: watch::Receiver<SuggestionState>,
    mut out: impl FnMut(String) + Send,
) {
    let mut last_panel = None;
    let mut last_nearby = None;

    loop {
        let (panel, nearby) = {
            let state = rx.borrow_and_update();
            (render::panel(&state), render::nearby(&state))
        };

        if nearby != last_nearby {
            if let Some(text) = &nearby {
                out(text.clone());
            }
            last_nearby = nearby;
        }
        if panel != last_panel {
            if let Some(text) = &panel {
                out(text.clone());
            }
            last_panel = panel;
        }

        if rx.changed().await.is_err() {
            break;
        }
    }
}
