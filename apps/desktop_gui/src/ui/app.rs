use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use game_core::{GameSession, GenerateError, Phase};
use shared::domain::Level;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::theme;

const FACT_BUTTON_HEIGHT: f32 = 40.0;

pub struct FakeFactApp {
    session: GameSession,
    topic_input: String,
    level: Level,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
}

impl FakeFactApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: &str,
    ) -> Self {
        Self {
            session: GameSession::new(),
            topic_input: String::new(),
            level: Level::default(),
            cmd_tx,
            ui_rx,
            status: format!("Fact service: {server_url}"),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Generated(result) => {
                    self.session.complete_generation(result);
                }
                UiEvent::BackendUnavailable(reason) => {
                    self.session
                        .complete_generation(Err(GenerateError::transport(reason.clone())));
                    self.status = reason;
                }
            }
        }
    }

    fn submit_configuration(&mut self) {
        let Some(request) = self
            .session
            .submit_configuration(&self.topic_input, self.level)
        else {
            return;
        };

        let mut status = String::new();
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Generate(request),
            &mut status,
        ) {
            tracing::warn!("could not queue generate command: {status}");
            self.session
                .complete_generation(Err(GenerateError::transport(status.clone())));
            self.status = status;
        }
    }

    fn submit_guess(&mut self) {
        if let Some(outcome) = self.session.submit_guess() {
            tracing::debug!(?outcome, "guess submitted");
        }
    }

    fn play_again(&mut self) {
        if self.session.reset_to_configuration() {
            self.status = "Pick a new topic".to_string();
        }
    }

    fn show_configuration(&mut self, ui: &mut egui::Ui) {
        let editable = self.session.can_generate();

        ui.heading("Spot the fake statement");
        ui.label("Choose a topic and a difficulty. One of the generated statements is false.");
        ui.add_space(12.0);

        let mut submit = false;
        ui.horizontal(|ui| {
            ui.label("Topic");
            let response = ui.add_enabled(
                editable,
                egui::TextEdit::singleline(&mut self.topic_input)
                    .hint_text("e.g. Ancient Rome")
                    .desired_width(280.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
        });

        ui.add_enabled_ui(editable, |ui| {
            egui::ComboBox::from_label("Difficulty")
                .selected_text(self.level.badge())
                .show_ui(ui, |ui| {
                    for level in Level::ALL {
                        ui.selectable_value(&mut self.level, level, level.badge());
                    }
                });
        });

        ui.add_space(8.0);
        let has_topic = !self.topic_input.trim().is_empty();
        if ui
            .add_enabled(editable && has_topic, egui::Button::new("Generate facts"))
            .clicked()
        {
            submit = true;
        }

        if let Some(err) = self.session.error_message() {
            ui.add_space(8.0);
            ui.colored_label(theme::ERROR_TEXT, err);
        }

        if submit {
            self.submit_configuration();
        }
    }

    fn show_loading(&self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Generating facts...");
        });
    }

    fn show_game(&mut self, ui: &mut egui::Ui) {
        if let Some((topic, level)) = self.session.header() {
            ui.horizontal(|ui| {
                ui.heading(topic);
                ui.label(egui::RichText::new(level).strong());
            });
        }
        ui.colored_label(theme::MUTED_TEXT, "Which statement is fake?");
        ui.add_space(8.0);

        ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Wrap);
        let mut clicked = None;
        for option in self.session.options() {
            let mut button = egui::Button::new(option.text)
                .selected(option.mark == game_core::OptionMark::Selected)
                .min_size(egui::vec2(ui.available_width(), FACT_BUTTON_HEIGHT));
            if let Some(fill) = theme::option_fill(option.mark) {
                button = button.fill(fill);
            }
            if ui.add_enabled(option.enabled, button).clicked() {
                clicked = Some(option.index);
            }
        }
        if let Some(index) = clicked {
            self.session.select_fact(index);
        }

        ui.add_space(12.0);
        if ui
            .add_enabled(
                self.session.can_submit_guess(),
                egui::Button::new("Submit guess"),
            )
            .clicked()
        {
            self.submit_guess();
        }
    }

    fn show_feedback(&mut self, ctx: &egui::Context) {
        let Some(feedback) = self.session.feedback() else {
            return;
        };

        let mut dismissed = false;
        egui::Modal::new(egui::Id::new("feedback-modal")).show(ctx, |ui| {
            ui.heading(feedback.title);
            ui.label(feedback.message);
            ui.add_space(8.0);
            if ui.button("Play again").clicked() {
                dismissed = true;
            }
        });

        if dismissed {
            self.play_again();
        }
    }
}

impl eframe::App for FakeFactApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.colored_label(theme::MUTED_TEXT, &self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.session.phase() {
            Phase::Idle => self.show_configuration(ui),
            Phase::Loading => {
                self.show_configuration(ui);
                self.show_loading(ui);
            }
            Phase::Presenting | Phase::Revealed => self.show_game(ui),
        });

        self.show_feedback(ctx);

        if self.session.phase() == Phase::Loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
