//! Game session controller: owns the round state and applies user actions
//! and the one asynchronous generation result to it.

use shared::{
    domain::{Fact, Level},
    protocol::{GenerateRequest, GenerateResponse},
};
use tracing::{debug, info, warn};

use crate::error::{generation_failure_message, GenerateError, RoundError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Configuration form is editable.
    Idle,
    /// A generation request is in flight; the trigger is disabled.
    Loading,
    /// Facts are on screen and can be selected.
    Presenting,
    /// The guess was submitted and the outcome is shown.
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

impl GuessOutcome {
    pub fn is_correct(self) -> bool {
        self == GuessOutcome::Correct
    }

    pub fn title(self) -> &'static str {
        match self {
            GuessOutcome::Correct => "🥳 Correct!",
            GuessOutcome::Incorrect => "😔 Incorrect",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GuessOutcome::Correct => "You successfully identified the fake statement. Great work!",
            GuessOutcome::Incorrect => "That was a true statement. Better luck next time!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub selected_index: usize,
    pub fake_index: usize,
    pub outcome: GuessOutcome,
}

/// How a single option is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,
    CorrectResult,
    WrongResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactOption<'a> {
    pub index: usize,
    pub text: &'a str,
    pub mark: OptionMark,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub title: &'static str,
    pub message: &'static str,
    pub outcome: GuessOutcome,
}

/// State of the round currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    topic: String,
    level: Level,
    facts: Vec<Fact>,
    fake_index: usize,
    selected_index: Option<usize>,
    reveal: Option<Reveal>,
}

impl GameState {
    pub fn from_response(payload: GenerateResponse) -> Result<Self, RoundError> {
        if payload.facts.is_empty() {
            return Err(RoundError::NoFacts);
        }
        let len = payload.facts.len();
        let fake_index = usize::try_from(payload.fake_index)
            .ok()
            .filter(|index| *index < len)
            .ok_or(RoundError::FakeIndexOutOfRange {
                index: payload.fake_index,
                len,
            })?;

        Ok(Self {
            topic: payload.topic,
            level: payload.level,
            facts: payload.facts,
            fake_index,
            selected_index: None,
            reveal: None,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn fake_index(&self) -> usize {
        self.fake_index
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn reveal(&self) -> Option<Reveal> {
        self.reveal
    }

    fn mark_for(&self, index: usize) -> OptionMark {
        match self.reveal {
            Some(reveal) if index == reveal.selected_index => match reveal.outcome {
                GuessOutcome::Correct => OptionMark::CorrectResult,
                GuessOutcome::Incorrect => OptionMark::WrongResult,
            },
            Some(reveal) if index == reveal.fake_index => OptionMark::CorrectResult,
            Some(_) => OptionMark::Plain,
            None if self.selected_index == Some(index) => OptionMark::Selected,
            None => OptionMark::Plain,
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    phase: Phase,
    round: Option<GameState>,
    error: Option<String>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            round: None,
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_generate(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn can_submit_guess(&self) -> bool {
        self.phase == Phase::Presenting
            && self
                .round
                .as_ref()
                .is_some_and(|round| round.selected_index.is_some())
    }

    /// Topic and uppercase level of the round on screen.
    pub fn header(&self) -> Option<(&str, String)> {
        self.round
            .as_ref()
            .map(|round| (round.topic.as_str(), round.level.badge()))
    }

    pub fn options(&self) -> Vec<FactOption<'_>> {
        let Some(round) = self.round.as_ref() else {
            return Vec::new();
        };
        let enabled = self.phase == Phase::Presenting;
        round
            .facts
            .iter()
            .enumerate()
            .map(|(index, fact)| FactOption {
                index,
                text: &fact.text,
                mark: round.mark_for(index),
                enabled,
            })
            .collect()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        if self.phase != Phase::Revealed {
            return None;
        }
        let reveal = self.round.as_ref()?.reveal?;
        Some(Feedback {
            title: reveal.outcome.title(),
            message: reveal.outcome.message(),
            outcome: reveal.outcome,
        })
    }

    /// Starts a generation round. Returns the request the caller must send,
    /// or `None` when the topic is blank or a request is already pending.
    pub fn submit_configuration(&mut self, topic: &str, level: Level) -> Option<GenerateRequest> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }
        if self.phase != Phase::Idle {
            debug!(phase = ?self.phase, "ignoring configuration submit outside idle");
            return None;
        }

        self.phase = Phase::Loading;
        self.error = None;
        self.round = None;
        info!(topic, %level, "requesting facts");
        Some(GenerateRequest {
            topic: topic.to_string(),
            level,
        })
    }

    /// Applies the outcome of the request issued by `submit_configuration`.
    pub fn complete_generation(&mut self, result: Result<GenerateResponse, GenerateError>) {
        if self.phase != Phase::Loading {
            debug!(phase = ?self.phase, "dropping generation result with no pending request");
            return;
        }
        match result {
            Ok(payload) => self.start_game(payload),
            Err(err) => {
                warn!(error = %err, "fact generation failed");
                self.fail(err.user_message());
            }
        }
    }

    pub fn start_game(&mut self, payload: GenerateResponse) {
        match GameState::from_response(payload) {
            Ok(round) => {
                debug!(
                    topic = round.topic(),
                    facts = round.facts.len(),
                    "presenting round"
                );
                self.round = Some(round);
                self.error = None;
                self.phase = Phase::Presenting;
            }
            Err(err) => {
                warn!(error = %err, "rejecting generated round");
                self.fail(generation_failure_message(&err.to_string()));
            }
        }
    }

    /// Marks `index` as the single selected option.
    pub fn select_fact(&mut self, index: usize) -> bool {
        if self.phase != Phase::Presenting {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if index >= round.facts.len() {
            return false;
        }
        round.selected_index = Some(index);
        true
    }

    /// Locks the round and reveals the outcome. No-op without a selection or
    /// after the first call.
    pub fn submit_guess(&mut self) -> Option<GuessOutcome> {
        if self.phase != Phase::Presenting {
            return None;
        }
        let round = self.round.as_mut()?;
        let selected_index = round.selected_index?;

        let outcome = if selected_index == round.fake_index {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Incorrect
        };
        round.reveal = Some(Reveal {
            selected_index,
            fake_index: round.fake_index,
            outcome,
        });
        self.phase = Phase::Revealed;
        info!(selected_index, fake_index = round.fake_index, ?outcome, "guess revealed");
        Some(outcome)
    }

    /// Dismisses the result and returns to the configuration form.
    pub fn reset_to_configuration(&mut self) -> bool {
        if self.phase != Phase::Revealed {
            return false;
        }
        self.round = None;
        self.error = None;
        self.phase = Phase::Idle;
        true
    }

    fn fail(&mut self, message: String) {
        self.round = None;
        self.error = Some(message);
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
