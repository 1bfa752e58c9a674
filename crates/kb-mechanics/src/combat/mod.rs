//! Combat state machine.
//!
//! A fight is `Ongoing` until it reaches one of three terminal outcomes.
//! Each round the player acts first; unless they fled or the foe fell, the
//! foe then retaliates. The fight is always resolved before control goes
//! back to the narrative.

pub mod action;

pub use action::{CombatAction, CombatEvent, CombatEventKind};

use kb_core::{CoreResult, Fact, RandomSource, SessionState, Shell, choose_checked};
use serde::Serialize;
use tracing::debug;

use crate::config::CombatConfig;

/// The opponent in an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Foe {
    /// Display name.
    pub name: String,
    /// Starting health.
    pub health: i32,
}

impl Foe {
    /// Create a foe.
    pub fn new(name: impl Into<String>, health: i32) -> Self {
        Self {
            name: name.into(),
            health,
        }
    }
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    /// The foe's health reached zero.
    PlayerWon,
    /// The player ran.
    PlayerFled,
    /// The player's health reached zero. They have been revived.
    PlayerDefeated,
}

/// The state of one encounter.
#[derive(Debug, Clone)]
pub struct Combat {
    foe: Foe,
    enemy_health: i32,
    round: u32,
    outcome: Option<CombatOutcome>,
    config: CombatConfig,
    /// Log of all combat events.
    pub log: Vec<CombatEvent>,
}

impl Combat {
    /// Start an encounter against `foe`.
    pub fn new(foe: Foe, config: CombatConfig) -> Self {
        Self {
            enemy_health: foe.health,
            foe,
            round: 0,
            outcome: None,
            config,
            log: Vec::new(),
        }
    }

    /// The opponent.
    pub fn foe(&self) -> &Foe {
        &self.foe
    }

    /// The foe's remaining health. May be negative once it has fallen.
    pub fn enemy_health(&self) -> i32 {
        self.enemy_health
    }

    /// Rounds played so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The terminal outcome, once reached.
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    /// True once a terminal outcome has been reached.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Events recorded during a given round.
    pub fn events_in_round(&self, round: u32) -> impl Iterator<Item = &CombatEvent> {
        self.log.iter().filter(move |e| e.round == round)
    }

    /// Play one round with the player's chosen action.
    ///
    /// Returns the outcome if this round ended the fight. Once the fight is
    /// over, further calls change nothing and return the same outcome.
    pub fn play_round(
        &mut self,
        action: CombatAction,
        state: &mut SessionState,
        rng: &mut dyn RandomSource,
    ) -> Option<CombatOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        self.round += 1;

        if !state.is_alive() {
            return self.defeat(state);
        }

        let mut warded = false;
        match action {
            CombatAction::Attack => {
                let armed = state.has(Fact::Item(self.config.weapon));
                let range = if armed {
                    self.config.armed_attack
                } else {
                    self.config.unarmed_attack
                };
                let damage = range.roll(rng);
                self.enemy_health = self.enemy_health.saturating_sub_unsigned(damage);
                self.record(CombatEventKind::PlayerStrike { damage, armed });
            }
            CombatAction::DefendWithCharm => {
                if state.has(Fact::Item(self.config.charm)) {
                    warded = true;
                    self.record(CombatEventKind::CharmRaised);
                } else {
                    let damage = self.config.charm_penalty.roll(rng);
                    state.damage(damage);
                    self.record(CombatEventKind::CharmMissing { damage });
                }
            }
            CombatAction::Flee => {
                self.record(CombatEventKind::Fled);
                return self.finish(CombatOutcome::PlayerFled);
            }
            CombatAction::Brace => {
                let damage = self.config.brace.roll(rng);
                state.damage(damage);
                self.record(CombatEventKind::Braced { damage });
            }
        }

        if self.enemy_health <= 0 {
            self.record(CombatEventKind::FoeFell);
            return self.finish(CombatOutcome::PlayerWon);
        }

        if warded {
            self.record(CombatEventKind::FoeWarded);
        } else {
            let damage = self.config.retaliation.roll(rng);
            state.damage(damage);
            self.record(CombatEventKind::FoeStrike { damage });
        }

        if state.is_alive() {
            None
        } else {
            self.defeat(state)
        }
    }

    /// Run the fight to completion, asking the shell for each action.
    pub fn run(
        &mut self,
        state: &mut SessionState,
        shell: &mut dyn Shell,
        rng: &mut dyn RandomSource,
    ) -> CoreResult<CombatOutcome> {
        shell.present(&format!(
            "The fight begins!\n\n{} HP: {}\nYour HP: {}",
            self.foe.name,
            self.enemy_health,
            state.health()
        ));

        let options: Vec<String> = CombatAction::ALL
            .iter()
            .map(|a| a.label().to_string())
            .collect();

        loop {
            let index = choose_checked(shell, &options)?;
            let action = CombatAction::ALL[index];
            let outcome = self.play_round(action, state, rng);

            let narration: Vec<String> = self
                .events_in_round(self.round)
                .map(|e| e.describe(&self.foe.name))
                .collect();
            shell.present(&narration.join("\n"));

            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
            shell.present(&format!(
                "{} HP: {} | Your HP: {}",
                self.foe.name,
                self.enemy_health,
                state.health()
            ));
        }
    }

    fn defeat(&mut self, state: &mut SessionState) -> Option<CombatOutcome> {
        let recovered_to = state.revive(self.config.recovery_health);
        self.record(CombatEventKind::PlayerFell { recovered_to });
        self.finish(CombatOutcome::PlayerDefeated)
    }

    fn finish(&mut self, outcome: CombatOutcome) -> Option<CombatOutcome> {
        debug!(
            foe = %self.foe.name,
            rounds = self.round,
            enemy_health = self.enemy_health,
            ?outcome,
            "combat resolved"
        );
        self.outcome = Some(outcome);
        self.outcome
    }

    fn record(&mut self, kind: CombatEventKind) {
        self.log.push(CombatEvent {
            round: self.round,
            kind,
        });
    }
}
