//! Traversal walker: the end-user-facing sequential state machine.
//!
//! One walker instance drives a single session through one category's steps,
//! recording the selected option per step. The walker is an explicit state
//! object mutated only through the operations below, so it is testable
//! outside any UI runtime; all of its state is plain, diffable values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::category::Category;
use crate::domain::flow::{FlowCondition, FlowOption, FlowStep, OptionId, StepId};
use crate::domain::repository::{CategoryRepository, FlowRepository};
use crate::CoreError;

/// Walker status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkerStatus {
    /// Steps have not resolved yet. A failed initialize leaves the session
    /// here; the caller renders the error state.
    Loading,

    /// A step is on screen and the walker is waiting for a selection
    AwaitingSelection,

    /// The last step was answered; no further steps are shown
    Completed,
}

/// How the walker picks the next step after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceMode {
    /// Always advance to the next step in `order_index` order. Authored
    /// conditions are ignored during traversal. This is the baseline
    /// behavior.
    Linear,

    /// A condition on the selected option jumps traversal to the position of
    /// its target step. A condition whose target is not among the loaded
    /// steps degrades to linear advance.
    FollowConditions,
}

/// Outcome of recording a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// Traversal moved to the step at `next_index`
    Advanced {
        /// New value of the current index
        next_index: usize,
    },

    /// The last step was answered. Carries one entry per visited step,
    /// keyed by step id.
    Completed {
        /// The full selections mapping
        selections: HashMap<StepId, OptionId>,
    },

    /// The call had no effect: no steps are loaded, or the walker is not
    /// awaiting a selection
    Ignored,
}

/// Ticket for one options fetch.
///
/// Every index change bumps the walker's fetch generation, so a ticket
/// handed out before the change no longer matches and its late-arriving
/// result is discarded instead of applied to the wrong step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsTicket {
    generation: u64,
    step_id: StepId,
}

impl OptionsTicket {
    /// The step this fetch is for
    pub fn step_id(&self) -> &StepId {
        &self.step_id
    }
}

/// Sequential, index-based state machine that presents one step at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalWalker {
    category: Category,
    steps: Vec<FlowStep>,
    conditions: Vec<FlowCondition>,
    current_index: usize,
    options: Vec<FlowOption>,
    selections: HashMap<StepId, OptionId>,
    status: WalkerStatus,
    advance_mode: AdvanceMode,
    options_generation: u64,
}

impl TraversalWalker {
    /// Resolve a category slug and start a session at the first step.
    ///
    /// Fails with [`CoreError::NotFound`] when no category matches the slug.
    /// A category with zero steps is a valid session; selections are then a
    /// no-op. Conditions are only fetched when the mode evaluates them.
    pub async fn initialize(
        categories: &dyn CategoryRepository,
        flows: &dyn FlowRepository,
        slug: &str,
        mode: AdvanceMode,
    ) -> Result<Self, CoreError> {
        let category = categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("category slug: {}", slug)))?;

        let steps = flows.list_steps(&category.id).await?;

        let conditions = match mode {
            AdvanceMode::FollowConditions => flows.list_conditions().await?,
            AdvanceMode::Linear => Vec::new(),
        };

        info!(
            category = %category.slug,
            steps = steps.len(),
            "walker initialized"
        );

        Ok(Self::from_parts(category, steps, conditions, mode))
    }

    /// Build a walker from already-resolved data.
    pub fn from_parts(
        category: Category,
        steps: Vec<FlowStep>,
        conditions: Vec<FlowCondition>,
        mode: AdvanceMode,
    ) -> Self {
        Self {
            category,
            steps,
            conditions,
            current_index: 0,
            options: Vec::new(),
            selections: HashMap::new(),
            status: WalkerStatus::AwaitingSelection,
            advance_mode: mode,
            options_generation: 0,
        }
    }

    /// Current status
    pub fn status(&self) -> WalkerStatus {
        self.status
    }

    /// The category this session walks
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// The ordered steps of the session
    pub fn steps(&self) -> &[FlowStep] {
        &self.steps
    }

    /// Position of the step currently on screen
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The step currently on screen, `None` when the category has no steps
    pub fn current_step(&self) -> Option<&FlowStep> {
        self.steps.get(self.current_index)
    }

    /// Options loaded for the current step
    pub fn options(&self) -> &[FlowOption] {
        &self.options
    }

    /// Selections recorded so far, keyed by step id
    pub fn selections(&self) -> &HashMap<StepId, OptionId> {
        &self.selections
    }

    /// `(position, total)` for a "Step X of Y" readout. `(0, 0)` when the
    /// category has no steps.
    pub fn progress(&self) -> (usize, usize) {
        if self.steps.is_empty() {
            (0, 0)
        } else {
            (self.current_index + 1, self.steps.len())
        }
    }

    /// Hand out a ticket for fetching the current step's options.
    ///
    /// Returns `None` when there is no current step. The caller fetches the
    /// options and hands them back through [`apply_options`], which checks
    /// the ticket against the current generation.
    ///
    /// [`apply_options`]: TraversalWalker::apply_options
    pub fn options_request(&self) -> Option<OptionsTicket> {
        self.current_step().map(|step| OptionsTicket {
            generation: self.options_generation,
            step_id: step.id.clone(),
        })
    }

    /// Apply a resolved options fetch.
    ///
    /// Returns `false` and leaves state untouched when the ticket is stale,
    /// i.e. the current index changed since the ticket was issued. A step
    /// with zero options is terminal-for-input, not an error.
    pub fn apply_options(&mut self, ticket: &OptionsTicket, options: Vec<FlowOption>) -> bool {
        if ticket.generation != self.options_generation {
            debug!(step = %ticket.step_id.0, "discarding stale options fetch");
            return false;
        }

        self.options = options;
        true
    }

    /// Fetch and apply the options for the current step.
    ///
    /// Convenience wrapper over [`options_request`] and [`apply_options`]
    /// for callers that do not interleave fetches. No-op when the category
    /// has no steps.
    ///
    /// [`options_request`]: TraversalWalker::options_request
    /// [`apply_options`]: TraversalWalker::apply_options
    pub async fn load_current_options(
        &mut self,
        flows: &dyn FlowRepository,
    ) -> Result<(), CoreError> {
        let ticket = match self.options_request() {
            Some(ticket) => ticket,
            None => return Ok(()),
        };

        let options = flows.list_options(&ticket.step_id).await?;
        self.apply_options(&ticket, options);

        Ok(())
    }

    /// Record a selection for the current step and determine the next
    /// position.
    ///
    /// On the last step this transitions to `Completed` and carries the full
    /// selections mapping regardless of advance mode. Calls outside
    /// `AwaitingSelection`, or with no steps loaded, are ignored.
    pub fn select_option(&mut self, option_id: OptionId) -> SelectionOutcome {
        if self.status != WalkerStatus::AwaitingSelection {
            return SelectionOutcome::Ignored;
        }

        let step = match self.steps.get(self.current_index) {
            Some(step) => step,
            None => return SelectionOutcome::Ignored,
        };

        let step_id = step.id.clone();
        debug!(step = %step_id.0, option = %option_id.0, "selection recorded");
        self.selections.insert(step_id, option_id.clone());

        if self.current_index + 1 >= self.steps.len() {
            self.status = WalkerStatus::Completed;
            info!(
                category = %self.category.slug,
                answered = self.selections.len(),
                "traversal completed"
            );
            return SelectionOutcome::Completed {
                selections: self.selections.clone(),
            };
        }

        let next_index = match self.advance_mode {
            AdvanceMode::Linear => self.current_index + 1,
            AdvanceMode::FollowConditions => self
                .condition_target(&option_id)
                .unwrap_or(self.current_index + 1),
        };

        self.move_to(next_index);
        SelectionOutcome::Advanced {
            next_index: self.current_index,
        }
    }

    /// Step back one position. No-op at index 0 and outside
    /// `AwaitingSelection`. Revisiting a step does not erase the recorded
    /// choice unless it is re-selected.
    pub fn go_to_previous(&mut self) {
        if self.status != WalkerStatus::AwaitingSelection || self.current_index == 0 {
            return;
        }

        self.move_to(self.current_index - 1);
    }

    /// Position of the authored jump target for an option, if a condition
    /// exists and its target is among the loaded steps.
    fn condition_target(&self, option_id: &OptionId) -> Option<usize> {
        let condition = self
            .conditions
            .iter()
            .find(|condition| &condition.option_id == option_id)?;

        self.steps
            .iter()
            .position(|step| step.id == condition.next_step_id)
    }

    fn move_to(&mut self, index: usize) {
        self.current_index = index;
        // Any in-flight fetch now belongs to an abandoned step.
        self.options_generation += 1;
        self.options.clear();
    }
}
