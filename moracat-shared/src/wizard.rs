//! Signup wizard state machine
//!
//! New customers go through three steps before landing on the dashboard:
//!
//! ```text
//! Credentials ──submit──▶ PetProfile ──submit──▶ Subscription ──submit──▶ Done
//!      ▲                      │  ▲                     │
//!      └──────── back ────────┘  └─────── back ────────┘
//! ```
//!
//! A step is submitted only after the server has accepted and persisted it,
//! so the caller advances the wizard from its success path. Going back never
//! discards what was entered on any step. Nothing here is persisted: a fresh
//! page load starts a fresh wizard.
//!
//! # Example
//!
//! ```
//! use moracat_shared::pricing::AddOn;
//! use moracat_shared::wizard::{CredentialsDraft, PetDraft, SignupWizard, WizardStep};
//!
//! # fn example() -> Result<(), moracat_shared::wizard::WizardError> {
//! let mut wizard = SignupWizard::new();
//! wizard.submit_credentials(CredentialsDraft {
//!     username: "layla".to_string(),
//!     email: "layla@example.com".to_string(),
//!     full_name: None,
//! })?;
//! wizard.submit_pet(PetDraft { name: "Mishmish".to_string(), ..PetDraft::default() })?;
//!
//! wizard.selection_mut().toggle_addon(AddOn::Treats);
//! assert_eq!(wizard.selection().total(), 315);
//!
//! wizard.submit_subscription()?;
//! assert_eq!(wizard.step(), WizardStep::Done);
//! assert_eq!(wizard.redirect(), Some("/dashboard"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::models::pet::DietaryPreferences;
use crate::pricing::SubscriptionSelection;

/// Where the wizard sends the customer once finished
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Step 1: account credentials
    Credentials,

    /// Step 2: pet profile
    PetProfile,

    /// Step 3: plan and add-ons
    Subscription,

    /// Finished, redirect to the dashboard
    Done,
}

impl WizardStep {
    /// 1-based step number shown to the customer (Done is 4)
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Credentials => 1,
            WizardStep::PetProfile => 2,
            WizardStep::Subscription => 3,
            WizardStep::Done => 4,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::Credentials => Some(WizardStep::PetProfile),
            WizardStep::PetProfile => Some(WizardStep::Subscription),
            WizardStep::Subscription => Some(WizardStep::Done),
            WizardStep::Done => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardStep::PetProfile => Some(WizardStep::Credentials),
            WizardStep::Subscription => Some(WizardStep::PetProfile),
            WizardStep::Credentials | WizardStep::Done => None,
        }
    }
}

/// Error type for wizard transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// A step was submitted while the wizard was elsewhere
    #[error("cannot submit {attempted:?} while at {current:?}")]
    OutOfOrder {
        current: WizardStep,
        attempted: WizardStep,
    },

    /// `back` from the first step or after finishing
    #[error("cannot go back from {0:?}")]
    NoPreviousStep(WizardStep),
}

/// Values entered on the credentials step
///
/// Holds no password; that is only ever sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsDraft {
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Values entered on the pet profile step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetDraft {
    pub name: String,
    pub breed: String,
    pub age: i32,
    pub weight: f64,
    pub gender: String,
    pub dietary_preferences: DietaryPreferences,
}

/// Three-step signup flow
#[derive(Debug, Clone, PartialEq)]
pub struct SignupWizard {
    step: WizardStep,
    credentials: Option<CredentialsDraft>,
    pet: Option<PetDraft>,
    selection: SubscriptionSelection,
}

impl Default for SignupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Credentials,
            credentials: None,
            pet: None,
            selection: SubscriptionSelection::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn credentials(&self) -> Option<&CredentialsDraft> {
        self.credentials.as_ref()
    }

    pub fn pet(&self) -> Option<&PetDraft> {
        self.pet.as_ref()
    }

    pub fn selection(&self) -> &SubscriptionSelection {
        &self.selection
    }

    /// Plan and add-ons can be changed at any point before finishing
    pub fn selection_mut(&mut self) -> &mut SubscriptionSelection {
        &mut self.selection
    }

    /// Records accepted credentials and moves to the pet profile step
    pub fn submit_credentials(&mut self, draft: CredentialsDraft) -> Result<WizardStep, WizardError> {
        self.advance_from(WizardStep::Credentials)?;
        self.credentials = Some(draft);
        Ok(self.step)
    }

    /// Records the accepted pet profile and moves to the subscription step
    pub fn submit_pet(&mut self, draft: PetDraft) -> Result<WizardStep, WizardError> {
        self.advance_from(WizardStep::PetProfile)?;
        self.pet = Some(draft);
        Ok(self.step)
    }

    /// Finishes the wizard once the subscription has been created
    pub fn submit_subscription(&mut self) -> Result<WizardStep, WizardError> {
        self.advance_from(WizardStep::Subscription)?;
        Ok(self.step)
    }

    /// Retreats one step, keeping every draft
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let previous = self
            .step
            .previous()
            .ok_or(WizardError::NoPreviousStep(self.step))?;
        self.step = previous;
        Ok(self.step)
    }

    /// Dashboard path once finished
    pub fn redirect(&self) -> Option<&'static str> {
        (self.step == WizardStep::Done).then_some(DASHBOARD_PATH)
    }

    /// Starts over with empty drafts
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn advance_from(&mut self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step != expected {
            return Err(WizardError::OutOfOrder {
                current: self.step,
                attempted: expected,
            });
        }
        // Only Done has no successor and it is never an expected step
        self.step = expected.next().unwrap_or(WizardStep::Done);
        Ok(())
    }
}
