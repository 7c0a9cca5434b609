//! # Multi-Step Form Workflow
//!
//! Three-step checkout-style form: contact, address, payment.
//! Steps are numbered from 1; navigation is clamped to `1..=FORM_STEP_COUNT`.

use crate::models::user::validate_email;
use crate::notify::Notifier;
use crate::primitives::FORM_STEP_COUNT;
use crate::RosterError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Step 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Step 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

/// Step 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub payment_method: String,
    pub terms: bool,
}

/// Data for one step; the variant determines which step it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum StepData {
    Contact(ContactDetails),
    Address(ShippingAddress),
    Payment(PaymentDetails),
}

impl StepData {
    /// 1-based step number this data belongs to.
    #[must_use]
    pub const fn step(&self) -> u8 {
        match self {
            Self::Contact(_) => 1,
            Self::Address(_) => 2,
            Self::Payment(_) => 3,
        }
    }
}

/// Collected form data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub contact: Option<ContactDetails>,
    pub address: Option<ShippingAddress>,
    pub payment: Option<PaymentDetails>,
}

impl FormData {
    fn validate(&self) -> Result<(), RosterError> {
        let contact = self
            .contact
            .as_ref()
            .ok_or_else(|| RosterError::Validation("Contact details are missing".into()))?;
        if contact.first_name.trim().is_empty() || contact.last_name.trim().is_empty() {
            return Err(RosterError::Validation("Name is required".into()));
        }
        validate_email(&contact.email)?;

        let address = self
            .address
            .as_ref()
            .ok_or_else(|| RosterError::Validation("Shipping address is missing".into()))?;
        if [&address.address, &address.city, &address.zip_code]
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err(RosterError::Validation("Address is incomplete".into()));
        }

        let payment = self
            .payment
            .as_ref()
            .ok_or_else(|| RosterError::Validation("Payment details are missing".into()))?;
        if payment.payment_method.trim().is_empty() {
            return Err(RosterError::Validation("Payment method is required".into()));
        }
        if !payment.terms {
            return Err(RosterError::Validation("Terms must be accepted".into()));
        }
        Ok(())
    }
}

/// The multi-step form state machine.
pub struct FormWorkflow {
    current_step: u8,
    data: FormData,
    is_complete: bool,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for FormWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormWorkflow")
            .field("current_step", &self.current_step)
            .field("data", &self.data)
            .field("is_complete", &self.is_complete)
            .finish_non_exhaustive()
    }
}

impl FormWorkflow {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            current_step: 1,
            data: FormData::default(),
            is_complete: false,
            notifier,
        }
    }

    #[must_use]
    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    #[must_use]
    pub fn data(&self) -> &FormData {
        &self.data
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Jump to `step`. Steps outside `1..=3` are ignored.
    pub fn set_step(&mut self, step: u8) -> bool {
        if (1..=FORM_STEP_COUNT).contains(&step) {
            self.current_step = step;
            true
        } else {
            false
        }
    }

    /// Store the data of one step, replacing what was there.
    pub fn update_step(&mut self, data: StepData) {
        match data {
            StepData::Contact(c) => self.data.contact = Some(c),
            StepData::Address(a) => self.data.address = Some(a),
            StepData::Payment(p) => self.data.payment = Some(p),
        }
    }

    pub fn next_step(&mut self) {
        if self.current_step < FORM_STEP_COUNT {
            self.current_step += 1;
        }
    }

    pub fn previous_step(&mut self) {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
    }

    /// Validate the collected data and hand it to `submission`.
    ///
    /// On success the form is marked complete.
    pub async fn submit<F>(&mut self, submission: F) -> Result<(), RosterError>
    where
        F: Future<Output = Result<(), RosterError>>,
    {
        let result = match self.data.validate() {
            Ok(()) => submission.await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                self.is_complete = true;
                self.notifier.success("Form submitted successfully!");
                Ok(())
            }
            Err(e) => {
                self.notifier.error("Failed to submit form");
                Err(e)
            }
        }
    }

    /// Back to step 1 with no data.
    pub fn reset(&mut self) {
        self.current_step = 1;
        self.data = FormData::default();
        self.is_complete = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================
