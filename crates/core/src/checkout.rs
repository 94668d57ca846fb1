//! The checkout wizard state machine.
//!
//! A linear three-step wizard: contact information, payment method
//! selection, then payment-proof upload and submission. Forward movement is
//! gated cumulatively, so step N+1 stays unreachable while any gate up to
//! step N is unmet; backward movement is unconditional and never resets
//! entered values. `Placed` is the single terminal state.
//!
//! The machine is pure data + functions so it can be unit tested without
//! rendering anything; the storefront keeps a [`CheckoutForm`] in the
//! session and drives it from route handlers.

use serde::{Deserialize, Serialize};

use crate::types::PaymentMethod;

/// Minimum accepted phone number length, in characters.
///
/// Deliberately loose: the original flow never validated phone format
/// beyond this, and we keep that contract.
pub const MIN_PHONE_LEN: usize = 7;

/// The wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Information,
    Payment,
    Confirm,
    Placed,
}

impl CheckoutStep {
    /// 1-based step number shown in the progress header.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Information => 1,
            Self::Payment => 2,
            Self::Confirm => 3,
            Self::Placed => 4,
        }
    }

    /// The step reached by pressing "back". Unconditional; the first step
    /// and the terminal state stay put.
    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::Information | Self::Payment => Self::Information,
            Self::Confirm => Self::Payment,
            Self::Placed => Self::Placed,
        }
    }
}

/// Contact details entered on step one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// An uploaded payment proof that already passed the upload policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof {
    /// Public URL of the stored screenshot.
    pub url: String,
}

/// Everything the shopper has entered so far. Values survive back
/// navigation; re-entering a step shows what was previously typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub contact: ContactInfo,
    pub payment_method: Option<PaymentMethod>,
    pub proof: Option<PaymentProof>,
}

/// Why a forward transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("please enter your name, email and phone number")]
    IncompleteContact,
    #[error("please choose a payment method")]
    NoPaymentMethod,
    #[error("please attach your payment screenshot")]
    NoPaymentProof,
    #[error("this order has already been placed")]
    AlreadyPlaced,
}

impl CheckoutForm {
    /// Step 1 gate: name and email non-empty, phone at least
    /// [`MIN_PHONE_LEN`] characters. No format validation beyond that.
    #[must_use]
    pub fn information_valid(&self) -> bool {
        !self.contact.name.trim().is_empty()
            && !self.contact.email.trim().is_empty()
            && self.contact.phone.trim().chars().count() >= MIN_PHONE_LEN
    }

    /// Step 2 gate: a payment method is selected.
    #[must_use]
    pub const fn payment_valid(&self) -> bool {
        self.payment_method.is_some()
    }

    /// Step 3 gate: a payment proof is attached.
    #[must_use]
    pub const fn confirm_valid(&self) -> bool {
        self.proof.is_some()
    }

    /// Whether the form satisfies every gate up to and including `step`'s
    /// entry requirements. Step N+1 is unreachable unless step N holds.
    #[must_use]
    pub fn can_enter(&self, step: CheckoutStep) -> bool {
        match step {
            CheckoutStep::Information => true,
            CheckoutStep::Payment => self.information_valid(),
            CheckoutStep::Confirm => self.information_valid() && self.payment_valid(),
            CheckoutStep::Placed => {
                self.information_valid() && self.payment_valid() && self.confirm_valid()
            }
        }
    }

    /// Attempt the forward transition out of `step`.
    ///
    /// Gates are cumulative: advancing out of a later step re-checks every
    /// earlier gate, so a crafted request against step N cannot reach step
    /// N+1 while an earlier step is still incomplete.
    ///
    /// # Errors
    ///
    /// Returns the earliest gate that failed; the caller stays put.
    pub fn advance(&self, step: CheckoutStep) -> Result<CheckoutStep, StepError> {
        if step == CheckoutStep::Placed {
            return Err(StepError::AlreadyPlaced);
        }
        if !self.information_valid() {
            return Err(StepError::IncompleteContact);
        }
        if step == CheckoutStep::Information {
            return Ok(CheckoutStep::Payment);
        }
        if !self.payment_valid() {
            return Err(StepError::NoPaymentMethod);
        }
        if step == CheckoutStep::Payment {
            return Ok(CheckoutStep::Confirm);
        }
        if self.confirm_valid() {
            Ok(CheckoutStep::Placed)
        } else {
            Err(StepError::NoPaymentProof)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_contact() -> ContactInfo {
        ContactInfo {
            name: "Sita Sharma".to_owned(),
            email: "sita@example.com".to_owned(),
            phone: "9841000000".to_owned(),
        }
    }

    #[test]
    fn test_empty_name_blocks_step_two() {
        let form = CheckoutForm {
            contact: ContactInfo {
                name: String::new(),
                email: "sita@example.com".to_owned(),
                phone: "9841000000".to_owned(),
            },
            ..CheckoutForm::default()
        };

        // Attempting to reach step 2 leaves the wizard on step 1.
        assert_eq!(
            form.advance(CheckoutStep::Information),
            Err(StepError::IncompleteContact)
        );
        assert!(!form.can_enter(CheckoutStep::Payment));
    }

    #[test]
    fn test_short_phone_blocks_step_two() {
        let form = CheckoutForm {
            contact: ContactInfo {
                name: "Sita".to_owned(),
                email: "sita@example.com".to_owned(),
                phone: "123456".to_owned(),
            },
            ..CheckoutForm::default()
        };
        assert_eq!(
            form.advance(CheckoutStep::Information),
            Err(StepError::IncompleteContact)
        );
    }

    #[test]
    fn test_valid_contact_advances() {
        let form = CheckoutForm {
            contact: filled_contact(),
            ..CheckoutForm::default()
        };
        assert_eq!(
            form.advance(CheckoutStep::Information),
            Ok(CheckoutStep::Payment)
        );
    }

    #[test]
    fn test_payment_step_requires_method() {
        let mut form = CheckoutForm {
            contact: filled_contact(),
            ..CheckoutForm::default()
        };
        assert_eq!(
            form.advance(CheckoutStep::Payment),
            Err(StepError::NoPaymentMethod)
        );

        form.payment_method = Some(PaymentMethod::Esewa);
        assert_eq!(
            form.advance(CheckoutStep::Payment),
            Ok(CheckoutStep::Confirm)
        );
    }

    #[test]
    fn test_confirm_step_requires_proof() {
        let mut form = CheckoutForm {
            contact: filled_contact(),
            payment_method: Some(PaymentMethod::Khalti),
            ..CheckoutForm::default()
        };
        assert_eq!(
            form.advance(CheckoutStep::Confirm),
            Err(StepError::NoPaymentProof)
        );

        form.proof = Some(PaymentProof {
            url: "/uploads/proofs/abc.png".to_owned(),
        });
        assert_eq!(form.advance(CheckoutStep::Confirm), Ok(CheckoutStep::Placed));
    }

    #[test]
    fn test_later_step_submit_cannot_skip_earlier_gates() {
        // A crafted POST against step 2 with step 1 never completed.
        let form = CheckoutForm {
            payment_method: Some(PaymentMethod::Esewa),
            ..CheckoutForm::default()
        };

        assert!(!form.can_enter(CheckoutStep::Confirm));
        assert_eq!(
            form.advance(CheckoutStep::Payment),
            Err(StepError::IncompleteContact)
        );
        // Same for step 3 with both earlier steps incomplete.
        assert_eq!(
            CheckoutForm::default().advance(CheckoutStep::Confirm),
            Err(StepError::IncompleteContact)
        );
    }

    #[test]
    fn test_placed_is_terminal() {
        let form = CheckoutForm {
            contact: filled_contact(),
            payment_method: Some(PaymentMethod::Esewa),
            proof: Some(PaymentProof {
                url: "/uploads/proofs/abc.png".to_owned(),
            }),
        };
        assert_eq!(
            form.advance(CheckoutStep::Placed),
            Err(StepError::AlreadyPlaced)
        );
        assert_eq!(CheckoutStep::Placed.back(), CheckoutStep::Placed);
    }

    #[test]
    fn test_back_is_unconditional_and_preserves_values() {
        let form = CheckoutForm {
            contact: filled_contact(),
            payment_method: Some(PaymentMethod::Connectips),
            ..CheckoutForm::default()
        };

        assert_eq!(CheckoutStep::Confirm.back(), CheckoutStep::Payment);
        assert_eq!(CheckoutStep::Payment.back(), CheckoutStep::Information);
        assert_eq!(CheckoutStep::Information.back(), CheckoutStep::Information);

        // Back navigation does not touch the form; values survive.
        assert_eq!(form.payment_method, Some(PaymentMethod::Connectips));
        assert_eq!(form.contact, filled_contact());
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(CheckoutStep::Information.number(), 1);
        assert_eq!(CheckoutStep::Payment.number(), 2);
        assert_eq!(CheckoutStep::Confirm.number(), 3);
    }
}
