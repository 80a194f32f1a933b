//! Checkout capture: the shipping form, the price quote, and the validation
//! gate an order must pass before payment.
//!
//! Everything here is pure. The server stages validated checkouts as draft
//! rows and finalizes them after payment-proof upload; this module only knows
//! how to quote and validate.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::{PaymentMethod, Rupees};

/// Flat delivery fee charged on any non-empty cart.
pub const SHIPPING_FEE: Rupees = Rupees::new(200);

/// Advance the shopper transfers manually before the order is verified.
pub const ADVANCE_AMOUNT: Rupees = Rupees::new(250);

/// Shipping and payment details collected at checkout.
///
/// Every field defaults to empty so a partially filled form deserializes
/// without error; [`validate`] decides what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Trim every free-text field in place.
    pub fn trim(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.phone,
            &mut self.email,
            &mut self.address,
            &mut self.city,
            &mut self.postal,
        ] {
            *field = field.trim().to_owned();
        }
    }
}

/// The quoted totals for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Rupees,
    pub shipping: Rupees,
    pub total: Rupees,
}

/// Quote a cart: subtotal over all lines, flat shipping fee when the cart is
/// non-empty, total as their sum.
#[must_use]
pub fn compute_totals(cart: &Cart) -> Totals {
    let subtotal = cart.subtotal();
    let shipping = if cart.is_empty() {
        Rupees::ZERO
    } else {
        SHIPPING_FEE
    };
    Totals {
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

/// A required shipping field, in the order the form is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    FirstName,
    LastName,
    Phone,
    Address,
    City,
}

impl RequiredField {
    /// The camelCase wire name of the field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
        }
    }

    /// The message shown when the field is missing.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::FirstName => "First name is required",
            Self::LastName => "Last name is required",
            Self::Phone => "Phone number is required",
            Self::Address => "Address is required",
            Self::City => "City is required",
        }
    }
}

/// Why a checkout cannot proceed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required shipping field is blank.
    #[error("{}", .0.message())]
    MissingField(RequiredField),
    /// There is nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,
}

/// Gate a checkout: the five required shipping fields are checked in a fixed
/// order and the first blank one wins, then the cart must be non-empty.
/// Email and postal code are optional.
///
/// # Errors
///
/// Returns the first failing [`CheckoutError`].
pub fn validate(form: &CheckoutForm, cart: &Cart) -> Result<(), CheckoutError> {
    let required = [
        (RequiredField::FirstName, &form.first_name),
        (RequiredField::LastName, &form.last_name),
        (RequiredField::Phone, &form.phone),
        (RequiredField::Address, &form.address),
        (RequiredField::City, &form.city),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(field));
        }
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(())
}
