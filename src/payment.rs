//! Simulated card payment.
//!
//! No gateway is involved: the form is validated, the configured processing
//! delay elapses, and a receipt with a fresh booking reference comes back.

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ValidationError;
use crate::util::datetime;
use crate::util::money::Cop;

pub const MAX_CARD_DIGITS: usize = 16;
pub const MIN_CARD_DIGITS: usize = 13;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentForm {
    pub card_number: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,
}

impl PaymentForm {
    /// # Errors
    ///
    /// Returns the first failing rule: card number, expiry, CVV, then name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let card = self.card_number.replace(' ', "");
        if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&card.len()) || !all_digits(&card) {
            return Err(ValidationError::InvalidCardNumber);
        }
        if !valid_expiry(self.expiry_date.trim()) {
            return Err(ValidationError::InvalidExpiry);
        }
        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !all_digits(cvv) {
            return Err(ValidationError::InvalidCvv);
        }
        if self.card_name.trim().is_empty() {
            return Err(ValidationError::MissingCardName);
        }
        Ok(())
    }

    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

fn all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn valid_expiry(raw: &str) -> bool {
    let Some((month, year)) = raw.split_once('/') else {
        return false;
    };
    month.len() == 2
        && year.len() == 2
        && all_digits(year)
        && month.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m))
}

/// Strip everything but digits, keep the first sixteen, and group by four:
/// `"4111-1111 1111 1111 99"` → `"4111 1111 1111 1111"`.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_CARD_DIGITS)
        .collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `AC` followed by the last six digits of the millisecond clock.
pub fn booking_reference(now: OffsetDateTime) -> String {
    format!("AC{:06}", datetime::unix_millis(now).rem_euclid(1_000_000))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub booking_reference: String,
    pub amount: Cop,
    pub card_last_four: String,
    pub paid_at: String,
}

/// Validate `form`, wait out the processing `delay`, and issue a receipt.
///
/// # Errors
///
/// Returns the form's [`ValidationError`]; nothing is awaited in that case.
pub async fn process_payment(
    form: &PaymentForm,
    amount: Cop,
    delay: Duration,
) -> Result<PaymentReceipt, ValidationError> {
    form.validate()?;
    tracing::info!(amount, delay_ms = delay.as_millis(), "processing payment");
    tokio::time::sleep(delay).await;

    let now = datetime::now();
    let receipt = PaymentReceipt {
        booking_reference: booking_reference(now),
        amount,
        card_last_four: form.last_four(),
        paid_at: datetime::to_iso_utc(now),
    };
    tracing::info!(reference = %receipt.booking_reference, "payment approved");
    Ok(receipt)
}
