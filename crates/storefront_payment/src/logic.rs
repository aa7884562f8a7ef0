// --- File: crates/storefront_payment/src/logic.rs ---
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Field name -> message, ordered for stable output.
pub type FieldErrors = BTreeMap<String, String>;

// --- Data Structures ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Unknown,
}

impl CardBrand {
    pub fn cvc_length(self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CardDetails {
    #[cfg_attr(feature = "openapi", schema(example = "4539 1488 0343 6467"))]
    pub number: String,
    #[cfg_attr(feature = "openapi", schema(example = "Ana García"))]
    pub holder: String,
    /// `MM/YY`
    #[cfg_attr(feature = "openapi", schema(example = "12/30"))]
    pub expiry: String,
    #[cfg_attr(feature = "openapi", schema(example = "123"))]
    pub cvc: String,
}

impl CardDetails {
    pub fn last4(&self) -> Option<String> {
        let digits = card_digits(&self.number)?;
        Some(digits[digits.len().saturating_sub(4)..].to_string())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card(CardDetails),
    CashOnPickup,
    BankTransfer,
}

impl PaymentMethod {
    /// Name used in configuration and receipts.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card(_) => "card",
            PaymentMethod::CashOnPickup => "cash_on_pickup",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

// --- Card checks ---

/// Digits of a card number with spaces and dashes removed.
/// `None` when anything else is present.
fn card_digits(number: &str) -> Option<String> {
    let mut digits = String::with_capacity(number.len());
    for c in number.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' => {}
            _ => return None,
        }
    }
    (!digits.is_empty()).then_some(digits)
}

/// Luhn checksum over 12 to 19 digits.
pub fn luhn_valid(number: &str) -> bool {
    let Some(digits) = card_digits(number) else {
        return false;
    };
    if !(12..=19).contains(&digits.len()) {
        return false;
    }
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

pub fn detect_brand(number: &str) -> CardBrand {
    let Some(digits) = card_digits(number) else {
        return CardBrand::Unknown;
    };
    let prefix = |n: usize| digits.get(..n).and_then(|p| p.parse::<u32>().ok());

    if digits.starts_with('4') {
        CardBrand::Visa
    } else if matches!(prefix(2), Some(34 | 37)) {
        CardBrand::Amex
    } else if matches!(prefix(2), Some(51..=55)) || matches!(prefix(4), Some(2221..=2720)) {
        CardBrand::Mastercard
    } else {
        CardBrand::Unknown
    }
}

/// Parses `MM/YY` into (year, month).
pub fn parse_expiry(expiry: &str) -> Option<(i32, u32)> {
    let (month, year) = expiry.trim().split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((2000 + year, month))
}

/// Checks every field and returns the detected brand, or one message per
/// invalid field. A card is usable through the last day of its expiry month.
pub fn validate_card(details: &CardDetails, today: NaiveDate) -> Result<CardBrand, FieldErrors> {
    let mut errors = FieldErrors::new();
    let brand = detect_brand(&details.number);

    if !luhn_valid(&details.number) {
        errors.insert("number".to_string(), "Invalid card number".to_string());
    }

    if details.holder.trim().chars().count() < 3 {
        errors.insert(
            "holder".to_string(),
            "Cardholder name must have at least 3 characters".to_string(),
        );
    }

    match parse_expiry(&details.expiry) {
        None => {
            errors.insert("expiry".to_string(), "Expiry must be MM/YY".to_string());
        }
        Some((year, month)) if (year, month) < (today.year(), today.month()) => {
            errors.insert("expiry".to_string(), "Card has expired".to_string());
        }
        Some(_) => {}
    }

    let cvc = details.cvc.trim();
    if cvc.len() != brand.cvc_length() || !cvc.bytes().all(|b| b.is_ascii_digit()) {
        errors.insert(
            "cvc".to_string(),
            format!("CVC must be {} digits", brand.cvc_length()),
        );
    }

    if errors.is_empty() {
        Ok(brand)
    } else {
        Err(errors)
    }
}
