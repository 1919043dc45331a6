//! Demo-mode redaction and money formatting.
//!
//! When the board is shown to people outside the team, amounts, names and
//! free text are replaced with solid blocks. Stages, dates and counts stay
//! visible so the shape of the pipeline still reads.

use std::{borrow::Cow, fmt};

use crate::models::DEFAULT_CURRENCY;

/// Placeholder for hidden names and free text.
pub const HIDDEN_TEXT: &str = "████████";

/// Placeholder for a hidden amount, shown before the currency.
pub const HIDDEN_AMOUNT: &str = "████";

/// Whether sensitive fields are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mask {
    #[default]
    Off,
    /// Demo mode: hide amounts, names and free text
    Demo,
}

impl Mask {
    pub fn from_demo_flag(demo: bool) -> Self {
        if demo {
            Mask::Demo
        } else {
            Mask::Off
        }
    }

    pub fn is_demo(self) -> bool {
        self == Mask::Demo
    }

    /// A person's or company's name.
    pub fn name(self, name: &str) -> Cow<'_, str> {
        self.hide(name)
    }

    /// Notes, emails, phone numbers and other free text.
    pub fn text(self, text: &str) -> Cow<'_, str> {
        self.hide(text)
    }

    pub fn money(self, amount: f64, currency: &str) -> Money<'_> {
        Money {
            amount,
            currency,
            hidden: self.is_demo(),
        }
    }

    fn hide(self, value: &str) -> Cow<'_, str> {
        match self {
            Mask::Off => Cow::Borrowed(value),
            Mask::Demo => Cow::Borrowed(HIDDEN_TEXT),
        }
    }
}

/// An amount with thousands grouped by spaces and no decimals:
/// `12 500 kr` for the default currency, `12 500 EUR` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money<'a> {
    pub amount: f64,
    pub currency: &'a str,
    pub hidden: bool,
}

impl<'a> Money<'a> {
    pub fn new(amount: f64, currency: &'a str) -> Self {
        Mask::Off.money(amount, currency)
    }

    fn suffix(&self) -> &str {
        if self.currency.eq_ignore_ascii_case(DEFAULT_CURRENCY) {
            "kr"
        } else {
            self.currency
        }
    }
}

impl fmt::Display for Money<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hidden {
            return write!(f, "{HIDDEN_AMOUNT} {}", self.suffix());
        }

        let rounded = self.amount.round();
        let digits = format!("{:.0}", rounded.abs());
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }
        let sign = if rounded < 0.0 { "-" } else { "" };
        write!(f, "{sign}{grouped} {}", self.suffix())
    }
}

/// Display that honours a [`Mask`].
pub trait MaskedDisplay {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result;
}

/// Pairs a value with the mask to render it under.
///
/// ```rust
/// use dealboard_core::display::{Deals, Mask, Masked};
///
/// let deals = Deals(vec![]);
/// assert_eq!(Masked(&deals, Mask::Demo).to_string(), "No deals found.\n");
/// ```
pub struct Masked<'a, T: ?Sized>(pub &'a T, pub Mask);

impl<T: MaskedDisplay + ?Sized> fmt::Display for Masked<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_masked(f, self.1)
    }
}
