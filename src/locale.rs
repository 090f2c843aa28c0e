//! Locale and currency settings and the formatting rules they imply.
//!
//! Only the handful of locales the summary is actually displayed in are
//! supported. Each locale decides the digit separators, where the currency
//! symbol goes, how dates are written and the wording of the highlight labels.

use std::{fmt::Display, str::FromStr};

use time::{Date, Month};

use crate::Error;

/// A supported display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Brazilian Portuguese, e.g. "R$ 1.000,00" and "15 de Maio".
    PtBr,
    /// United States English, e.g. "$1,000.00" and "May 15".
    EnUs,
    /// New Zealand English, like [Locale::EnUs] but with day-first dates.
    EnNz,
}

impl FromStr for Locale {
    type Err = Error;

    /// Parse a locale tag such as "pt-BR". Matching is case-insensitive and
    /// accepts "_" in place of "-".
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" => Ok(Locale::PtBr),
            "en-us" => Ok(Locale::EnUs),
            "en-nz" => Ok(Locale::EnNz),
            _ => Err(Error::UnsupportedLocale(tag.to_owned())),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::EnNz => "en-NZ",
        };

        f.write_str(tag)
    }
}

/// A currency identified by its ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    code: String,
}

impl Currency {
    /// The three letter code, always upper case.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The symbol displayed for well known currencies, `None` otherwise.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.code.as_str() {
            "BRL" => Some("R$"),
            "USD" | "NZD" | "AUD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            _ => None,
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let trimmed = code.trim();

        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidCurrency(code.to_owned()));
        }

        Ok(Currency {
            code: trimmed.to_ascii_uppercase(),
        })
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

impl Locale {
    fn separators(&self) -> (char, char) {
        match self {
            Locale::PtBr => ('.', ','),
            Locale::EnUs | Locale::EnNz => (',', '.'),
        }
    }

    /// Format `amount` as money in this locale, e.g. "R$ 1.000,00" or "-$12.30".
    ///
    /// The amount is rounded to cents first, so values that round to zero are
    /// never shown with a minus sign.
    pub fn format_currency(&self, amount: f64, currency: &Currency) -> String {
        let number = self.format_number(amount.abs());
        let is_zero = !number.bytes().any(|digit| matches!(digit, b'1'..=b'9'));
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

        match (self, currency.symbol()) {
            (Locale::PtBr, Some(symbol)) => format!("{sign}{symbol} {number}"),
            (Locale::EnUs | Locale::EnNz, Some(symbol)) => format!("{sign}{symbol}{number}"),
            (_, None) => format!("{sign}{} {number}", currency.code()),
        }
    }

    /// Format a non-negative number with two decimals and grouped thousands.
    ///
    /// Amounts of any magnitude are written out in full, never in scientific
    /// notation.
    fn format_number(&self, number: f64) -> String {
        let formatted = format!("{number:.2}");
        let (integer_part, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));

        let (thousands_separator, decimal_separator) = self.separators();
        let digit_count = integer_part.len();
        let mut grouped = String::with_capacity(digit_count + digit_count / 3);

        for (i, digit) in integer_part.chars().enumerate() {
            if i > 0 && (digit_count - i) % 3 == 0 {
                grouped.push(thousands_separator);
            }
            grouped.push(digit);
        }

        format!("{grouped}{decimal_separator}{fraction}")
    }

    /// Format a date as two digit day, month and year, e.g. "10/05/23".
    pub fn format_short_date(&self, date: Date) -> String {
        let day = date.day();
        let month = u8::from(date.month());
        let year = date.year().rem_euclid(100);

        match self {
            Locale::PtBr | Locale::EnNz => format!("{day:02}/{month:02}/{year:02}"),
            Locale::EnUs => format!("{month:02}/{day:02}/{year:02}"),
        }
    }

    /// Format a date as a long form day and month, e.g. "15 de Maio" or "May 15".
    pub fn format_day_month(&self, date: Date) -> String {
        let month = self.month_name(date.month());

        match self {
            Locale::PtBr => format!("{} de {month}", date.day()),
            Locale::EnUs | Locale::EnNz => format!("{month} {}", date.day()),
        }
    }

    /// The full name of `month`.
    pub fn month_name(&self, month: Month) -> &'static str {
        match self {
            Locale::PtBr => match month {
                Month::January => "Janeiro",
                Month::February => "Fevereiro",
                Month::March => "Março",
                Month::April => "Abril",
                Month::May => "Maio",
                Month::June => "Junho",
                Month::July => "Julho",
                Month::August => "Agosto",
                Month::September => "Setembro",
                Month::October => "Outubro",
                Month::November => "Novembro",
                Month::December => "Dezembro",
            },
            Locale::EnUs | Locale::EnNz => match month {
                Month::January => "January",
                Month::February => "February",
                Month::March => "March",
                Month::April => "April",
                Month::May => "May",
                Month::June => "June",
                Month::July => "July",
                Month::August => "August",
                Month::September => "September",
                Month::October => "October",
                Month::November => "November",
                Month::December => "December",
            },
        }
    }

    /// The label shown in place of a date when a category has no transactions.
    pub fn no_transactions_label(&self) -> &'static str {
        match self {
            Locale::PtBr => "Não há transações",
            Locale::EnUs | Locale::EnNz => "No transactions",
        }
    }

    /// The label for the most recent entry, e.g. "Última entrada dia 10 de Maio".
    pub fn last_entry_label(&self, date: Date) -> String {
        let day_month = self.format_day_month(date);

        match self {
            Locale::PtBr => format!("Última entrada dia {day_month}"),
            Locale::EnUs | Locale::EnNz => format!("Last entry on {day_month}"),
        }
    }

    /// The label for the most recent expense, e.g. "Última saída dia 15 de Maio".
    pub fn last_expense_label(&self, date: Date) -> String {
        let day_month = self.format_day_month(date);

        match self {
            Locale::PtBr => format!("Última saída dia {day_month}"),
            Locale::EnUs | Locale::EnNz => format!("Last expense on {day_month}"),
        }
    }

    /// The period label for the total, running from the first of the month
    /// up to `end`, e.g. "01 a 15 de Maio".
    pub fn interval_label(&self, end: Date) -> String {
        match self {
            Locale::PtBr => format!("01 a {}", self.format_day_month(end)),
            Locale::EnUs | Locale::EnNz => {
                format!("{} 01 to {}", self.month_name(end.month()), end.day())
            }
        }
    }
}
