//! Settings that control where transactions are read from and how the
//! summary is formatted.

use time_tz::{TimeZone, Tz};

use crate::{
    Error,
    locale::{Currency, Locale},
    timezone::get_timezone,
};

/// The namespace prefix used for storage keys by default.
pub const DEFAULT_NAMESPACE: &str = "@gofinances";
/// The locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "pt-BR";
/// The currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "BRL";
/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// What to do with a stored record whose fields cannot be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordPolicy {
    /// Fail the whole load on the first invalid record.
    #[default]
    FailFast,
    /// Drop invalid records and report how many were dropped.
    SkipInvalid,
}

/// Configuration for loading and presenting a summary.
#[derive(Clone)]
pub struct SummaryConfig {
    /// Prefix of the storage key, e.g. "@gofinances".
    pub namespace: String,
    /// The locale amounts, dates and labels are formatted in.
    pub locale: Locale,
    /// The currency amounts are displayed in.
    pub currency: Currency,
    /// The timezone dates are converted to before formatting.
    pub timezone: &'static Tz,
    /// How invalid records are handled.
    pub record_policy: RecordPolicy,
}

impl SummaryConfig {
    /// Build a configuration from a locale tag, currency code and canonical
    /// timezone name, using the default namespace and [RecordPolicy::FailFast].
    ///
    /// # Errors
    ///
    /// Returns [Error::UnsupportedLocale], [Error::InvalidCurrency] or
    /// [Error::InvalidTimezoneError] if the respective setting is not valid.
    pub fn new(locale: &str, currency: &str, timezone: &str) -> Result<Self, Error> {
        Ok(Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            locale: locale.parse()?,
            currency: currency.parse()?,
            timezone: get_timezone(timezone)?,
            record_policy: RecordPolicy::default(),
        })
    }

    /// Use `namespace` as the storage key prefix.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Use `record_policy` for invalid records.
    pub fn with_record_policy(mut self, record_policy: RecordPolicy) -> Self {
        self.record_policy = record_policy;
        self
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, DEFAULT_CURRENCY, DEFAULT_TIMEZONE)
            .expect("the default settings are valid")
    }
}

impl std::fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("namespace", &self.namespace)
            .field("locale", &self.locale)
            .field("currency", &self.currency)
            .field("timezone", &self.timezone.name())
            .field("record_policy", &self.record_policy)
            .finish()
    }
}
