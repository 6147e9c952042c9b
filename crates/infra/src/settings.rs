//! Render settings loaded from the process environment.

use fieldservice_documents::{Currency, MoneyFormatter};

/// Display currency for every rendered document.
pub const CURRENCY_VAR: &str = "FIELDSERVICE_CURRENCY";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSettings {
    pub currency: Currency,
}

impl RenderSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unsupported values fall back to USD.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let currency = match lookup(CURRENCY_VAR) {
            None => Currency::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(value = %raw, error = %err, "{CURRENCY_VAR} not usable; using USD");
                Currency::default()
            }),
        };

        Self { currency }
    }

    pub fn money_formatter(&self) -> MoneyFormatter {
        MoneyFormatter::new(self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_usd_when_unset() {
        let settings = RenderSettings::from_lookup(|_| None);
        assert_eq!(settings.currency, Currency::Usd);
    }

    #[test]
    fn reads_currency_code() {
        let settings = RenderSettings::from_lookup(|key| {
            (key == CURRENCY_VAR).then(|| "gbp".to_string())
        });
        assert_eq!(settings.currency, Currency::Gbp);
        assert_eq!(settings.money_formatter().format(2.0), "£2.00");
    }

    #[test]
    fn unsupported_currency_falls_back_to_usd() {
        let settings = RenderSettings::from_lookup(|_| Some("DOGE".to_string()));
        assert_eq!(settings.currency, Currency::Usd);
    }
}
