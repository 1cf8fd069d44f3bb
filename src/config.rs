//! Configuration types and the fixed option sources consumed by the wizard.

use serde::Serialize;

/// A country dialing code offered in the phone selector.
#[derive(Debug, Clone, Serialize)]
pub struct CountryCode {
    /// Dialing prefix, e.g. "+51".
    pub code: String,
    /// Short display label, e.g. "PE".
    pub label: String,
}

/// Option sources supplied to the wizard by configuration.
///
/// These are fixed lists the host page renders; the wizard core only cares
/// that an answer came from one of them where a step requires it.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Country dialing codes, default first.
    pub country_codes: Vec<CountryCode>,
    /// Default phone country code for new sessions.
    pub default_phone_code: String,
    /// Industry sectors offered in the context step.
    pub industries: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        let country_codes = [
            ("+51", "PE"),
            ("+1", "US"),
            ("+34", "ES"),
            ("+52", "MX"),
            ("+54", "AR"),
            ("+55", "BR"),
            ("+56", "CL"),
            ("+57", "CO"),
            ("+593", "EC"),
            ("+44", "UK"),
            ("+49", "DE"),
        ]
        .into_iter()
        .map(|(code, label)| CountryCode {
            code: code.to_string(),
            label: label.to_string(),
        })
        .collect();

        let industries = [
            "Agroindustry",
            "Food & Beverage",
            "Architecture & Construction",
            "Automotive",
            "Banking & Fintech",
            "Retail",
            "Wholesale",
            "Consulting & Services",
            "E-commerce",
            "Education",
            "Energy & Mining",
            "Entertainment & Media",
            "Pharma & Healthcare",
            "Food Service",
            "Hospitality & Tourism",
            "Real Estate",
            "Legal",
            "Logistics & Transport",
            "Manufacturing",
            "Marketing & Advertising",
            "SaaS / Technology",
            "Insurance",
            "Textile & Fashion",
            "Other",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            country_codes,
            default_phone_code: "+51".to_string(),
            industries,
        }
    }
}
