#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topic tag from the platform's fixed taxonomy.
///
/// Materials are tagged with interest areas, and mentor / mentored profiles list
/// the areas their owner cares about. Suggestion matches the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestArea {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "INFORMATION_TECHNOLOGY"))]
    InformationTechnology,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SOFTWARE_DEVELOPMENT"))]
    SoftwareDevelopment,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "DATA_SCIENCE_AND_AI"))]
    DataScienceAndAi,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "CYBERSECURITY"))]
    Cybersecurity,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "UX_UI_DESIGN"))]
    UxUiDesign,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "GENERAL_ENGINEERING"))]
    GeneralEngineering,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "CIVIL_ENGINEERING"))]
    CivilEngineering,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PRODUCTION_ENGINEERING"))]
    ProductionEngineering,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MATHEMATICS_AND_STATISTICS"))]
    MathematicsAndStatistics,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PHYSICS"))]
    Physics,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "BUSINESS_ADMINISTRATION"))]
    BusinessAdministration,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ENTREPRENEURSHIP_AND_INNOVATION"))]
    EntrepreneurshipAndInnovation,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "FINANCE_AND_ACCOUNTING"))]
    FinanceAndAccounting,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "HUMAN_RESOURCES"))]
    HumanResources,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "LOGISTICS_AND_SUPPLY_CHAIN"))]
    LogisticsAndSupplyChain,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MARKETING_AND_COMMUNICATION"))]
    MarketingAndCommunication,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "DIGITAL_MARKETING"))]
    DigitalMarketing,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "JOURNALISM"))]
    Journalism,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ADVERTISING"))]
    Advertising,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "INSTITUTIONAL_COMMUNICATION"))]
    InstitutionalCommunication,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "BIOLOGICAL_AND_HEALTH_SCIENCES"))]
    BiologicalAndHealthSciences,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MEDICINE"))]
    Medicine,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PSYCHOLOGY"))]
    Psychology,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "NUTRITION"))]
    Nutrition,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "BIOTECHNOLOGY"))]
    Biotechnology,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "EDUCATION"))]
    Education,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "HUMANITIES_AND_SOCIAL_SCIENCES"))]
    HumanitiesAndSocialSciences,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "LANGUAGES"))]
    Languages,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "HISTORY"))]
    History,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "GEOGRAPHY"))]
    Geography,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "SOCIOLOGY"))]
    Sociology,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "LAW"))]
    Law,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "DIGITAL_LAW"))]
    DigitalLaw,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "ENVIRONMENT_AND_SUSTAINABILITY"))]
    EnvironmentAndSustainability,
}

impl InterestArea {
    /// Every area in the taxonomy, in catalog order.
    pub const ALL: &'static [InterestArea] = &[
        Self::InformationTechnology,
        Self::SoftwareDevelopment,
        Self::DataScienceAndAi,
        Self::Cybersecurity,
        Self::UxUiDesign,
        Self::GeneralEngineering,
        Self::CivilEngineering,
        Self::ProductionEngineering,
        Self::MathematicsAndStatistics,
        Self::Physics,
        Self::BusinessAdministration,
        Self::EntrepreneurshipAndInnovation,
        Self::FinanceAndAccounting,
        Self::HumanResources,
        Self::LogisticsAndSupplyChain,
        Self::MarketingAndCommunication,
        Self::DigitalMarketing,
        Self::Journalism,
        Self::Advertising,
        Self::InstitutionalCommunication,
        Self::BiologicalAndHealthSciences,
        Self::Medicine,
        Self::Psychology,
        Self::Nutrition,
        Self::Biotechnology,
        Self::Education,
        Self::HumanitiesAndSocialSciences,
        Self::Languages,
        Self::History,
        Self::Geography,
        Self::Sociology,
        Self::Law,
        Self::DigitalLaw,
        Self::EnvironmentAndSustainability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InformationTechnology => "INFORMATION_TECHNOLOGY",
            Self::SoftwareDevelopment => "SOFTWARE_DEVELOPMENT",
            Self::DataScienceAndAi => "DATA_SCIENCE_AND_AI",
            Self::Cybersecurity => "CYBERSECURITY",
            Self::UxUiDesign => "UX_UI_DESIGN",
            Self::GeneralEngineering => "GENERAL_ENGINEERING",
            Self::CivilEngineering => "CIVIL_ENGINEERING",
            Self::ProductionEngineering => "PRODUCTION_ENGINEERING",
            Self::MathematicsAndStatistics => "MATHEMATICS_AND_STATISTICS",
            Self::Physics => "PHYSICS",
            Self::BusinessAdministration => "BUSINESS_ADMINISTRATION",
            Self::EntrepreneurshipAndInnovation => "ENTREPRENEURSHIP_AND_INNOVATION",
            Self::FinanceAndAccounting => "FINANCE_AND_ACCOUNTING",
            Self::HumanResources => "HUMAN_RESOURCES",
            Self::LogisticsAndSupplyChain => "LOGISTICS_AND_SUPPLY_CHAIN",
            Self::MarketingAndCommunication => "MARKETING_AND_COMMUNICATION",
            Self::DigitalMarketing => "DIGITAL_MARKETING",
            Self::Journalism => "JOURNALISM",
            Self::Advertising => "ADVERTISING",
            Self::InstitutionalCommunication => "INSTITUTIONAL_COMMUNICATION",
            Self::BiologicalAndHealthSciences => "BIOLOGICAL_AND_HEALTH_SCIENCES",
            Self::Medicine => "MEDICINE",
            Self::Psychology => "PSYCHOLOGY",
            Self::Nutrition => "NUTRITION",
            Self::Biotechnology => "BIOTECHNOLOGY",
            Self::Education => "EDUCATION",
            Self::HumanitiesAndSocialSciences => "HUMANITIES_AND_SOCIAL_SCIENCES",
            Self::Languages => "LANGUAGES",
            Self::History => "HISTORY",
            Self::Geography => "GEOGRAPHY",
            Self::Sociology => "SOCIOLOGY",
            Self::Law => "LAW",
            Self::DigitalLaw => "DIGITAL_LAW",
            Self::EnvironmentAndSustainability => "ENVIRONMENT_AND_SUSTAINABILITY",
        }
    }
}

impl fmt::Display for InterestArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a tag outside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInterestAreaError {
    invalid: String,
}

impl fmt::Display for ParseInterestAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown interest area '{}'", self.invalid)
    }
}

impl std::error::Error for ParseInterestAreaError {}

impl FromStr for InterestArea {
    type Err = ParseInterestAreaError;

    /// Accepts the canonical tag in any case, with `-` or spaces in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', ' '], "_").to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| ParseInterestAreaError {
                invalid: s.to_string(),
            })
    }
}

/// Removes repeated areas, keeping the first occurrence of each.
pub fn dedup_areas(areas: impl IntoIterator<Item = InterestArea>) -> Vec<InterestArea> {
    let mut seen = std::collections::HashSet::new();
    areas.into_iter().filter(|a| seen.insert(*a)).collect()
}
