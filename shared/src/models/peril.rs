//! Insurable weather peril models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named category of insurable weather event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PerilKind {
    Rainfall,
    Temperature,
    Snowfall,
    Wind,
    FireRisk,
}

impl PerilKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            PerilKind::Rainfall => "Rainfall",
            PerilKind::Temperature => "Temperature",
            PerilKind::Snowfall => "Snowfall",
            PerilKind::Wind => "Wind",
            PerilKind::FireRisk => "Fire Risk",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerilKind::Rainfall => "rainfall",
            PerilKind::Temperature => "temperature",
            PerilKind::Snowfall => "snowfall",
            PerilKind::Wind => "wind",
            PerilKind::FireRisk => "fire_risk",
        }
    }

    pub const ALL: [PerilKind; 5] = [
        PerilKind::Rainfall,
        PerilKind::Temperature,
        PerilKind::Snowfall,
        PerilKind::Wind,
        PerilKind::FireRisk,
    ];
}

impl std::str::FromStr for PerilKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rainfall" => Ok(PerilKind::Rainfall),
            "temperature" => Ok(PerilKind::Temperature),
            "snowfall" => Ok(PerilKind::Snowfall),
            "wind" => Ok(PerilKind::Wind),
            "fire_risk" => Ok(PerilKind::FireRisk),
            other => Err(format!("unknown peril: {}", other)),
        }
    }
}

/// Per-peril portfolio figures.
///
/// Only rainfall is evaluated live; the remaining perils carry static
/// figures until their products launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Peril {
    pub kind: PerilKind,
    pub active_projects: u32,
    pub triggered_count: u32,
    pub coverage_amount: Decimal,
    /// Whether the current customer has purchased this peril product.
    /// Unpurchased perils show a sales prompt instead of operational detail.
    pub purchased: bool,
}

/// What the dashboard should render for a peril
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerilView {
    Operational,
    SalesPrompt,
}

impl Peril {
    pub fn view(&self) -> PerilView {
        if self.purchased {
            PerilView::Operational
        } else {
            PerilView::SalesPrompt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peril(purchased: bool) -> Peril {
        Peril {
            kind: PerilKind::Wind,
            active_projects: 3,
            triggered_count: 1,
            coverage_amount: Decimal::from(500_000),
            purchased,
        }
    }

    #[test]
    fn test_unpurchased_peril_shows_sales_prompt() {
        assert_eq!(peril(false).view(), PerilView::SalesPrompt);
        assert_eq!(peril(true).view(), PerilView::Operational);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in PerilKind::ALL {
            assert_eq!(kind.as_str().parse::<PerilKind>().unwrap(), kind);
        }
        assert!("hail".parse::<PerilKind>().is_err());
    }

    #[test]
    fn test_fire_risk_serializes_snake_case() {
        let json = serde_json::to_string(&PerilKind::FireRisk).unwrap();
        assert_eq!(json, "\"fire_risk\"");
    }
}
