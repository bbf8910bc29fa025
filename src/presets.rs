//! Sample reservoirs with a known expected verdict.

use crate::reservoir::{FieldStage, ReservoirFeatures};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub expected_suitable: bool,
    pub features: ReservoirFeatures,
}

pub static PRESETS: [Preset; 4] = [
    Preset {
        name: "optimal",
        description: "High porosity, low water saturation, excellent permeability",
        expected_suitable: true,
        features: ReservoirFeatures {
            porosity: 22.5,
            water_saturation: 28.0,
            oil_saturation: 72.0,
            depth: 8500.0,
            net_pay: 85.0,
            reservoir_pressure: 3800.0,
            viscosity: 1.2,
            permeability: 125.0,
            field_stage: FieldStage::Early,
        },
    },
    Preset {
        name: "good-early",
        description: "Good porosity and permeability, moderate saturations",
        expected_suitable: true,
        features: ReservoirFeatures {
            porosity: 18.0,
            water_saturation: 35.0,
            oil_saturation: 65.0,
            depth: 7800.0,
            net_pay: 55.0,
            reservoir_pressure: 3200.0,
            viscosity: 2.1,
            permeability: 45.0,
            field_stage: FieldStage::Early,
        },
    },
    Preset {
        name: "low-permeability",
        description: "Low porosity, high water saturation, poor permeability",
        expected_suitable: false,
        features: ReservoirFeatures {
            porosity: 8.5,
            water_saturation: 68.0,
            oil_saturation: 32.0,
            depth: 9200.0,
            net_pay: 15.0,
            reservoir_pressure: 4200.0,
            viscosity: 3.5,
            permeability: 2.5,
            field_stage: FieldStage::Developed,
        },
    },
    Preset {
        name: "high-water",
        description: "Moderate porosity but very high water saturation",
        expected_suitable: false,
        features: ReservoirFeatures {
            porosity: 12.0,
            water_saturation: 75.0,
            oil_saturation: 25.0,
            depth: 8000.0,
            net_pay: 22.0,
            reservoir_pressure: 3500.0,
            viscosity: 2.8,
            permeability: 8.0,
            field_stage: FieldStage::Appraisal,
        },
    },
];

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(find("Optimal").map(|p| p.features.porosity), Some(22.5));
        assert!(find("unknown").is_none());
    }

    #[test]
    fn saturations_are_complementary() {
        for preset in &PRESETS {
            let f = preset.features;
            assert!((f.oil_saturation + f.water_saturation - 100.0).abs() < 1e-9, "{}", preset.name);
        }
    }
}
