//! Reservoir parameters submitted for a suitability prediction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the field the well belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStage {
    #[default]
    Early,
    Appraisal,
    Developed,
}

impl FieldStage {
    pub const ALL: [FieldStage; 3] = [FieldStage::Early, FieldStage::Appraisal, FieldStage::Developed];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStage::Early => "early",
            FieldStage::Appraisal => "appraisal",
            FieldStage::Developed => "developed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldStage::Early => "Early-Stage Field",
            FieldStage::Appraisal => "Appraisal Stage",
            FieldStage::Developed => "Developed Field",
        }
    }
}

impl fmt::Display for FieldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FieldStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown field stage '{wanted}' (expected early, appraisal or developed)")
            })
    }
}

/// One prediction request. Built fresh from form state for every submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservoirFeatures {
    pub porosity: f64,
    pub water_saturation: f64,
    pub oil_saturation: f64,
    pub depth: f64,
    pub net_pay: f64,
    pub reservoir_pressure: f64,
    pub viscosity: f64,
    pub permeability: f64,
    pub field_stage: FieldStage,
}

/// The eight numeric inputs of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Porosity,
    WaterSaturation,
    OilSaturation,
    Depth,
    NetPay,
    ReservoirPressure,
    Viscosity,
    Permeability,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Porosity,
        FormField::WaterSaturation,
        FormField::OilSaturation,
        FormField::Depth,
        FormField::NetPay,
        FormField::ReservoirPressure,
        FormField::Viscosity,
        FormField::Permeability,
    ];

    /// JSON key used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            FormField::Porosity => "porosity",
            FormField::WaterSaturation => "waterSaturation",
            FormField::OilSaturation => "oilSaturation",
            FormField::Depth => "depth",
            FormField::NetPay => "netPay",
            FormField::ReservoirPressure => "reservoirPressure",
            FormField::Viscosity => "viscosity",
            FormField::Permeability => "permeability",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Porosity => "Porosity",
            FormField::WaterSaturation => "Water Saturation",
            FormField::OilSaturation => "Oil Saturation",
            FormField::Depth => "Depth",
            FormField::NetPay => "Net Pay",
            FormField::ReservoirPressure => "Reservoir Pressure",
            FormField::Viscosity => "Viscosity",
            FormField::Permeability => "Permeability",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            FormField::Porosity | FormField::WaterSaturation | FormField::OilSaturation => "%",
            FormField::Depth | FormField::NetPay => "ft",
            FormField::ReservoirPressure => "psi",
            FormField::Viscosity => "cp",
            FormField::Permeability => "mD",
        }
    }

    pub fn value_of(&self, features: &ReservoirFeatures) -> f64 {
        match self {
            FormField::Porosity => features.porosity,
            FormField::WaterSaturation => features.water_saturation,
            FormField::OilSaturation => features.oil_saturation,
            FormField::Depth => features.depth,
            FormField::NetPay => features.net_pay,
            FormField::ReservoirPressure => features.reservoir_pressure,
            FormField::Viscosity => features.viscosity,
            FormField::Permeability => features.permeability,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_names() {
        let features = ReservoirFeatures {
            porosity: 22.5,
            water_saturation: 28.0,
            oil_saturation: 72.0,
            depth: 8500.0,
            net_pay: 85.0,
            reservoir_pressure: 3800.0,
            viscosity: 1.2,
            permeability: 125.0,
            field_stage: FieldStage::Early,
        };
        let value = serde_json::to_value(features).unwrap();
        assert_eq!(value["waterSaturation"], json!(28.0));
        assert_eq!(value["reservoirPressure"], json!(3800.0));
        assert_eq!(value["fieldStage"], json!("early"));

        for field in FormField::ALL {
            assert!(value.get(field.id()).is_some(), "missing {field}");
        }
    }

    #[test]
    fn field_stage_parses_case_insensitively() {
        assert_eq!("Developed".parse::<FieldStage>(), Ok(FieldStage::Developed));
        assert!("mature".parse::<FieldStage>().is_err());
    }

    #[test]
    fn every_stage_parses_from_its_wire_name() {
        for stage in FieldStage::ALL {
            assert_eq!(stage.as_str().parse::<FieldStage>(), Ok(stage));
            assert_eq!(serde_json::to_value(stage).unwrap(), json!(stage.as_str()));
        }
    }
}
