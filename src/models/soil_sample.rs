use crate::error::{NutriRootError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The six measured soil parameters, in the order every report lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilParameter {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Moisture,
    Temperature,
}

impl SoilParameter {
    pub const ALL: [SoilParameter; 6] = [
        SoilParameter::Nitrogen,
        SoilParameter::Phosphorus,
        SoilParameter::Potassium,
        SoilParameter::Ph,
        SoilParameter::Moisture,
        SoilParameter::Temperature,
    ];

    /// Field name used in submitted samples and catalog requirements.
    pub fn key(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "nitrogen",
            SoilParameter::Phosphorus => "phosphorus",
            SoilParameter::Potassium => "potassium",
            SoilParameter::Ph => "ph",
            SoilParameter::Moisture => "moisture",
            SoilParameter::Temperature => "temperature",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen => "Nitrogen",
            SoilParameter::Phosphorus => "Phosphorus",
            SoilParameter::Potassium => "Potassium",
            SoilParameter::Ph => "pH",
            SoilParameter::Moisture => "Moisture",
            SoilParameter::Temperature => "Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SoilParameter::Nitrogen | SoilParameter::Phosphorus | SoilParameter::Potassium => {
                " mg/kg"
            }
            SoilParameter::Ph => "",
            SoilParameter::Moisture => "%",
            SoilParameter::Temperature => "°C",
        }
    }

    pub fn is_nutrient(&self) -> bool {
        matches!(
            self,
            SoilParameter::Nitrogen | SoilParameter::Phosphorus | SoilParameter::Potassium
        )
    }
}

impl std::fmt::Display for SoilParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated soil reading. Every numeric field is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub moisture: f64,
    pub temperature: f64,
    /// Free-text crop label, only interpolated into messages.
    #[serde(default)]
    pub crop: String,
}

impl SoilSample {
    pub fn value(&self, parameter: SoilParameter) -> f64 {
        match parameter {
            SoilParameter::Nitrogen => self.nitrogen,
            SoilParameter::Phosphorus => self.phosphorus,
            SoilParameter::Potassium => self.potassium,
            SoilParameter::Ph => self.ph,
            SoilParameter::Moisture => self.moisture,
            SoilParameter::Temperature => self.temperature,
        }
    }

    #[cfg(test)]
    pub fn with_value(mut self, parameter: SoilParameter, value: f64) -> Self {
        let slot = match parameter {
            SoilParameter::Nitrogen => &mut self.nitrogen,
            SoilParameter::Phosphorus => &mut self.phosphorus,
            SoilParameter::Potassium => &mut self.potassium,
            SoilParameter::Ph => &mut self.ph,
            SoilParameter::Moisture => &mut self.moisture,
            SoilParameter::Temperature => &mut self.temperature,
        };
        *slot = value;
        self
    }
}

/// A sample as submitted by a form or a JSON file, before validation.
///
/// Numbers may arrive as JSON numbers or as numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSoilSample {
    #[serde(default)]
    pub nitrogen: Option<Value>,
    #[serde(default)]
    pub phosphorus: Option<Value>,
    #[serde(default)]
    pub potassium: Option<Value>,
    #[serde(default)]
    pub ph: Option<Value>,
    #[serde(default)]
    pub moisture: Option<Value>,
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub crop: Option<String>,
}

impl RawSoilSample {
    pub fn field(&self, parameter: SoilParameter) -> Option<&Value> {
        match parameter {
            SoilParameter::Nitrogen => self.nitrogen.as_ref(),
            SoilParameter::Phosphorus => self.phosphorus.as_ref(),
            SoilParameter::Potassium => self.potassium.as_ref(),
            SoilParameter::Ph => self.ph.as_ref(),
            SoilParameter::Moisture => self.moisture.as_ref(),
            SoilParameter::Temperature => self.temperature.as_ref(),
        }
    }

    pub fn set_field(&mut self, parameter: SoilParameter, value: Value) {
        let slot = match parameter {
            SoilParameter::Nitrogen => &mut self.nitrogen,
            SoilParameter::Phosphorus => &mut self.phosphorus,
            SoilParameter::Potassium => &mut self.potassium,
            SoilParameter::Ph => &mut self.ph,
            SoilParameter::Moisture => &mut self.moisture,
            SoilParameter::Temperature => &mut self.temperature,
        };
        *slot = Some(value);
    }

    /// Check that all six readings are present and numeric.
    ///
    /// Fields are checked in report order and the first failure is returned.
    /// A missing or blank crop label falls back to `default_crop`.
    pub fn validate(&self, default_crop: &str) -> Result<SoilSample> {
        let mut values = [0.0; 6];
        for (slot, parameter) in values.iter_mut().zip(SoilParameter::ALL) {
            *slot = parse_reading(parameter, self.field(parameter))?;
        }

        let crop = self
            .crop
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_crop)
            .to_string();

        let [nitrogen, phosphorus, potassium, ph, moisture, temperature] = values;
        Ok(SoilSample {
            nitrogen,
            phosphorus,
            potassium,
            ph,
            moisture,
            temperature,
            crop,
        })
    }
}

fn parse_reading(parameter: SoilParameter, value: Option<&Value>) -> Result<f64> {
    let missing = || NutriRootError::Validation(format!("Please fill the {} field", parameter.key()));
    let invalid = || {
        NutriRootError::Validation(format!(
            "Please enter a valid number for {}",
            parameter.key()
        ))
    };

    let number = match value {
        None | Some(Value::Null) => return Err(missing()),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(missing());
            }
            trimmed.parse::<f64>().map_err(|_| invalid())?
        }
        Some(_) => return Err(invalid()),
    };

    if !number.is_finite() {
        return Err(invalid());
    }
    Ok(number)
}
