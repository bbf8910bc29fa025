//! Form state and the submission controller behind the dashboard.
//!
//! Input is kept as raw strings so partially typed values survive; it is only
//! coerced to numbers when a submission is built. Unparseable input becomes 0
//! without blocking the submission.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, warn};

use crate::prediction::PredictionOutcome;
use crate::proxy_client::PredictionApi;
use crate::reservoir::{FieldStage, FormField, ReservoirFeatures};

/// Raw contents of the prediction form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub porosity: String,
    pub water_saturation: String,
    pub oil_saturation: String,
    pub depth: String,
    pub net_pay: String,
    pub reservoir_pressure: String,
    pub viscosity: String,
    pub permeability: String,
    pub field_stage: FieldStage,
}

/// Parse one numeric input; empty, garbage and non-finite values become 0.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl FormState {
    /// Pre-filled form, e.g. from a sample reservoir.
    pub fn from_features(features: &ReservoirFeatures) -> Self {
        let mut form = FormState {
            field_stage: features.field_stage,
            ..FormState::default()
        };
        for field in FormField::ALL {
            form.set(field, field.value_of(features).to_string());
        }
        form
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Porosity => &self.porosity,
            FormField::WaterSaturation => &self.water_saturation,
            FormField::OilSaturation => &self.oil_saturation,
            FormField::Depth => &self.depth,
            FormField::NetPay => &self.net_pay,
            FormField::ReservoirPressure => &self.reservoir_pressure,
            FormField::Viscosity => &self.viscosity,
            FormField::Permeability => &self.permeability,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Porosity => &mut self.porosity,
            FormField::WaterSaturation => &mut self.water_saturation,
            FormField::OilSaturation => &mut self.oil_saturation,
            FormField::Depth => &mut self.depth,
            FormField::NetPay => &mut self.net_pay,
            FormField::ReservoirPressure => &mut self.reservoir_pressure,
            FormField::Viscosity => &mut self.viscosity,
            FormField::Permeability => &mut self.permeability,
        };
        *slot = value.into();
    }

    pub fn to_features(&self) -> ReservoirFeatures {
        let n = |field| coerce_number(self.get(field));
        ReservoirFeatures {
            porosity: n(FormField::Porosity),
            water_saturation: n(FormField::WaterSaturation),
            oil_saturation: n(FormField::OilSaturation),
            depth: n(FormField::Depth),
            net_pay: n(FormField::NetPay),
            reservoir_pressure: n(FormField::ReservoirPressure),
            viscosity: n(FormField::Viscosity),
            permeability: n(FormField::Permeability),
            field_stage: self.field_stage,
        }
    }

    /// Non-empty fields whose text was replaced by 0.
    pub fn coerced_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|&field| {
                let raw = self.get(field).trim();
                !raw.is_empty() && raw.parse::<f64>().map_or(true, |v| !v.is_finite())
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    submitting: bool,
    /// Token of the most recent submission; older responses are discarded.
    latest: u64,
    outcome: Option<PredictionOutcome>,
}

/// Drives submissions and holds the one displayable outcome.
pub struct PredictionController<A> {
    api: A,
    state: Mutex<ControllerState>,
}

impl<A: PredictionApi> PredictionController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(ControllerState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    /// Outcome of the latest settled submission; `None` while one is in flight.
    pub fn outcome(&self) -> Option<PredictionOutcome> {
        self.lock().outcome.clone()
    }

    /// Submit the form and wait for it to settle.
    ///
    /// Returns this submission's outcome even when a newer submission has
    /// superseded it; only the newest one is stored.
    pub async fn submit(&self, form: &FormState) -> PredictionOutcome {
        let pending = self.begin();

        let features = form.to_features();
        let coerced = form.coerced_fields();
        if !coerced.is_empty() {
            debug!(?coerced, "unparseable form input submitted as 0");
        }

        let outcome = match self.api.predict(&features).await {
            Ok(result) => PredictionOutcome::Success(result.rounded()),
            Err(e) => {
                if e.is_transport() {
                    error!(error = ?e, "prediction service unreachable");
                } else {
                    warn!(error = %e, "prediction request failed");
                }
                PredictionOutcome::Failure {
                    message: e.user_message(),
                    field_stage: features.field_stage,
                }
            }
        };

        pending.settle(outcome.clone());
        outcome
    }

    fn begin(&self) -> Pending<'_> {
        let mut st = self.lock();
        st.latest += 1;
        st.outcome = None;
        st.submitting = true;
        Pending {
            state: &self.state,
            token: st.latest,
            settled: false,
        }
    }
}

/// An in-flight submission. Clears `submitting` on drop, so a cancelled
/// submission cannot leave the form stuck.
struct Pending<'a> {
    state: &'a Mutex<ControllerState>,
    token: u64,
    settled: bool,
}

impl Pending<'_> {
    fn settle(mut self, outcome: PredictionOutcome) {
        let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if st.latest == self.token {
            st.outcome = Some(outcome);
            st.submitting = false;
        } else {
            debug!(token = self.token, latest = st.latest, "discarding stale prediction response");
        }
        self.settled = true;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if st.latest == self.token {
            st.submitting = false;
        }
    }
}
