use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::FareError,
    fare_estimate::FareEstimate,
    fare_model_client::FareModel,
    fare_request::{FareRequest, validate},
    trip_conditions::TripConditions,
};

#[derive(Default)]
struct EstimateSlot {
    /// Bumped every time the estimate is cleared
    generation: u64,
    estimate: Option<FareEstimate>,
}

/// Resets the in flight flag when a submission ends, including when its future
/// is dropped before completion.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Validates trip inputs, calls the fare model and keeps the latest estimate.
pub struct FareRequestBuilder<M> {
    model: M,
    in_flight: AtomicBool,
    slot: Mutex<EstimateSlot>,
}

impl<M> FareRequestBuilder<M>
where
    M: FareModel,
{
    pub fn new(model: M) -> Self {
        Self {
            model,
            in_flight: AtomicBool::new(false),
            slot: Mutex::new(EstimateSlot::default()),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn validate(
        &self,
        distance_km: Option<f64>,
        conditions: &TripConditions,
    ) -> Result<FareRequest, FareError> {
        validate(distance_km, conditions)
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The estimate of the last successful submission, unless cleared since.
    pub fn estimate(&self) -> Option<FareEstimate> {
        self.slot.lock().estimate
    }

    pub fn clear_estimate(&self) {
        self.clear();
    }

    fn clear(&self) -> u64 {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.estimate = None;
        slot.generation
    }

    /// Issues one prediction call. The current estimate is cleared up front, so a
    /// failed submission never leaves a stale fare on display. A second call
    /// while one is pending fails with [`FareError::SubmissionInFlight`].
    pub async fn submit(
        &self,
        distance_km: Option<f64>,
        conditions: TripConditions,
    ) -> Result<FareEstimate, FareError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(FareError::SubmissionInFlight);
        }
        let _in_flight = InFlight(&self.in_flight);

        let generation = self.clear();
        let request = validate(distance_km, &conditions)?;

        info!(
            "Requesting fare for {:.2} km, {}, {}, {}, {}",
            request.distance_km(),
            request.fuel_price(),
            request.time_of_day(),
            request.weather(),
            request.vehicle_type()
        );
        debug!("Encoded features {:?}", request.features());

        let estimate = self.model.predict(&request).await.inspect_err(|error| {
            warn!("Fare request failed: {}", error);
        })?;

        let mut slot = self.slot.lock();
        if slot.generation == generation {
            slot.estimate = Some(estimate);
        } else {
            debug!("Estimate {} arrived after the inputs changed, not kept", estimate);
        }

        Ok(estimate)
    }
}
