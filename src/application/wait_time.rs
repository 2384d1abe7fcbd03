//! Wait-time estimation and alternative suggestions.
//!
//! All randomness comes in through [`RandomSource`]; the suggestion rule is a
//! pure function of service type and wait time.
//!
//! With the current constants a prediction never exceeds its threshold
//! (Bank peaks at 18 against 20, Restaurant at 13 against 15, Healthcare at
//! 28 against 30), so `predict` always answers "Wait time is acceptable.".
//! The constants are kept as they are and the tests pin that behavior.

use std::ops::RangeInclusive;

use crate::{
    application::ports::random::RandomSource, domain::entities::service_type::ServiceType,
};

/// Estimate for service types without a dedicated range.
pub const DEFAULT_WAIT_MINUTES: i32 = 10;

/// Perturbation applied to the historical average on prediction.
pub const PREDICTION_JITTER: RangeInclusive<i32> = -3..=3;

pub const DEFAULT_THRESHOLD_MINUTES: i32 = 15;

pub const ACCEPTABLE_WAIT: &str = "Wait time is acceptable.";
pub const NO_ALTERNATIVES: &str = "No alternatives available.";

/// Range drawn from when a ticket is created. `None` means the fixed default.
pub fn initial_range(service_type: ServiceType) -> Option<RangeInclusive<i32>> {
    match service_type {
        ServiceType::Bank => Some(10..=20),
        ServiceType::Restaurant => Some(5..=15),
        ServiceType::Healthcare => Some(15..=30),
        _ => None,
    }
}

/// Estimate written onto a freshly created ticket.
pub fn initial_estimate(service_type: ServiceType, random: &dyn RandomSource) -> i32 {
    initial_range(service_type)
        .map(|range| random.int_in(range))
        .unwrap_or(DEFAULT_WAIT_MINUTES)
}

pub fn historical_average(service_type: ServiceType) -> i32 {
    match service_type {
        ServiceType::Bank => 15,
        ServiceType::Restaurant => 10,
        ServiceType::Healthcare => 25,
        _ => DEFAULT_WAIT_MINUTES,
    }
}

/// Historical average plus a jitter drawn from [`PREDICTION_JITTER`].
pub fn predicted_estimate(service_type: ServiceType, random: &dyn RandomSource) -> i32 {
    historical_average(service_type) + random.int_in(PREDICTION_JITTER)
}

/// Waits strictly above this value get an alternative.
pub fn threshold(service_type: ServiceType) -> i32 {
    match service_type {
        ServiceType::Bank => 20,
        ServiceType::Restaurant => 15,
        ServiceType::Healthcare => 30,
        _ => DEFAULT_THRESHOLD_MINUTES,
    }
}

fn alternative_for(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::Bank => "Consider online banking or virtual teller.",
        ServiceType::Restaurant => "Consider ordering takeout or delivery.",
        ServiceType::Healthcare => "Consider telehealth services or a nearby clinic.",
        _ => NO_ALTERNATIVES,
    }
}

pub fn suggest_alternative(service_type: ServiceType, wait_minutes: i32) -> &'static str {
    if wait_minutes > threshold(service_type) {
        alternative_for(service_type)
    } else {
        ACCEPTABLE_WAIT
    }
}
