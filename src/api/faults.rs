use rand::Rng;
use std::fmt::Debug;

/// Decides whether a simulated call should pretend the backend is down
pub trait FaultPolicy: Debug + Send + Sync {
    /// `probability` is the configured failure rate of the call, 0.0–1.0
    fn should_fail(&self, probability: f64) -> bool;
}

/// Fails at the configured rate using the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFaults;

impl FaultPolicy for RandomFaults {
    fn should_fail(&self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        rand::rng().random::<f64>() < probability
    }
}

/// Never injects a failure
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverFail;

impl FaultPolicy for NeverFail {
    fn should_fail(&self, _probability: f64) -> bool {
        false
    }
}

/// Injects a failure on every call that has a non-zero failure rate
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysFail;

impl FaultPolicy for AlwaysFail {
    fn should_fail(&self, probability: f64) -> bool {
        probability > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_never_fails() {
        let policy = RandomFaults;
        assert!((0..1000).all(|_| !policy.should_fail(0.0)));
        assert!(!AlwaysFail.should_fail(0.0));
    }

    #[test]
    fn certain_rate_always_fails() {
        let policy = RandomFaults;
        assert!((0..1000).all(|_| policy.should_fail(1.0)));
    }
}
