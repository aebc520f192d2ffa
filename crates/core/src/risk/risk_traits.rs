use super::risk_model::RiskFactor;

/// Read access to the currently published dynamic risk factor.
///
/// Implementations must answer immediately. `None` means "no fresh factor";
/// the caller then applies the registry's static weight.
pub trait RiskFactorSource: Send + Sync {
    fn get(&self) -> Option<RiskFactor>;
}

/// A source that always answers with the same value.
///
/// Useful for what-if runs pinned to a chosen factor and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRiskFactor(pub Option<RiskFactor>);

impl RiskFactorSource for FixedRiskFactor {
    fn get(&self) -> Option<RiskFactor> {
        self.0
    }
}
