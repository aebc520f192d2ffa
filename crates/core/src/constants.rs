use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Base currency every holding is valued in
pub const BASE_CURRENCY: &str = "USD";

/// Target-allocation bucket collecting currencies without their own target
pub const OTHER_ASSET_CLASS: &str = "OTHER";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Percentage multiplier
pub const ONE_HUNDRED: Decimal = dec!(100);

/// Upper bound of the risk scale
pub const MAX_RISK_WEIGHT: Decimal = dec!(10);

/// Weights strictly above this count as speculative
pub const SPECULATIVE_RISK_THRESHOLD: Decimal = dec!(5);

/// Currency distribution entries at or below this percentage are dropped
pub const MIN_DISTRIBUTION_PCT: Decimal = dec!(0.01);

/// Grams to troy ounces
pub const GRAMS_TO_TROY_OUNCES: Decimal = dec!(0.0321507);

/// Cache key the dynamic BTC risk factor is published under
pub const BTC_RISK_CACHE_KEY: &str = "btc_risk_factor";
