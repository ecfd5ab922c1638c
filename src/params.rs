//! Circuit-wide constants
//!
//! Bit widths are correctness-critical. Every comparator operand must fit
//! its declared width, and every derived value must stay below the width of
//! the comparison that orders it.

/// Fixed-point unit: 1000 represents 100%
pub const SCALE: u64 = 1000;

/// Number of weighted score components
pub const WEIGHT_COUNT: usize = 5;

/// Default component weights, in order: task completion, accuracy, uptime,
/// reviews, response time. Must sum to [`SCALE`].
pub const DEFAULT_WEIGHTS: [u64; WEIGHT_COUNT] = [250, 250, 200, 200, 100];

/// Fixed review slot capacity. `num_reviews` selects the active prefix;
/// slots at or past the count are masked out of every constraint.
pub const REVIEW_CAPACITY: usize = 10;

/// Bit width of raw metric counters (task counts, output counts, time totals)
pub const METRIC_BITS: usize = 32;

/// Largest raw metric value accepted by input validation
pub const MAX_METRIC_VALUE: u64 = (1u64 << METRIC_BITS) - 1;

/// Bit width for ratio-scale values: `[0, SCALE]` scores, quotients,
/// review counts and indices
pub const RATIO_BITS: usize = 16;

/// Bit width of timestamps
pub const TIME_BITS: usize = 64;

/// Bit width of response-time inputs
pub const RESPONSE_BITS: usize = 32;

/// Largest response time accepted by input validation
pub const MAX_RESPONSE_TIME: u64 = (1u64 << RESPONSE_BITS) - 1;

/// Response score at the point where response time equals the threshold
pub const SIGMOID_MIDPOINT: u64 = 500;

/// Default slope of the clamped-linear response curve
pub const DEFAULT_STEEPNESS: u64 = 1;

/// Largest steepness accepted by input validation. Keeps
/// `steepness * response_time` below [`SIGMOID_OFFSET`].
pub const MAX_STEEPNESS: u64 = 1u64 << 8;

/// Additive offset keeping the pre-clamp response value positive in the
/// field: `offset - MAX_STEEPNESS * MAX_RESPONSE_TIME > 0`
pub const SIGMOID_OFFSET: u64 = 1u64 << 41;

/// Bit width covering every offset pre-clamp response value
pub const SIGMOID_BITS: usize = 44;
