//! Reusable R1CS gadgets for the reputation circuit
//!
//! Each gadget is a free function over `FpVar<F>` so the circuit can
//! compose them without committing to a curve:
//!
//! - [`comparison`]: shifted-decomposition comparators
//! - [`range_check`]: bit-width and interval checks
//! - [`division`]: scaled Euclidean division with a witnessed quotient
//! - [`aggregation`]: weighted sum with an enforced weight total
//! - [`review_mask`]: capacity-slot masking for variable review counts
//! - [`sigmoid`]: clamped-linear response-time scoring

pub mod aggregation;
pub mod comparison;
pub mod division;
pub mod range_check;
pub mod review_mask;
pub mod sigmoid;

pub use aggregation::weighted_sum;
pub use comparison::{enforce_less_or_equal, enforce_less_than, is_greater_or_equal, is_less_than};
pub use division::{div_with_remainder, DivisionResult};
pub use range_check::{enforce_bit_width, enforce_in_range, is_in_range};
pub use review_mask::{fold_reviews, MaskedReviews};
pub use sigmoid::response_score;
