//! Private AI Agent Reputation - arkworks R1CS Implementation
//!
//! ZK circuits proving that an agent's weighted reputation clears a public
//! threshold without revealing the underlying metrics.
//!
//! # Statement
//!
//! - Private: task counts, output counts, uptime, review slots, response times
//! - Public: threshold, timestamp, validity period, qualification bit
//! - Relation: `reputation(metrics) >= threshold` inside the validity window
//!
//! # Available Gadgets
//!
//! | Gadget | Purpose | Constraints |
//! |--------|---------|-------------|
//! | `div_with_remainder` | scaled ratio with witnessed quotient | ~2·bits |
//! | `is_greater_or_equal` | shifted bit-decomposition comparator | ~bits |
//! | `enforce_in_range` | width plus interval bound | ~2·bits |
//! | `fold_reviews` | capacity-slot masking | ~10·bits |
//! | `response_score` | clamped-linear response curve | ~3·bits |
//! | `weighted_sum` | aggregation with pinned weight total | ~10 |
//!
//! # Interview Q&A
//!
//! Q: 왜 평판을 직접 공개하지 않고 비교 비트만 공개하는가?
//! A: 점수 자체도 경쟁 정보이기 때문
//!    검증자는 "threshold 이상인가"만 알면 충분
//!
//! Q: 유한 필드에서 실수 연산은 어떻게 하는가?
//! A: 모든 비율을 scale 1000 고정소수점으로 표현
//!    나눗셈은 몫/나머지 witness + 유클리드 등식으로 검증

pub mod error;
pub mod gadgets;
pub mod inputs;
pub mod native;
pub mod params;
pub mod reputation;


pub use error::{CircuitError, CircuitResult};
pub use inputs::{AgentMetrics, ReputationStatement};
pub use native::{evaluate, ReputationBreakdown};
pub use reputation::ReputationCircuit;
