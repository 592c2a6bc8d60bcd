//! Financial calculator engine
//!
//! Pure, stateless calculators for retail investment and loan products:
//! SIP, step-up SIP, lumpsum, mutual fund returns, EMI, PPF, FD, RD, NPS,
//! SWP, CAGR, gratuity, goal planning and cost of delay.
//!
//! Every calculator takes plain numbers and returns a result record (and for
//! most, a yearly breakdown). Currency outputs are whole units, percentage
//! outputs carry two decimals. See [`rounding`] for the shared convention.

pub mod assumptions;
pub mod calculators;
pub mod catalog;
pub mod error;
pub mod format;
pub mod request;
pub mod rounding;

pub use assumptions::{Assumptions, GratuityRules, NpsRules, PpfRules};
pub use catalog::{CalculatorId, CalculatorInfo};
pub use error::CalcError;
pub use request::{CalculatorRequest, CalculatorResponse};
