//! Decade-wise trend growth estimation.
//!
//! Responsibilities:
//!
//! - keep only rows with a four-digit `Year` and a numeric `Total` (`filter`)
//! - fill missing years by linear interpolation (`interpolate`)
//! - split the series into decade buckets (`decades`)
//! - fit log-linear trends per bucket and overall (`rate`, `estimator`)

pub mod decades;
pub mod estimator;
pub mod filter;
pub mod interpolate;
pub mod rate;

pub use decades::*;
pub use estimator::*;
pub use filter::*;
pub use interpolate::*;
pub use rate::*;
