pub mod analyzer;
pub mod candles;
pub mod classifier;
pub mod confidence;
pub mod indicators;
pub mod levels;
pub mod narrative;
pub mod report;
pub mod rules;


pub use analyzer::*;
pub use classifier::*;
pub use confidence::*;
pub use indicators::*;
pub use levels::*;
pub use narrative::InstrumentProfile;
pub use report::*;
