pub mod clock;
pub mod logging;

pub use clock::{Clock, SystemClock};
pub use logging::LoggingHelper;
