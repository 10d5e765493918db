pub mod error;
pub mod sources;
pub mod traits;

pub use error::{ImporterError, Result};
pub use traits::{ImportContext, ResultSource};

pub use sources::crewtimer::{CrewTimerSource, CrewTimerTransformer};
