pub mod category;
pub mod event_category_key;
pub mod event_id;
pub mod race_time;
pub mod result_record;

pub use category::{AgeBracket, BoatClass, Category, CategoryField, Discipline, OarType, SexBracket};
pub use event_category_key::EventCategoryKey;
pub use event_id::{EventId, RaceMarker, Season};
pub use result_record::{ResultRecord, SplitTime};
