pub mod coordinates;
pub mod course;
pub mod listing;
pub mod preferences;

pub use coordinates::ProjectedPoint;
pub use course::{
    CourseDraft, CourseLeg, CourseRecord, CourseResponse, Locale, NewCourse, PlaceRecord,
    PlaceStop, SearchResponse,
};
pub use listing::{strip_markup, PlaceCategory, RawListing, ScoredListing};
pub use preferences::{
    CourseRequest, FreeTextSearchParams, Mbti, Preferences, SortBy, Theme, TransportMode,
};
