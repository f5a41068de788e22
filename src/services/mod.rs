pub mod course_builder;
pub mod lucky_region;
pub mod naver;
pub mod search_gateway;
