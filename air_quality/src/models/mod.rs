pub mod bucket;
pub mod current;
pub mod location;
