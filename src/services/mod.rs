pub mod calendar;
pub mod content;
pub mod messaging;
pub mod sessions;
pub mod submission;
pub mod summary;
pub mod view;
pub mod wizard;
