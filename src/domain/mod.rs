pub mod dispatch;
pub mod lead;
pub mod submission;
