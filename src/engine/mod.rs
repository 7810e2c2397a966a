pub mod dashboard;
pub mod filter;
pub mod folders;
pub mod grouping;
pub mod timefmt;
pub mod timer;
