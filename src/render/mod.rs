pub mod markdown;
pub mod page;
