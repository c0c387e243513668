pub mod google;
pub mod mock;
pub mod observability;
