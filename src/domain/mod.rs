// Quota domain types
pub mod quota;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
