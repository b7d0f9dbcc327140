pub mod errors;
pub mod implementors;
pub mod memory;
pub mod traits;
