pub mod macros;
pub mod mpool;
pub mod traits;
