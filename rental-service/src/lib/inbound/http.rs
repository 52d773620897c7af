pub mod extractors;
pub mod handlers;
pub mod router;

pub use router::create_router;
pub use router::Adapters;
pub use router::AppState;
