//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod artifact_repo;
pub mod form_output_repo;
pub mod user_repo;

pub use artifact_repo::ArtifactRepo;
pub use form_output_repo::FormOutputRepo;
pub use user_repo::UserRepo;
