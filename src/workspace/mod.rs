//! Build workspace layout and pre-flight validation.
//!
//! Paths are derived from the base directory and the resolved release version;
//! the validator confirms the environment and filesystem before anything is
//! extracted or uploaded.

mod layout;
mod validator;

pub use layout::ReleaseLayout;
pub use validator::{Credentials, require_base_dir, require_credentials, validate_layout};
