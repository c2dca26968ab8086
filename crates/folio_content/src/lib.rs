//! Portfolio content: the background particle field and the featured
//! project catalog.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod particles;
pub mod projects;

pub use error::CatalogError;
pub use particles::{DEFAULT_PARTICLE_COUNT, Particle, particle_field, seeded_random};
pub use projects::{ALL_CATEGORIES, Catalog, Project, ProjectQuery, RELATED_LIMIT};
