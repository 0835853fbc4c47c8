//! Catalog, favorites and credentials on top of a sea-orm database.
//!
//! Every operation lives on [`Engine`]. Writes run in a single transaction
//! each; reads go straight to the connection pool.

pub use credentials::Identity;
pub use error::EngineError;
pub use ops::{CatalogKind, DEFAULT_TOKEN_TTL_SECS, Engine, EngineBuilder, Favorites};
pub use users::User;

pub type Person = people::Model;
pub type Planet = planets::Model;
pub type Vehicle = vehicles::Model;

mod credentials;
mod error;
mod favorite_people;
mod favorite_planets;
mod favorite_vehicles;
mod ops;
mod people;
mod planets;
mod users;
mod vehicles;

type ResultEngine<T> = Result<T, EngineError>;
