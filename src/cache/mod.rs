//! Route table persistence between passes.

mod routes;

pub use routes::{OPTIONS_FILE, PersistenceError, ROUTES_FILE, RouteCache};
