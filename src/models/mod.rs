//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL (pois, routes, waypoints, contents).

pub mod content;
pub mod poi;
pub mod route;

pub use content::{Content, NewContent};
pub use poi::{Category, Epoch, NewPoi, Poi, DEFAULT_IMPORTANCE};
pub use route::{NewRoute, Route, RouteStop, Waypoint};
