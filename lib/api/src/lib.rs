//! REST API for symptomatch
//!
//! Endpoints:
//!
//! - `GET  /catalog`         - active catalog summary
//! - `GET  /catalog/sample`  - the expected CSV layout with sample rows
//! - `POST /catalog/upload`  - CSV body (optionally `?name=`), becomes the active catalog
//! - `POST /catalog/reload`  - re-read the active catalog source
//! - `POST /match`           - `{"symptoms": ..., "top_n"?, "strategy"?, "scorer"?, "floor"?}`

pub mod rest;

pub use rest::RestApi;
