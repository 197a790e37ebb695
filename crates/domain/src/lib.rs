//! Domain layer for the emergency department locator
//!
//! Contains the value objects and entities that describe a nearest-department
//! search: coordinates, service categories, raw facility candidates and the
//! resolved location records handed to callers.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
