//! Entry identifier generation.

use uuid::Uuid;

/// Produces the opaque unique identifiers assigned to surviving entries in
/// the batch driver's final sweep. Injectable so tests can use deterministic
/// ids.
pub trait IdGenerator {
    fn new_id(&self) -> String;
}

/// Default generator: random UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
