//! Payload-to-entity materialization

mod entity_builder;

pub use entity_builder::EntityBuilder;
