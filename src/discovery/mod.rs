/// Discovery layer - turns one input (directory, archive, identifier
/// list, or single identifier) into an ordered, deduplicated set of
/// package references.
pub mod discoverer;
pub mod input_descriptor;

pub use discoverer::{Discoverer, DiscoveryOutcome};
pub use input_descriptor::InputDescriptor;
