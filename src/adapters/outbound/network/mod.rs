/// Network adapters - Registry-backed implementation of the lookup port
pub mod registry_lookup;

pub use registry_lookup::RegistryMetadataLookup;
