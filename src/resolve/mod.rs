/// Resolution stage - the durable attribution cache and the bounded
/// concurrent resolver that fills it.
pub mod cache;
pub mod resolver;

pub use cache::{ResolutionCache, CACHE_SCHEMA_VERSION, RESOLVER_VERSION};
pub use resolver::{CancelFlag, ResolutionOutcome, ResolveOptions, Resolver};
