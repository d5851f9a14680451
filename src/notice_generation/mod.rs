/// Notice generation domain - the package reference model, resolved
/// attribution records, and the services that operate on them.
pub mod domain;
pub mod services;
