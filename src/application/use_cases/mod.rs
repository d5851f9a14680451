/// Use cases module containing application business logic orchestration
mod generate_notices;

pub use generate_notices::GenerateNoticesUseCase;
