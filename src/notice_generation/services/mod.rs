/// Domain services - stateless logic over the domain model
pub mod assembler;
pub mod identifier;
pub mod manifest;

pub use assembler::NoticeAssembler;
pub use identifier::parse_identifier;
pub use manifest::ManifestKind;
