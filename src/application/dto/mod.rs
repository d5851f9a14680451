/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod notice_request;
mod notice_response;
mod output_encoding;

pub use notice_request::NoticeRequest;
pub use notice_response::NoticeResponse;
pub use output_encoding::OutputEncoding;
