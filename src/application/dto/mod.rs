//! Data transfer objects.

mod report_dto;

pub use report_dto::{event_report, message_facts, partial_message_facts};
