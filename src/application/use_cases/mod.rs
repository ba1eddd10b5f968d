//! Use case implementations.

mod inspect_payloads_use_case;

pub use inspect_payloads_use_case::{
    InspectError, InspectOptions, InspectPayloadsUseCase, InspectStats,
};
