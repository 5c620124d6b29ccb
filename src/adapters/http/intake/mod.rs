//! HTTP adapter for intake endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AssessmentResponse, ErrorResponse, FieldListResponse, FieldResponse, NoticeResponse,
    QuickAssessmentRequest, SendMessageRequest, SessionResponse, TranscriptEntryResponse,
    TurnResponse,
};
pub use handlers::{IntakeApiError, IntakeAppState};
pub use routes::intake_router;
