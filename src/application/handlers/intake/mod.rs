//! Intake command and query handlers.

mod end_session;
mod get_session;
mod list_fields;
mod quick_assessment;
mod send_message;
mod start_session;

pub use end_session::{EndSessionCommand, EndSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_fields::ListFieldsHandler;
pub use quick_assessment::{QuickAssessmentCommand, QuickAssessmentHandler};
pub use send_message::{
    SendMessageCommand, SendMessageHandler, SendMessageResult, DEFAULT_MAX_MESSAGE_CHARS,
    DEFAULT_PREDICTION_TIMEOUT,
};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
