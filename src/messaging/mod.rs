//! # Messaging Module
//!
//! Inbound message validation and dispatch for agent workflow instances.
//!
//! ## Overview
//!
//! Messages arrive at a workflow instance from the transport layer, pass
//! through the [`MessageProcessor`] state machine (type filter, tenant
//! decode, handler lookup, tenant isolation, identity match), and on success
//! reach the registered application handler via the dual-mode executor.
//! Validation failures become visible error responses to the participant;
//! they never fail the hosting workflow instance.

pub mod activities;
pub mod errors;
pub mod message;
pub mod processor;
pub mod response;

pub use activities::MessagingActivities;
pub use errors::{MessagingError, MessagingResult};
pub use message::{HandlerRequest, HistoryEntry, InboundMessage, MessagePayload, MessageType};
pub use processor::{DispatchOutcome, DropReason, MessageProcessor, RejectionKind};
pub use response::{MessageResponder, OutgoingResponse, ResponseKind, ResponseSender};
