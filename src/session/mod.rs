//! Framework-free state behind each view.
//!
//! Views hold these in signals and feed them backend results; everything
//! here can be exercised without a renderer.

pub mod chat;
pub mod documents;
pub mod poller;
pub mod upload;

pub use chat::ChatSession;
pub use documents::{DocumentShelf, FetchTicket};
pub use poller::poll_until_complete;
pub use upload::{Notice, NoticeKind, PickedFile, UploadPhase, UploadSession, UploadUpdate, run_upload};
