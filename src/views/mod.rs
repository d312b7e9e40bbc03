pub mod chat;
pub mod documents;
pub mod upload;

pub use chat::ChatInterface;
pub use documents::DocumentList;
pub use upload::FileUpload;
