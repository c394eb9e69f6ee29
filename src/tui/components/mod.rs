//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: header with status and endpoint
//! - `MessageBubble`: one chat message
//! - `ThinkingIndicator`: "CampusGPT is thinking..." placeholder
//! - `ErrorBanner`: last turn's failure
//! - `LandingPage`: welcome screen for an empty conversation
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: draft editor, reports edits and submissions
//! - `MessageList`: scrollable conversation with a height cache
//!
//! Components receive data as props rather than reaching into the session,
//! so each one can be rendered on a `TestBackend` in isolation.

pub mod error_banner;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod thinking;
pub mod title_bar;

pub use error_banner::ErrorBanner;
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
