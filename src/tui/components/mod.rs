//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `Header`: title and subtitle
//! - `StatusBar`: connectivity and knowledge-base size
//! - `WelcomePanel`: shown while the transcript is empty
//! - `MessageBubble` / `TypingIndicator`: one message, or the pending reply
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: single-line question entry
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Each component file holds its state types, event types, rendering,
//! event handling and tests together.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Title + subtitle)
//! ├── status_bar.rs    (Connected / documents / sources)
//! ├── welcome.rs       (Empty-transcript panel)
//! ├── message.rs       (Single message bubble + typing indicator)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Text input)
//! ```

pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod status_bar;
pub mod welcome;

pub use header::Header;
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use status_bar::StatusBar;
pub use welcome::WelcomePanel;
