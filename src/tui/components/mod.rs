//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: top status line with backend URL, status and spinner
//! - `PostsList`: table of the selected user's posts
//! - `PostDetailsView`: selected post body and its comment thread
//! - `CommentFormView`: the new-comment form
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `UserSelector`: dropdown of users, reports the chosen user
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props", not by reaching into `App`.
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! PostsList { posts, selected: app.selected_post_id(), state: &mut tui.posts_table, focused }
//!     .render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── user_selector.rs (User dropdown)
//! ├── posts_list.rs    (Posts table)
//! ├── post_details.rs  (Post body + comments)
//! └── comment_form.rs  (New comment form)
//! ```

pub mod comment_form;
pub mod post_details;
pub mod posts_list;
mod title_bar;
pub mod user_selector;

pub use comment_form::CommentFormView;
pub use post_details::PostDetailsView;
pub use posts_list::PostsList;
pub use title_bar::{SPINNER, TitleBar};
pub use user_selector::{UserSelector, UserSelectorEvent, UserSelectorState};
