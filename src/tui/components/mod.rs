//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; the component itself is a
//! transient wrapper built each frame around `&mut` state plus props.
//!
//! - `RecordList`: paged directory list, emits `EndReached` / `Open`
//! - `RecordDetail`: one record, emits `Back`
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status line)
//! ├── record_list.rs    (directory list + footer)
//! └── record_detail.rs  (detail screen)
//! ```

pub mod record_detail;
pub mod record_list;
mod title_bar;

pub use record_detail::{DetailEvent, RecordDetail, RecordDetailState};
pub use record_list::{Footer, ListEvent, RecordList, RecordListState};
pub use title_bar::TitleBar;
