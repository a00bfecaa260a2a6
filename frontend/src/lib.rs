//! Expense viewer: session handling, record normalization and the
//! filter/sort/aggregate pipeline behind the Yew frontend in `main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod records;
pub mod session;
pub mod storage;
pub mod view;

pub use config::AppConfig;
pub use error::{AuthError, FetchError, StorageError};
pub use loader::{load_expenses, DataSource, ExpenseSource, LoadOutcome, Origin};
pub use records::{format_date, normalize, ExpenseRecord, RawPage};
pub use session::{AuthGateway, AuthStatus, SessionState};
pub use storage::{KeyValueStore, LocalStorage, MemoryStore};
pub use view::{compute_view, SortDirection, SortField, SortSpec, ViewQuery, ViewStatus};
