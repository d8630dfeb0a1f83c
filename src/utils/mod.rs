pub mod format;
pub mod notify;
pub mod page;
pub mod table;

pub use format::{format_amount, format_money, format_rate, round_rate};
pub use notify::{Toast, ToastKind};
pub use page::Page;
pub use table::Table;
