mod fetch;
mod files;

pub use fetch::run_fetch;
pub use files::run_files;
