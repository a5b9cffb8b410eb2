pub mod fetcher;
pub mod watcher;
