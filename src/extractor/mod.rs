pub mod page_signals;

pub use page_signals::SignalExtractor;
