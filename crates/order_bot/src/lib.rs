pub mod commands;
pub mod dispatcher;
pub mod logger;
pub mod order_book;
pub mod runner;

pub use dispatcher::Dispatcher;
pub use order_book::OrderBook;
pub use runner::run_bot;
