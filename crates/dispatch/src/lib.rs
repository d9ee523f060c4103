pub mod compose;
pub mod dispatcher;
pub mod ledger;

pub use dispatcher::Dispatcher;
pub use ledger::ProcessedOrders;
