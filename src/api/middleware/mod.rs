mod timeout;
pub use timeout::RequestDeadline;
