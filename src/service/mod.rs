pub mod check_in;
pub mod check_out;
pub mod summary;

pub use check_in::CheckInService;
pub use check_out::CheckOutService;
pub use summary::SummaryAggregator;
