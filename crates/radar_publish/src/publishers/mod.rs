//! Built-in publishers.

pub mod twbyor;
pub mod zalando;

pub use twbyor::TwByorPublisher;
pub use zalando::ZalandoPublisher;
