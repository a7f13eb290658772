pub mod region;
pub mod test;
pub mod test_answer;

pub use region::{CityType, NewRegion, Region};
pub use test::{NewTest, Test};
pub use test_answer::{NewTestAnswer, TestAnswer};
