pub mod region_service;
pub mod test_service;
