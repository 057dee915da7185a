mod fault_tests;
pub mod helpers;
