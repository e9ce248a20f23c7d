/// Entity mapping and constraint tests against an in-memory database
pub mod entity_tests;
