//! Persistence implementations

mod converters;
mod postgres;
mod rows;
mod tables;

pub use postgres::{
    PostgresConfigurationRuleRepository, PostgresItemRepository, PostgresJobRepository,
    PostgresMethodRepository, PostgresProcedureRepository, PostgresQuoteRepository,
    PostgresResourceRepository,
};
