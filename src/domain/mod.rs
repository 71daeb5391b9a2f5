// Domain module: knapsack and coverage models, errors and solver contracts

pub mod coverage;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use coverage::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
