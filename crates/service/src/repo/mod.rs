//! Storage side of the stack: the predicate builder and the sea-orm repository.

pub mod filter;
pub mod stored;
pub mod seaorm;

pub use filter::PredicateBuilder;
pub use seaorm::SeaOrmRepository;
