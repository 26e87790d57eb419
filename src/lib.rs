//! Generates TypeScript interfaces and typed request functions from swagger
//! 2.0 JSON documents.

pub mod comment;
pub mod definitions;
pub mod error;
pub mod mapper;
pub mod naming;
pub mod parser;
pub mod routes;
pub mod schema;
pub mod walker;

pub use error::GenError;
pub use mapper::{IdPolicy, TsType, TypeMapper};
pub use parser::{generate_ts_from_swagger, parse_swagger_file};
pub use walker::{generate_all, translate_file, GenOptions, GenReport};
