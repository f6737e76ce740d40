pub mod registry;
pub mod traits;

pub use registry::InMemoryDatasourceService;
pub use traits::{DatasourceService, LoadedDatasource};
