pub mod controller;
pub mod input;
pub mod store;

pub use controller::{PredictionController, Submission};
pub use input::{InputError, RawReadings, RawValue, SensorInput};
pub use store::PredictionStore;
