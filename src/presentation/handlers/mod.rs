mod extract_medicines;
mod health;

pub use extract_medicines::{extract_medicines_handler, ExtractMedicinesResponse};
pub use health::health_handler;
