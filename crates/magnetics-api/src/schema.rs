use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct AdviseRequest {
    pub functional: Vec<magnetics_core::coil::WindingFunctionalDescription>,
    pub inputs: magnetics_core::mas::Inputs,
    pub top_k: Option<usize>,
}
