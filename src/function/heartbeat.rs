use axum::http::StatusCode;
use serde::Serialize;

use crate::{
  prelude::*,
  transport::{Request, Response},
};

#[derive(Debug, Serialize)]
pub struct Alive {
  pub status: &'static str,
}

pub fn handle(req: &Request) -> Result<Response> {
  let [api_key] = req.require(["api_key"])?;
  info!("Request API key {api_key}");

  Ok(Response::json(StatusCode::OK, &Alive { status: "success" }))
}
