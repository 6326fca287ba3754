//! The four request handlers, each a pure function of the app state and a
//! normalized request.

pub mod heartbeat;
pub mod redeem;
pub mod validate;
pub mod world;

use std::{fmt, str::FromStr};

use crate::{
  prelude::*,
  state::AppState,
  transport::{Request, Response},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
  Heartbeat,
  Validate,
  Redeem,
  World,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown function `{0}`")]
pub struct UnknownFunction(String);

impl FromStr for Function {
  type Err = UnknownFunction;

  /// Accepts a bare name (`redeem`) as well as a handler path whose last
  /// segment names the function (`bootstrap.redeem`).
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    let name = s.rsplit(['.', '/']).next().unwrap_or(s);
    match name.trim().to_ascii_lowercase().as_str() {
      "heartbeat" => Ok(Self::Heartbeat),
      "validate" => Ok(Self::Validate),
      "redeem" => Ok(Self::Redeem),
      "world" => Ok(Self::World),
      _ => Err(UnknownFunction(s.to_string())),
    }
  }
}

impl fmt::Display for Function {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Heartbeat => "heartbeat",
      Self::Validate => "validate",
      Self::Redeem => "redeem",
      Self::World => "world",
    };
    f.write_str(name)
  }
}

impl Function {
  /// Runs the function and converts any failure into its status response.
  pub async fn invoke(self, app: &AppState, req: &Request) -> Response {
    debug!("{self}: {} {}", req.method, req.path);

    let result = match self {
      Self::Heartbeat => heartbeat::handle(req),
      Self::Validate => validate::handle(app, req).await,
      Self::Redeem => redeem::handle(app, req).await,
      Self::World => world::handle(req),
    };

    result.unwrap_or_else(|err| {
      match &err {
        Error::Database(_) | Error::Internal(_) => {
          error!("{self}: {err}")
        }
        _ => warn!("{self}: {err}"),
      }
      Response::new(err.status())
    })
  }
}

/// Which pair of validate/redeem queries a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionKind {
  Coupon,
  Instant,
}

impl FromStr for RedemptionKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "COUPON" => Ok(Self::Coupon),
      "INSTANT" => Ok(Self::Instant),
      _ => Err(Error::BadRequest(format!("invalid redemption type `{s}`"))),
    }
  }
}
