use sea_orm::sea_query::{Expr, SimpleExpr};

pub mod coupon;
pub mod instant;
pub mod store;

pub use coupon::Coupon;
pub use instant::Instant;
pub use store::Store;

/// The store's own clock. Expiry checks and redemption stamps all use it.
fn db_now() -> SimpleExpr {
  Expr::cust("CURRENT_TIMESTAMP")
}
