pub mod offer;
pub mod redemption_coupon;
pub mod redemption_instant;
pub mod reward;
pub mod store;
pub mod submission;

pub use redemption_coupon::CouponStatus;
pub use submission::SubmissionStatus;
