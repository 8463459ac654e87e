pub mod models;
pub mod services;
pub mod templates;

pub use models::BookingNotice;
pub use services::mailer::{
    dispatch_booking_notices, dispatch_cancelled_notice, dispatch_confirmed_notice, MailError,
    Mailer,
};
