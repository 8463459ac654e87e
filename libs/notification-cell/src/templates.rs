use crate::models::BookingNotice;

pub const CLINIC_NAME: &str = "SmileCare Dental Clinic";

fn detail_rows(notice: &BookingNotice) -> String {
    format!(
        "<ul>\
         <li><strong>Service:</strong> {} (${:.2})</li>\
         <li><strong>Doctor:</strong> {}</li>\
         <li><strong>Date:</strong> {}</li>\
         <li><strong>Time:</strong> {}</li>\
         </ul>",
        notice.service_name,
        notice.service_price,
        notice.doctor_name,
        notice.appointment_date,
        notice.appointment_time,
    )
}

/// Sent to the patient right after a booking lands, while it is still pending.
pub fn booking_confirmation(notice: &BookingNotice) -> (String, String) {
    let subject = format!("✅ Booking Confirmation - {}", CLINIC_NAME);
    let html = format!(
        "<h2>Thank you for your booking, {}!</h2>\
         <p>We have received your appointment request. It is currently pending \
         and our team will confirm it shortly.</p>\
         {}\
         <p>If you need to make changes, reply to this email or call the clinic.</p>\
         <p>{}</p>",
        notice.patient_name,
        detail_rows(notice),
        CLINIC_NAME,
    );
    (subject, html)
}

/// Sent to the patient when staff move the appointment to confirmed.
pub fn appointment_confirmed(notice: &BookingNotice) -> (String, String) {
    let subject = format!("✅ Appointment Confirmed - {}", CLINIC_NAME);
    let html = format!(
        "<h2>Your appointment is confirmed, {}!</h2>\
         <p>We look forward to seeing you.</p>\
         {}\
         <p>Please arrive 10 minutes early.</p>\
         <p>{}</p>",
        notice.patient_name,
        detail_rows(notice),
        CLINIC_NAME,
    );
    (subject, html)
}

/// Sent to the patient when the appointment is cancelled.
pub fn appointment_cancelled(notice: &BookingNotice) -> (String, String) {
    let subject = format!("❌ Appointment Cancelled - {}", CLINIC_NAME);
    let html = format!(
        "<h2>Your appointment has been cancelled</h2>\
         <p>Hello {}, the following appointment was cancelled:</p>\
         {}\
         <p>You can book a new appointment any time on our website.</p>\
         <p>{}</p>",
        notice.patient_name,
        detail_rows(notice),
        CLINIC_NAME,
    );
    (subject, html)
}

/// Sent to the clinic admin inbox for every new booking.
pub fn admin_new_booking(notice: &BookingNotice) -> (String, String) {
    let subject = "🔔 New Appointment Booking - SmileCare Admin".to_string();
    let html = format!(
        "<h2>New booking received</h2>\
         <p><strong>Patient:</strong> {} ({})</p>\
         {}\
         <p>Review and confirm it in the admin panel.</p>",
        notice.patient_name,
        notice.patient_email,
        detail_rows(notice),
    );
    (subject, html)
}
