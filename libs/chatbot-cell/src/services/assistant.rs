use doctor_cell::models::Doctor;
use service_cell::models::Service;

pub const SYSTEM_PROMPT: &str = "You are an AI dental assistant for SmileCare Dental Clinic. \n\
You help patients with:\n\
- Booking appointments\n\
- Answering questions about services (teeth whitening, implants, orthodontics, etc.)\n\
- Providing clinic information (hours: Mon-Fri 8AM-6PM, Sat 9AM-3PM)\n\
- Emergency dental care (24/7 available)\n\
- Insurance questions\n\
- Pricing information\n\
\n\
Be friendly, professional, and concise. If you don't know something, direct them to call (555) 123-4567.";

fn price_line(services: &[Service], needle: &str, template: impl Fn(&Service) -> String) -> String {
    services
        .iter()
        .find(|s| s.name.to_lowercase().contains(needle))
        .map(template)
        .unwrap_or_else(|| "Please check our services for pricing details.".to_string())
}

/// Keyword-scripted reply. Buckets are checked in a fixed order and the first
/// match wins, so "how much is whitening" hits the price bucket even though
/// it also mentions a service.
pub fn scripted_reply(message: &str, services: &[Service], doctors: &[Doctor]) -> String {
    let lower = message.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("service") || has("treatment") || has("offer") || has("what do you") {
        let mut response = String::from("🦷 **Our Dental Services:**\n\n");
        for s in services {
            response.push_str(&format!(
                "• **{}**: ${}\n  {}\n  Duration: {} minutes\n\n",
                s.name,
                s.price,
                s.description.as_deref().unwrap_or(""),
                s.duration_minutes
            ));
        }
        response.push_str("Which service interests you?");
        response
    } else if has("price") || has("cost") || has("how much") {
        if has("whitening") {
            price_line(services, "whitening", |s| {
                format!(
                    "Teeth Whitening costs ${} and takes {} minutes. 😁",
                    s.price, s.duration_minutes
                )
            })
        } else if has("implant") {
            price_line(services, "implant", |s| {
                format!(
                    "Dental Implants cost ${}. This includes consultation and procedure. 🦷",
                    s.price
                )
            })
        } else if has("root canal") {
            price_line(services, "root", |s| {
                format!("Root Canal Treatment costs ${}. 💪", s.price)
            })
        } else if has("orthodontic") || has("braces") {
            price_line(services, "orthodontic", |s| {
                format!(
                    "Orthodontic Treatment costs ${}. This includes braces and aligners. 😬",
                    s.price
                )
            })
        } else {
            let mut response = String::from("💰 **Service Prices:**\n\n");
            for s in services {
                response.push_str(&format!("• {}: ${}\n", s.name, s.price));
            }
            response.push_str("\nNeed details on a specific service?");
            response
        }
    } else if has("doctor") || has("dentist") || has("specialist") || has("who are") {
        let mut response = String::from("👨‍⚕️ **Meet Our Expert Team:**\n\n");
        for d in doctors {
            response.push_str(&format!("**{}**\n", d.display_name()));
            response.push_str(&format!("{}\n", d.specialization));
            response.push_str(&format!(
                "⭐ {}/5 rating | {} years experience\n",
                d.rating.unwrap_or(0.0),
                d.years_of_experience.unwrap_or(0)
            ));
            response.push_str(&format!("{}\n\n", d.bio.as_deref().unwrap_or("")));
        }
        response.push_str("Would you like to book with a specific doctor?");
        response
    } else if has("hour") || has("time") || has("open") || has("close") || has("when") || has("weekend")
    {
        "🕐 **Working Hours:**\n\n\
         📅 Monday - Friday: 8:00 AM - 6:00 PM\n\
         📅 Saturday: 9:00 AM - 3:00 PM\n\
         📅 Sunday: Closed\n\n\
         We also offer emergency appointments! 🚨"
            .to_string()
    } else if has("location") || has("address") || has("where") || has("contact") || has("phone")
        || has("email")
    {
        "📍 **SmileCare Dental Clinic**\n\n\
         🏢 123 Dental Street\nCity Center, State 12345\n\n\
         📞 Phone: (555) 123-4567\n\
         ✉️ Email: info@smilecare.com\n\n\
         Conveniently located in the heart of the city!"
            .to_string()
    } else if has("book") || has("appointment") || has("schedule") || has("reserve") || has("visit")
    {
        "📅 **Book Your Appointment:**\n\n\
         1️⃣ Click \"Book Now\" button on our website\n\
         2️⃣ Select your preferred service\n\
         3️⃣ Choose your doctor\n\
         4️⃣ Pick a convenient date & time\n\n\
         Or call us at (555) 123-4567 for immediate booking! 📞"
            .to_string()
    } else if has("insurance") || has("payment") {
        "💳 **Insurance & Payment:**\n\n\
         ✅ We accept most major insurance plans\n\
         ✅ Flexible payment plans available\n\
         ✅ Credit cards accepted\n\
         ✅ Transparent pricing - no hidden fees\n\n\
         Contact us to verify your insurance coverage!"
            .to_string()
    } else if has("emergency") || has("urgent") {
        "🚨 **Emergency Dental Care:**\n\n\
         We provide same-day emergency appointments!\n\n\
         📞 Call us immediately at (555) 123-4567\n\
         Available during working hours and on-call for emergencies."
            .to_string()
    } else if has("hello") || has("hi") || has("hey") {
        "Hello! 👋 Welcome to SmileCare Dental Clinic!\n\n\
         How can I assist you today?\n\n\
         You can ask me about:\n\
         • Our services and prices 🦷\n\
         • Our doctors 👨‍⚕️\n\
         • Booking appointments 📅\n\
         • Working hours 🕐\n\
         • Location and contact 📍"
            .to_string()
    } else {
        "🤖 I'm here to help!\n\n\
         You can ask me about:\n\n\
         🦷 Our dental services and prices\n\
         👨‍⚕️ Our experienced doctors\n\
         📅 Booking an appointment\n\
         🕐 Working hours\n\
         📍 Location and contact info\n\
         💳 Insurance and payment options\n\
         🚨 Emergency dental care\n\n\
         What would you like to know?"
            .to_string()
    }
}
