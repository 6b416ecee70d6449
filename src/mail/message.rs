use chrono::Utc;

use super::CONTACT_RECIPIENT;

/// A fully rendered outbound email, derived from one contact submission.
/// Ephemeral: exists only for the duration of the send call.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingEmail {
    /// Renders a contact-form submission into HTML and plaintext bodies.
    ///
    /// Submitted fields are embedded verbatim, without HTML escaping.
    pub fn contact_form(
        sender: &str,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Self {
        let submitted = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        Self {
            from: format!("\"{name}\" <{sender}>"),
            to: CONTACT_RECIPIENT.to_string(),
            reply_to: email.to_string(),
            subject: format!("Contact Form: {subject}"),
            html: render_html(name, email, subject, message, &submitted),
            text: render_text(name, email, subject, message, &submitted),
        }
    }
}

fn render_html(name: &str, email: &str, subject: &str, message: &str, submitted: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: linear-gradient(135deg, #9333ea 0%, #4f46e5 100%); color: white; padding: 20px; border-radius: 8px 8px 0 0; }}
    .content {{ background: #f9f9f9; padding: 30px; border: 1px solid #e0e0e0; }}
    .field {{ margin-bottom: 20px; }}
    .label {{ font-weight: bold; color: #666; display: block; margin-bottom: 5px; }}
    .value {{ background: white; padding: 10px; border-radius: 4px; border: 1px solid #e0e0e0; }}
    .footer {{ background: #f0f0f0; padding: 15px; text-align: center; font-size: 12px; color: #666; border-radius: 0 0 8px 8px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h2 style="margin: 0;">New Contact Form Submission - Deals247</h2>
    </div>
    <div class="content">
      <div class="field">
        <span class="label">From:</span>
        <div class="value">{name}</div>
      </div>
      <div class="field">
        <span class="label">Email:</span>
        <div class="value"><a href="mailto:{email}">{email}</a></div>
      </div>
      <div class="field">
        <span class="label">Subject:</span>
        <div class="value">{subject}</div>
      </div>
      <div class="field">
        <span class="label">Message:</span>
        <div class="value" style="white-space: pre-wrap;">{message}</div>
      </div>
      <div class="field">
        <span class="label">Submitted:</span>
        <div class="value">{submitted}</div>
      </div>
    </div>
    <div class="footer">
      <p>This email was sent from the Deals247 contact form at deals247.online</p>
    </div>
  </div>
</body>
</html>
"#
    )
}

fn render_text(name: &str, email: &str, subject: &str, message: &str, submitted: &str) -> String {
    format!(
        "Name: {name}\nEmail: {email}\nSubject: {subject}\n\nMessage:\n{message}\n\nSubmitted: {submitted}\n"
    )
}
