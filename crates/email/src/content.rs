//! Contact message templates
//!
//! Shared by the SES and mock services so tests see exactly what the
//! studio inbox receives.

/// Subject line used for forwarded contact messages.
pub fn contact_subject(site_name: &str, subject: &str) -> String {
    format!("[{}] {}", site_name, subject.trim())
}

/// Plain-text body for a forwarded contact message.
pub fn contact_message_text(name: &str, email: &str, subject: &str, message: &str) -> String {
    format!(
        "New message from the contact form\n\n\
        Name: {}\n\
        Email: {}\n\
        Subject: {}\n\n\
        {}\n",
        name.trim(),
        email.trim(),
        subject.trim(),
        message.trim()
    )
}

/// HTML body for a forwarded contact message. All visitor input is escaped.
pub fn contact_message_html(name: &str, email: &str, subject: &str, message: &str) -> String {
    let paragraphs: String = message
        .trim()
        .split("\n\n")
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect();

    format!(
        r#"<html>
<body style="font-family: Georgia, serif; line-height: 1.6; color: #222; background: #fffde9;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="font-weight: normal;">New message from the contact form</h2>
    <table style="margin-bottom: 20px;">
      <tr><td><strong>Name</strong></td><td>{name}</td></tr>
      <tr><td><strong>Email</strong></td><td><a href="mailto:{email}">{email}</a></td></tr>
      <tr><td><strong>Subject</strong></td><td>{subject}</td></tr>
    </table>
    {paragraphs}
  </div>
</body>
</html>"#,
        name = escape_html(name.trim()),
        email = escape_html(email.trim()),
        subject = escape_html(subject.trim()),
        paragraphs = paragraphs,
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
