use chrono::DateTime;

use crate::models::lead_models::DataRequirement;

pub const SUBJECT: &str = "Welcome to HyphenBox - We've Received Your Data Collection Request";
pub const NOT_SPECIFIED: &str = "Not specified";

/// Budget codes offered by the intake form and how they read in the email.
pub const BUDGET_LABELS: [(&str, &str); 5] = [
    ("under-10k", "Under $10,000"),
    ("10k-50k", "$10,000 - $50,000"),
    ("50k-100k", "$50,000 - $100,000"),
    ("100k-plus", "$100,000+"),
    ("discuss", "To be discussed"),
];

pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

pub fn hardware_list(record: &DataRequirement) -> String {
    match record.hardware_setup.as_deref() {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Unknown codes are shown verbatim.
pub fn budget_label(code: Option<&str>) -> String {
    match code {
        None | Some("") => NOT_SPECIFIED.to_string(),
        Some(code) => BUDGET_LABELS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| code.to_string()),
    }
}

fn submitted_at(record: &DataRequirement) -> String {
    match record.created_at.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.format("%B %-d, %Y at %H:%M %Z").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "unknown".to_string(),
    }
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

fn html_inline_item(label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="info-item"><span class="label">{}</span> <span class="value">{}</span></div>"#,
        label, value_html
    )
}

fn html_block_item(label: &str, value: &str) -> String {
    format!(
        r#"<div class="info-item"><span class="label">{}</span><div style="margin-top: 5px;">{}</div></div>"#,
        label,
        escape_html(value)
    )
}

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }
    .content { background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }
    .info-section { background: white; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
    .info-item { margin-bottom: 15px; padding-bottom: 15px; border-bottom: 1px solid #eee; }
    .info-item:last-child { border-bottom: none; margin-bottom: 0; padding-bottom: 0; }
    .label { font-weight: bold; color: #555; display: inline-block; width: 150px; }
    .requirements-section { background: #fff3cd; padding: 20px; border-radius: 8px; border-left: 4px solid #ffc107; margin-top: 20px; }
    .footer { text-align: center; color: #777; font-size: 12px; margin-top: 30px; }
    .highlight { background: #e3f2fd; padding: 2px 4px; border-radius: 3px; }
"#;

pub fn render_html(record: &DataRequirement) -> String {
    let name = escape_html(&record.full_name);
    let email = escape_html(&record.email);
    let company = escape_html(&record.company);
    let hardware = escape_html(&hardware_list(record));
    let budget = escape_html(&budget_label(record.budget_range()));

    let mut contact = vec![
        html_inline_item("Name:", &name),
        html_inline_item("Email:", &format!(r#"<a href="mailto:{0}">{0}</a>"#, email)),
    ];
    if let Some(phone) = record.phone() {
        let phone = escape_html(phone);
        contact.push(html_inline_item("Phone:", &format!(r#"<a href="tel:{0}">{0}</a>"#, phone)));
    }
    contact.push(html_inline_item("Company:", &company));
    if let Some(role) = record.role_title() {
        contact.push(html_inline_item("Role/Title:", &escape_html(role)));
    }

    let mut requirements = Vec::new();
    if let Some(data_type) = record.data_type() {
        requirements.push(html_block_item("Data Type Needed:", data_type));
    }
    if let Some(amount) = record.data_amount() {
        requirements.push(html_block_item("Data Amount:", amount));
    }
    if let Some(timeline) = record.timeline() {
        requirements.push(html_block_item("Timeline:", timeline));
    }
    requirements.push(html_inline_item("Hardware Setup:", &hardware));
    if let Some(extra) = record.additional_hardware() {
        requirements.push(html_block_item("Additional Hardware:", extra));
    }
    requirements.push(html_inline_item(
        "Budget Range:",
        &format!(r#"<span class="highlight">{}</span>"#, budget),
    ));

    let timeline_line = record
        .timeline()
        .map(|t| format!("<p>They need the data <strong>{}</strong>.</p>", escape_html(&t.to_lowercase())))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <style>{style}</style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1>🤖 New Data Collection Request</h1>
        <p style="margin: 10px 0 0 0;">HyphenBox Landing Page Form Submission</p>
      </div>
      <div class="content">
        <div class="info-section">
          <h2 style="color: #667eea; margin-bottom: 20px;">Contact Information</h2>
          {contact}
        </div>
        <div class="info-section">
          <h2 style="color: #667eea; margin-bottom: 20px;">Project Requirements</h2>
          {requirements}
        </div>
        <div class="requirements-section">
          <h3 style="margin-top: 0;">📋 Summary</h3>
          <p><strong>{name}</strong> from <strong>{company}</strong> is interested in data collection services.</p>
          {timeline_line}
          <p style="margin-bottom: 0;">Budget: <strong>{budget}</strong></p>
        </div>
        <div class="footer">
          <p>This email was automatically generated from a form submission on hyphenbox.com</p>
          <p>Submission ID: {id}</p>
          <p>Submitted at: {submitted}</p>
        </div>
      </div>
    </div>
  </body>
</html>"#,
        style = STYLE,
        contact = contact.join("\n          "),
        requirements = requirements.join("\n          "),
        name = name,
        company = company,
        timeline_line = timeline_line,
        budget = budget,
        id = escape_html(&record.id().unwrap_or_else(|| "unknown".to_string())),
        submitted = escape_html(&submitted_at(record)),
    )
}

pub fn render_text(record: &DataRequirement) -> String {
    let hardware = hardware_list(record);
    let budget = budget_label(record.budget_range());

    let mut lines = vec![
        "New Data Collection Request from HyphenBox Landing Page".to_string(),
        String::new(),
        "CONTACT INFORMATION".to_string(),
        "-------------------".to_string(),
        format!("Name: {}", record.full_name),
        format!("Email: {}", record.email),
    ];
    if let Some(phone) = record.phone() {
        lines.push(format!("Phone: {}", phone));
    }
    lines.push(format!("Company: {}", record.company));
    if let Some(role) = record.role_title() {
        lines.push(format!("Role/Title: {}", role));
    }

    lines.extend([
        String::new(),
        "PROJECT REQUIREMENTS".to_string(),
        "--------------------".to_string(),
    ]);
    if let Some(data_type) = record.data_type() {
        lines.push(format!("Data Type Needed: {}", data_type));
    }
    if let Some(amount) = record.data_amount() {
        lines.push(format!("Data Amount: {}", amount));
    }
    if let Some(timeline) = record.timeline() {
        lines.push(format!("Timeline: {}", timeline));
    }
    lines.push(format!("Hardware Setup: {}", hardware));
    if let Some(extra) = record.additional_hardware() {
        lines.push(format!("Additional Hardware: {}", extra));
    }
    lines.push(format!("Budget Range: {}", budget));

    lines.extend([
        String::new(),
        "SUMMARY".to_string(),
        "-------".to_string(),
        format!(
            "{} from {} is interested in data collection services.",
            record.full_name, record.company
        ),
    ]);
    if let Some(timeline) = record.timeline() {
        lines.push(format!("They need the data {}.", timeline.to_lowercase()));
    }
    lines.push(format!("Budget: {}", budget));

    lines.extend([
        String::new(),
        "---".to_string(),
        format!("Submission ID: {}", record.id().unwrap_or_else(|| "unknown".to_string())),
        format!("Submitted at: {}", submitted_at(record)),
    ]);

    lines.join("\n")
}

pub fn render(record: &DataRequirement) -> RenderedEmail {
    RenderedEmail {
        html: render_html(record),
        text: render_text(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead_models::RecordId;

    fn minimal_record() -> DataRequirement {
        DataRequirement {
            id: Some(RecordId::Text("4f7c".to_string())),
            full_name: "Jane Roe".to_string(),
            email: "jane@acme.io".to_string(),
            phone: None,
            company: "Acme".to_string(),
            role_title: None,
            data_type: None,
            data_amount: None,
            timeline: None,
            hardware_setup: None,
            additional_hardware: None,
            budget_range: None,
            created_at: Some("2026-10-18T09:30:00+00:00".to_string()),
        }
    }

    #[test]
    fn budget_labels_cover_every_code() {
        assert_eq!(budget_label(Some("under-10k")), "Under $10,000");
        assert_eq!(budget_label(Some("10k-50k")), "$10,000 - $50,000");
        assert_eq!(budget_label(Some("50k-100k")), "$50,000 - $100,000");
        assert_eq!(budget_label(Some("100k-plus")), "$100,000+");
        assert_eq!(budget_label(Some("discuss")), "To be discussed");
    }

    #[test]
    fn budget_label_falls_back() {
        assert_eq!(budget_label(Some("1m-plus")), "1m-plus");
        assert_eq!(budget_label(Some("")), NOT_SPECIFIED);
        assert_eq!(budget_label(None), NOT_SPECIFIED);
    }

    #[test]
    fn hardware_list_joins_or_placeholder() {
        let mut record = minimal_record();
        assert_eq!(hardware_list(&record), NOT_SPECIFIED);
        record.hardware_setup = Some(vec![]);
        assert_eq!(hardware_list(&record), NOT_SPECIFIED);
        record.hardware_setup = Some(vec!["UMI".to_string(), "ALOHA".to_string()]);
        assert_eq!(hardware_list(&record), "UMI, ALOHA");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let rendered = render(&minimal_record());
        for label in ["Phone:", "Role/Title:", "Data Type Needed:", "Data Amount:", "Timeline:", "Additional Hardware:"] {
            assert!(!rendered.html.contains(label), "html should not contain {}", label);
            assert!(!rendered.text.contains(label), "text should not contain {}", label);
        }
        assert!(rendered.text.contains("Hardware Setup: Not specified"));
        assert!(rendered.text.contains("Budget Range: Not specified"));
        assert!(!rendered.text.contains("They need the data"));
    }

    #[test]
    fn full_record_renders_every_field() {
        let mut record = minimal_record();
        record.phone = Some("+1 555 0100".to_string());
        record.role_title = Some("CTO".to_string());
        record.data_type = Some("Bimanual assembly".to_string());
        record.data_amount = Some("5,000 demos".to_string());
        record.timeline = Some("Within 6 Weeks".to_string());
        record.hardware_setup = Some(vec!["UMI".to_string(), "ALOHA".to_string()]);
        record.additional_hardware = Some("Wrist cameras".to_string());
        record.budget_range = Some("10k-50k".to_string());

        let rendered = render(&record);
        for needle in ["+1 555 0100", "CTO", "Bimanual assembly", "5,000 demos", "UMI, ALOHA", "Wrist cameras", "$10,000 - $50,000"] {
            assert!(rendered.html.contains(needle), "html missing {}", needle);
            assert!(rendered.text.contains(needle), "text missing {}", needle);
        }
        assert!(rendered.text.contains("They need the data within 6 weeks."));
        assert!(rendered.html.contains(r#"href="tel:+1 555 0100""#));
        assert!(rendered.text.contains("Submission ID: 4f7c"));
        assert!(rendered.text.contains("Submitted at: October 18, 2026 at 09:30"));
    }

    #[test]
    fn numeric_id_appears_in_both_footers() {
        let mut record = minimal_record();
        record.id = Some(RecordId::Number(42));
        let rendered = render(&record);
        assert!(rendered.html.contains("Submission ID: 42"));
        assert!(rendered.text.contains("Submission ID: 42"));
    }

    #[test]
    fn html_escapes_record_values() {
        let mut record = minimal_record();
        record.company = "<script>alert(1)</script>".to_string();
        let rendered = render(&record);
        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.html.contains("&lt;script&gt;"));
        // plain text is sent as-is
        assert!(rendered.text.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        let mut record = minimal_record();
        record.created_at = Some("yesterday".to_string());
        assert!(render_text(&record).contains("Submitted at: yesterday"));
    }
}
