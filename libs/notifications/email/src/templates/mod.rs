//! Email template management with Handlebars
//!
//! `TemplateEngine` ships with the templates the booking flow sends. Additional
//! templates can be registered at runtime.

use eyre::{eyre, Result};
use handlebars::Handlebars;
use serde_json::Value;
use std::collections::HashMap;

/// Name of the booking confirmation template
pub const BOOKING_CONFIRMATION: &str = "booking_confirmation";

/// Rendered template result
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Email template definition
#[derive(Clone, Debug)]
pub struct EmailTemplate {
    pub name: String,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Handlebars-based template engine
///
/// Supports:
/// - Variables: `{{name}}` (HTML escaped)
/// - Conditionals: `{{#if condition}}...{{/if}}`
/// - Raw output: `{{{unescaped}}}`
///
/// Rendering is strict: a variable missing from the data is an error rather
/// than an empty string.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateEngine {
    /// Create a new TemplateEngine with default templates
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        let mut engine = Self {
            handlebars,
            templates: HashMap::new(),
        };

        engine.register_defaults()?;

        Ok(engine)
    }

    /// Register a template
    pub fn register(&mut self, template: EmailTemplate) -> Result<()> {
        self.handlebars
            .register_template_string(&format!("{}_subject", template.name), &template.subject)
            .map_err(|e| eyre!("Failed to register subject template: {}", e))?;

        if let Some(text) = &template.body_text {
            self.handlebars
                .register_template_string(&format!("{}_text", template.name), text)
                .map_err(|e| eyre!("Failed to register text template: {}", e))?;
        }

        if let Some(html) = &template.body_html {
            self.handlebars
                .register_template_string(&format!("{}_html", template.name), html)
                .map_err(|e| eyre!("Failed to register HTML template: {}", e))?;
        }

        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Render a template by name
    pub fn render(&self, name: &str, data: &Value) -> Result<RenderedTemplate> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| eyre!("Template not found: {}", name))?;

        let subject = self
            .handlebars
            .render(&format!("{}_subject", name), data)
            .map_err(|e| eyre!("Failed to render subject: {}", e))?;

        let body_text = template
            .body_text
            .as_ref()
            .map(|_| {
                self.handlebars
                    .render(&format!("{}_text", name), data)
                    .map_err(|e| eyre!("Failed to render text: {}", e))
            })
            .transpose()?;

        let body_html = template
            .body_html
            .as_ref()
            .map(|_| {
                self.handlebars
                    .render(&format!("{}_html", name), data)
                    .map_err(|e| eyre!("Failed to render HTML: {}", e))
            })
            .transpose()?;

        Ok(RenderedTemplate {
            subject,
            body_text,
            body_html,
        })
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// List all registered templates
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }

    fn register_defaults(&mut self) -> Result<()> {
        // Expects: brand_name, username, booking_id, hotel_name, location,
        // check_in, currency, amount, year
        self.register(EmailTemplate {
            name: BOOKING_CONFIRMATION.to_string(),
            subject: "Your {{brand_name}} Booking Confirmation".to_string(),
            body_text: Some(
                r#"Dear {{username}},

Thank you for choosing {{brand_name}}! Here are your booking details:

Booking ID: {{booking_id}}
Hotel Name: {{hotel_name}}
Location: {{location}}
Date: {{check_in}}
Booking Amount: {{currency}} {{amount}}

We look forward to welcoming you! If you need to make any changes, feel free to contact us.

(c) {{year}} {{brand_name}}. All rights reserved."#
                    .to_string(),
            ),
            body_html: Some(
                r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: auto; border:1px solid #e0e0e0; padding:20px; border-radius:10px; background-color:#f9f9f9;">
    <h1 style="color:#1a73e8; text-align:center;">{{brand_name}}</h1>
    <h2 style="color:#333;">Your Booking Details</h2>
    <p>Dear <strong>{{username}}</strong>,</p>
    <p>Thank you for choosing <strong>{{brand_name}}</strong>! Here are your booking details:</p>
    <table style="width:100%; border-collapse: collapse; margin-top: 15px;">
        <tr>
            <td style="padding: 8px; border: 1px solid #ddd;"><strong>Booking ID:</strong></td>
            <td style="padding: 8px; border: 1px solid #ddd;">{{booking_id}}</td>
        </tr>
        <tr style="background-color:#f2f2f2;">
            <td style="padding: 8px; border: 1px solid #ddd;"><strong>Hotel Name:</strong></td>
            <td style="padding: 8px; border: 1px solid #ddd;">{{hotel_name}}</td>
        </tr>
        <tr>
            <td style="padding: 8px; border: 1px solid #ddd;"><strong>Location:</strong></td>
            <td style="padding: 8px; border: 1px solid #ddd;">{{location}}</td>
        </tr>
        <tr style="background-color:#f2f2f2;">
            <td style="padding: 8px; border: 1px solid #ddd;"><strong>Date:</strong></td>
            <td style="padding: 8px; border: 1px solid #ddd;">{{check_in}}</td>
        </tr>
        <tr>
            <td style="padding: 8px; border: 1px solid #ddd;"><strong>Booking Amount:</strong></td>
            <td style="padding: 8px; border: 1px solid #ddd;">{{currency}} {{amount}}</td>
        </tr>
    </table>
    <p style="margin-top: 20px;">We look forward to welcoming you! If you need to make any changes, feel free to contact us.</p>
    <p style="text-align:center; color:#888; font-size:12px; margin-top:30px;">
        &copy; {{year}} {{brand_name}}. All rights reserved.
    </p>
</div>"#
                    .to_string(),
            ),
        })?;

        Ok(())
    }
}
