// Notification Message Rendering
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Subject-line conventions per tier and the HTML/plain-text bodies

use crate::notify::eligibility::Recipient;
use crate::notify::tier::Tier;

/// Subject line for one recipient, following the tier convention
pub fn subject_line(recipient: &Recipient) -> String {
    let days = recipient.days_remaining;
    match Tier::from_days(days) {
        Tier::Critical => format!(
            "URGENT: Digital certificate EXPIRED - {}",
            recipient.client_name
        ),
        Tier::Urgent => format!(
            "URGENT: Certificate expires in {} days - {}",
            days, recipient.client_name
        ),
        Tier::Attention | Tier::Informational => format!(
            "Notice: Certificate expires in {} days - {}",
            days, recipient.client_name
        ),
    }
}

/// HTML body for one recipient
pub fn html_body(recipient: &Recipient, office_name: &str) -> String {
    let tier = Tier::from_days(recipient.days_remaining);
    let color = tier.accent_color();
    let expiry_date = recipient.expiry.format("%d/%m/%Y");

    let deadline_phrase = if recipient.days_remaining < 0 {
        format!("expired {} days ago", recipient.days_remaining.abs())
    } else {
        format!(
            "expires in <strong style=\"color: {};\">{} days</strong>",
            color, recipient.days_remaining
        )
    };

    let days_cell = if recipient.days_remaining >= 0 {
        recipient.days_remaining.to_string()
    } else {
        "Expired".to_string()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f5f5f5;">
    <table width="100%" cellpadding="0" cellspacing="0" style="max-width: 600px; margin: 0 auto; background-color: #ffffff;">
        <tr>
            <td style="background: linear-gradient(135deg, #1E3A5F 0%, #3D5A80 100%); padding: 30px; text-align: center;">
                <h1 style="color: #ffffff; margin: 0; font-size: 24px;">Digital Certificate</h1>
                <p style="color: rgba(255,255,255,0.9); margin: 10px 0 0 0; font-size: 14px;">Expiry Notification</p>
            </td>
        </tr>
        <tr>
            <td style="padding: 30px 30px 20px 30px; text-align: center;">
                <span style="display: inline-block; background-color: {color}; color: white; padding: 8px 20px; border-radius: 20px; font-size: 12px; font-weight: bold; letter-spacing: 1px;">{badge}</span>
            </td>
        </tr>
        <tr>
            <td style="padding: 0 30px 30px 30px;">
                <p style="color: #333; font-size: 16px; line-height: 1.6; margin: 0 0 20px 0;">Dear client,</p>
                <p style="color: #333; font-size: 16px; line-height: 1.6; margin: 0 0 20px 0;">
                    The digital certificate of <strong>{client}</strong> {deadline}.
                </p>
                <table width="100%" style="background-color: #f8f9fa; border-radius: 8px; margin: 20px 0;">
                    <tr><td style="padding: 20px;">
                        <table width="100%">
                            <tr><td style="padding: 8px 0; border-bottom: 1px solid #e9ecef;">
                                <span style="color: #6c757d; font-size: 14px;">Company:</span><br>
                                <strong style="color: #333; font-size: 16px;">{client}</strong>
                            </td></tr>
                            <tr><td style="padding: 8px 0; border-bottom: 1px solid #e9ecef;">
                                <span style="color: #6c757d; font-size: 14px;">Expiry date:</span><br>
                                <strong style="color: {color}; font-size: 16px;">{expiry}</strong>
                            </td></tr>
                            <tr><td style="padding: 8px 0;">
                                <span style="color: #6c757d; font-size: 14px;">Days remaining:</span><br>
                                <strong style="color: {color}; font-size: 16px;">{days_cell}</strong>
                            </td></tr>
                        </table>
                    </td></tr>
                </table>
                <p style="color: #333; font-size: 16px; line-height: 1.6; margin: 20px 0;">{guidance}</p>
                <p style="color: #333; font-size: 16px; line-height: 1.6; margin: 20px 0 0 0;">
                    Please arrange the certificate renewal to avoid interruption of the services that depend on it.
                </p>
            </td>
        </tr>
        <tr>
            <td style="background-color: #f8f9fa; padding: 20px 30px; border-top: 1px solid #e9ecef;">
                <p style="color: #6c757d; font-size: 14px; margin: 0; text-align: center;">
                    Kind regards,<br>
                    <strong style="color: #333;">{office}</strong>
                </p>
            </td>
        </tr>
        <tr>
            <td style="padding: 15px 30px; text-align: center;">
                <p style="color: #999; font-size: 12px; margin: 0;">
                    This is an automatic email sent by the certificate management system.
                </p>
            </td>
        </tr>
    </table>
</body>
</html>"#,
        color = color,
        badge = tier.badge(),
        client = recipient.client_name,
        deadline = deadline_phrase,
        expiry = expiry_date,
        days_cell = days_cell,
        guidance = tier.guidance(),
        office = office_name,
    )
}

/// Plain-text alternative body
pub fn text_body(recipient: &Recipient, office_name: &str) -> String {
    let tier = Tier::from_days(recipient.days_remaining);
    format!(
        "Digital Certificate Expiry Notification\n\n\
        Status: {}\n\
        Company: {}\n\
        Expiry date: {}\n\
        Days remaining: {}\n\n\
        {}\n\n\
        Kind regards,\n{}\n",
        tier.badge(),
        recipient.client_name,
        recipient.expiry.format("%d/%m/%Y"),
        recipient.days_remaining,
        tier.guidance(),
        office_name,
    )
}
