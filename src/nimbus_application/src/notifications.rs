use askama::Template;
use nimbus_core::{Email, EmailClient, EmailMessage, ResetToken, VerificationToken};

pub const VERIFICATION_SUBJECT: &str = "Verify your email - Weather App";
pub const PASSWORD_RESET_SUBJECT: &str = "Password recovery - Weather App";

#[derive(Template)]
#[template(path = "emails/verification.html")]
struct VerificationHtml<'a> {
    display_name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "emails/verification.txt")]
struct VerificationText<'a> {
    display_name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "emails/password_reset.html")]
struct PasswordResetHtml<'a> {
    link: &'a str,
}

#[derive(Template)]
#[template(path = "emails/password_reset.txt")]
struct PasswordResetText<'a> {
    link: &'a str,
}

fn compose(
    subject: &str,
    html: &impl Template,
    text: &impl Template,
) -> Result<EmailMessage, askama::Error> {
    Ok(EmailMessage {
        subject: subject.to_owned(),
        html_body: html.render()?,
        text_body: text.render()?,
    })
}

/// Transactional email. Delivery is best-effort: failures are logged and
/// never reach the caller.
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    email_client: &'a dyn EmailClient,
    base_url: &'a str,
}

impl<'a> Notifier<'a> {
    pub fn new(email_client: &'a dyn EmailClient, base_url: &'a str) -> Self {
        Self {
            email_client,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    #[tracing::instrument(name = "Notifier::send_verification", skip_all)]
    pub async fn send_verification(&self, recipient: &Email, display_name: &str, token: &VerificationToken) {
        let link = format!("{}/verify-email/{}", self.base_url, token.as_str());
        let message = compose(
            VERIFICATION_SUBJECT,
            &VerificationHtml {
                display_name,
                link: &link,
            },
            &VerificationText {
                display_name,
                link: &link,
            },
        );
        self.deliver(recipient, message).await;
    }

    #[tracing::instrument(name = "Notifier::send_password_reset", skip_all)]
    pub async fn send_password_reset(&self, recipient: &Email, token: &ResetToken) {
        let link = format!("{}/reset-password/{}", self.base_url, token.as_str());
        let message = compose(
            PASSWORD_RESET_SUBJECT,
            &PasswordResetHtml { link: &link },
            &PasswordResetText { link: &link },
        );
        self.deliver(recipient, message).await;
    }

    async fn deliver(&self, recipient: &Email, message: Result<EmailMessage, askama::Error>) {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "email template failed to render");
                return;
            }
        };

        if let Err(e) = self.email_client.send_email(recipient, &message).await {
            tracing::warn!(error = %e, subject = %message.subject, "email delivery failed");
        }
    }
}
