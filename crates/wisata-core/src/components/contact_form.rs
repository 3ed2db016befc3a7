//! Contact form
//!
//! Validates on submit and then fakes a round trip: the submit button is
//! disabled and shows a spinner for `submit_latency_ms`, after which a success
//! alert is shown and the form is reset. Nothing leaves the page.

use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::alert::{show_alert, AlertKind};
use super::Mounted;
use crate::config::{Messages, SiteConfig};
use crate::error::ValidationError;
use crate::host::{EventKind, EventOutcome, Host, SubscriptionSet, Target};

/// A submission that passed validation, fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Trim and check the three fields. The first failing check wins.
pub fn validate(
    name: &str,
    email: &str,
    message: &str,
) -> Result<ContactSubmission, ValidationError> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ValidationError::Incomplete);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Alert copy for a validation failure.
pub fn alert_message(error: ValidationError, messages: &Messages) -> &str {
    match error {
        ValidationError::Incomplete => &messages.incomplete_fields,
        ValidationError::InvalidEmail => &messages.invalid_email,
    }
}

pub fn init<H: Host>(host: &Rc<H>, config: &Rc<SiteConfig>) -> Option<Mounted> {
    let Some(form) = host.element_by_id(&config.selectors.contact_form_id) else {
        debug!("contact form skipped: form missing");
        return None;
    };

    // Submission timers plus everything the alerts it raises schedule.
    let owned = SubscriptionSet::new();

    let submit = {
        let h = Rc::clone(host);
        let cfg = Rc::clone(config);
        let owned = owned.clone();
        let form_el = form.clone();
        host.listen(
            Target::Element(&form),
            EventKind::Submit,
            Box::new(move || {
                let field = |name: &str| h.form_value(&form_el, name).unwrap_or_default();
                let submission = match validate(&field("name"), &field("email"), &field("message"))
                {
                    Ok(submission) => submission,
                    Err(error) => {
                        debug!(%error, "contact form rejected");
                        show_alert(
                            &h,
                            &cfg,
                            alert_message(error, &cfg.messages),
                            AlertKind::Error,
                            &owned,
                        );
                        return EventOutcome::PreventDefault;
                    }
                };
                debug!(email = %submission.email, "contact form accepted");

                let button = h
                    .query_within(&form_el, &cfg.selectors.submit_button)
                    .into_iter()
                    .next();
                let original_label = button.as_ref().map(|b| h.inner_html(b));
                if let Some(button) = &button {
                    h.set_disabled(button, true);
                    h.set_inner_html(button, &cfg.messages.submitting_label);
                }

                let timer = {
                    let h2 = Rc::clone(&h);
                    let cfg2 = Rc::clone(&cfg);
                    let form2 = form_el.clone();
                    let owned2 = owned.clone();
                    h.set_timeout(
                        cfg.timing.submit_latency_ms,
                        Box::new(move || {
                            show_alert(
                                &h2,
                                &cfg2,
                                &cfg2.messages.submit_success,
                                AlertKind::Success,
                                &owned2,
                            );
                            h2.reset_form(&form2);
                            if let (Some(button), Some(label)) = (button, original_label) {
                                h2.set_disabled(&button, false);
                                h2.set_inner_html(&button, &label);
                            }
                        }),
                    )
                };
                // A second submit before the first completes leaves both running.
                owned.push(timer);

                EventOutcome::PreventDefault
            }),
        )
    };

    debug!("contact form mounted");
    Some(Mounted::new("contact_form", vec![submit, owned.to_subscription()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("ana@wisata.co.id"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@@b.c"));
    }

    #[test]
    fn test_validate_trims() {
        let ok = validate("  Ana ", " a@b.co", "Hi\n").unwrap();
        assert_eq!(ok.name, "Ana");
        assert_eq!(ok.email, "a@b.co");
        assert_eq!(ok.message, "Hi");
    }

    #[test]
    fn test_incomplete_wins_over_bad_email() {
        assert_eq!(validate("", "nope", "Hi"), Err(ValidationError::Incomplete));
        assert_eq!(validate("Ana", "   ", "Hi"), Err(ValidationError::Incomplete));
        assert_eq!(validate("Ana", "a@b.co", "  "), Err(ValidationError::Incomplete));
        assert_eq!(validate("Ana", "a@b", "Hi"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_alert_message_mapping() {
        let messages = Messages::default();
        assert_eq!(
            alert_message(ValidationError::Incomplete, &messages),
            "Mohon lengkapi semua kolom"
        );
        assert_eq!(
            alert_message(ValidationError::InvalidEmail, &messages),
            "Format email tidak valid"
        );
    }
}
